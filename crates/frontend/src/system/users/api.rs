use contracts::shared::api_error::ApiResult;
use contracts::system::users::{ChangePasswordDto, UpdateProfileDto, UserProfile};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, authorized, read_json, require_token, send, send_json};

/// Fetch the logged-in user's profile
pub async fn fetch_me() -> ApiResult<UserProfile> {
    let token = require_token()?;
    let response = send(authorized(Request::get(&api_url("/users/me/")), &token)).await?;
    read_json(response).await
}

/// Update the profile; only changed fields are sent
pub async fn update_me(dto: &UpdateProfileDto) -> ApiResult<()> {
    let token = require_token()?;
    send_json(authorized(Request::put(&api_url("/users/me/")), &token), dto).await?;
    Ok(())
}

pub async fn change_password(dto: &ChangePasswordDto) -> ApiResult<()> {
    let token = require_token()?;
    send_json(
        authorized(Request::put(&api_url("/users/change-password/")), &token),
        dto,
    )
    .await?;
    Ok(())
}

/// Delete the account permanently
pub async fn delete_me() -> ApiResult<()> {
    let token = require_token()?;
    send(authorized(Request::delete(&api_url("/users/me/")), &token)).await?;
    Ok(())
}
