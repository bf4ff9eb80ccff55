use contracts::shared::api_error::ApiResult;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, read_json, send_json};

/// Login with username and password
pub async fn login(username: String, password: String) -> ApiResult<LoginResponse> {
    let request = LoginRequest { username, password };
    let response = send_json(Request::post(&api_url("/login/")), &request).await?;
    read_json(response).await
}

/// Create an account; the server answers with a ready session
pub async fn register(request: &RegisterRequest) -> ApiResult<RegisterResponse> {
    let response = send_json(Request::post(&api_url("/register/")), request).await?;
    read_json(response).await
}
