use contracts::dashboards::d400_car_statistics::CarStatistics;
use contracts::shared::api_error::ApiResult;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, authorized, read_json, require_token, send};

/// Pre-aggregated statistics over every car record
pub async fn fetch_statistics() -> ApiResult<CarStatistics> {
    let token = require_token()?;
    let response = send(authorized(Request::get(&api_url("/statistics/")), &token)).await?;
    read_json(response).await
}
