//! REST calls for car records.

use contracts::domain::a001_car::{CarDto, CarId, CarListRequest, DistinctValues};
use contracts::shared::api_error::{ApiError, ApiResult};
use contracts::shared::list_page::{parse_list_page, ListPage};
use gloo_net::http::Request;

use crate::shared::api_utils::{
    api_url, authorized, network_error, read_bytes, read_json, require_token, send, send_json,
};
use crate::shared::export::ExportFormat;

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        api_url(path)
    } else {
        format!("{}?{}", api_url(path), query)
    }
}

/// One page of cars; paginated and bare-array bodies are both accepted
pub async fn fetch_page(request: &CarListRequest) -> ApiResult<ListPage<CarDto>> {
    let token = require_token()?;
    let url = with_query("/cars/", &request.query_string());
    log::debug!("GET {}", url);
    let response = send(authorized(Request::get(&url), &token)).await?;
    let body = response.text().await.map_err(network_error)?;
    parse_list_page(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

pub async fn fetch_by_id(id: CarId) -> ApiResult<CarDto> {
    let token = require_token()?;
    let response = send(authorized(Request::get(&api_url(&format!("/cars/{}/", id))), &token)).await?;
    read_json(response).await
}

/// POST for a new record, PUT when the record has an id
pub async fn save(dto: &CarDto) -> ApiResult<()> {
    let token = require_token()?;
    let builder = match dto.id {
        Some(id) => Request::put(&api_url(&format!("/cars/{}/", id))),
        None => Request::post(&api_url("/cars/")),
    };
    send_json(authorized(builder, &token), dto).await?;
    Ok(())
}

pub async fn delete(id: CarId) -> ApiResult<()> {
    let token = require_token()?;
    send(authorized(Request::delete(&api_url(&format!("/cars/{}/", id))), &token)).await?;
    Ok(())
}

/// Marks and fuels for the filter dropdowns
pub async fn fetch_distinct() -> ApiResult<DistinctValues> {
    let token = require_token()?;
    let response = send(authorized(Request::get(&api_url("/distinct/")), &token)).await?;
    read_json::<DistinctValues>(response).await.map(DistinctValues::normalized)
}

/// Server-rendered export of every record matching the applied filters
pub async fn export(format: ExportFormat, request: &CarListRequest) -> ApiResult<Vec<u8>> {
    let token = require_token()?;
    let url = with_query(format.endpoint(), &request.export_query_string());
    let response = send(authorized(Request::get(&url), &token)).await?;
    read_bytes(response).await
}

/// Most recently added records, newest first
pub async fn fetch_recent() -> ApiResult<Vec<CarDto>> {
    let token = require_token()?;
    let response = send(authorized(Request::get(&api_url("/recent-cars/")), &token)).await?;
    let body = response.text().await.map_err(network_error)?;
    parse_list_page(&body)
        .map(|page: ListPage<CarDto>| page.items)
        .map_err(|e| ApiError::Parse(e.to_string()))
}
