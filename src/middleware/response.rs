use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// `{"success": true, "data": ...}` around a view model or record.
#[derive(Debug)]
pub struct ApiResponse<T> {
    data: T,
    status: StatusCode,
    location: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data, status: StatusCode::OK, location: None }
    }

    /// 201 with `Location` naming where the stored record can be read back
    pub fn created(data: T, location: impl Into<String>) -> Self {
        Self { data, status: StatusCode::CREATED, location: Some(location.into()) }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::InternalServerError("Failed to serialize response data".to_string()).into_response();
            }
        };

        let mut response = (self.status, Json(json!({ "success": true, "data": data }))).into_response();

        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(_) => tracing::warn!("Dropping unencodable Location '{}'", location),
            }
        }

        response
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
