use crate::error::TriviaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// 状态码对应的错误提示
fn error_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request: Required data is missing",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "The server failed to process the request",
        _ => "Unexpected error",
    }
}

/// 构建统一的 JSON 错误响应
///
/// 响应体格式：`{"success": false, "error": <状态码>, "message": <提示>}`
pub fn error_response(status: StatusCode) -> Response {
    let body = json!({
        "success": false,
        "error": status.as_u16(),
        "message": error_message(status),
    });
    (status, Json(body)).into_response()
}

impl TriviaError {
    /// 业务错误对应的状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            TriviaError::Validation(_) => StatusCode::BAD_REQUEST,
            TriviaError::NotFound(_) => StatusCode::NOT_FOUND,
            TriviaError::Processing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if matches!(self, TriviaError::Processing(_)) {
            error!("❌ 请求处理失败 ({}): {}", status.as_u16(), self);
        } else {
            warn!("⚠️ 请求被拒绝 ({}): {}", status.as_u16(), self);
        }
        error_response(status)
    }
}
