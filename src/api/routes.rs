use crate::api::error::error_response;
use crate::api::handlers;
use crate::api::state::SharedState;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ALLOW, AUTHORIZATION, CONTENT_TYPE,
};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware;
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

const ALLOW_HEADERS: &str = "Content-Type,Authorization,true";
const ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// 构建路由
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route(
            "/categories/:category_id/questions",
            get(handlers::list_category_questions).fallback(handlers::unsupported_method),
        )
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route("/questions/search", post(handlers::search_questions))
        .route(
            "/questions/:question_id",
            delete(handlers::delete_question).fallback(handlers::unsupported_method),
        )
        .route("/quizzes", post(handlers::next_quiz_question))
        .fallback(fallback)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .with_state(state)
}

/// 允许任意来源跨域访问，预检请求由跨域层直接应答
///
/// 允许的方法与请求头在所有响应上统一覆盖写入
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, HeaderName::from_static("true")])
}

/// 未匹配的路由
async fn fallback() -> Response {
    error_response(StatusCode::NOT_FOUND)
}

/// 把框架生成的空 405 响应替换成 JSON 错误体
async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        let mut replaced = error_response(StatusCode::METHOD_NOT_ALLOWED);
        if let Some(allow) = response.headers().get(ALLOW) {
            replaced.headers_mut().insert(ALLOW, allow.clone());
        }
        return replaced;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_method_not_allowed_gets_json_body() {
        let response =
            method_not_allowed_as_json(StatusCode::METHOD_NOT_ALLOWED.into_response()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let ok = method_not_allowed_as_json(StatusCode::OK.into_response()).await;
        assert_eq!(ok.status(), StatusCode::OK);
    }
}
