//! API 模块 - 请求处理层
//!
//! 负责把 HTTP 路由映射到目录服务与抽题服务，
//! 并把三类业务错误翻译成状态码和统一的 JSON 错误体

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::error_response;
pub use routes::router;
pub use state::{AppState, SharedState};
