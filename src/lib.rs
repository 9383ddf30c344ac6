//! # Trivia API
//!
//! 一个问答题库服务：分类浏览、题目分页、搜索、增删，以及不重复抽题的测验模式
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有题目与分类数据，只暴露读写能力
//! - `QuestionStore` - 存储接口，`MemoryStore` 为内存实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 无状态的业务规则
//! - `CatalogService` - 分页窗口、分类筛选、大小写不敏感的题干搜索、增删
//! - `QuizSelector` - 从候选题中随机抽取未出过的题，或报告已出完
//!
//! ### ③ 请求处理层（API）
//! - `api/` - 路由、请求体解析、`success` 信封、错误状态码、跨域头
//!
//! ### ④ 启动层（App）
//! - `app` - 加载配置与题库，绑定端口并运行服务
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppResult, StoreError, TriviaError};
pub use infrastructure::{MemoryStore, QuestionStore};
pub use models::{Category, CategoryMap, Question, QuizCategory, QuizOutcome, QuizQuestion};
pub use services::{CatalogService, QuizSelector, SelectionStrategy};
