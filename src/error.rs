use thiserror::Error;

/// 业务错误类型
///
/// 三种失败互不重叠，由请求处理层各自映射成状态码：
/// - `Validation`: 请求缺少必填字段，调用方可自行修正
/// - `NotFound`: 被引用的题目不存在
/// - `Processing`: 存储层失败（连接、约束冲突等），与请求形态无关
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriviaError {
    /// 请求校验失败
    #[error("请求校验失败: {0}")]
    Validation(String),
    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),
    /// 处理失败
    #[error("处理失败: {0}")]
    Processing(String),
}

/// 题库存储错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// 存储不可用（锁中毒、连接断开等）
    #[error("题库存储不可用: {0}")]
    Unavailable(String),
    /// 约束冲突
    #[error("题库约束冲突: {0}")]
    Constraint(String),
}

// ========== 从存储错误转换 ==========
// 存储层的所有失败统一归为处理失败，不再细分

impl From<StoreError> for TriviaError {
    fn from(err: StoreError) -> Self {
        TriviaError::Processing(err.to_string())
    }
}

// ========== 便捷构造函数 ==========

impl TriviaError {
    /// 创建缺少字段的校验错误
    pub fn missing_field(field: &str) -> Self {
        TriviaError::Validation(format!("缺少字段 `{}`", field))
    }

    /// 创建题目不存在错误
    pub fn question_not_found(id: i64) -> Self {
        TriviaError::NotFound(format!("题目 {} 不存在", id))
    }
}

// ========== Result 类型别名 ==========

/// 业务操作结果类型
pub type AppResult<T> = Result<T, TriviaError>;

/// 存储操作结果类型
pub type StoreResult<T> = Result<T, StoreError>;
