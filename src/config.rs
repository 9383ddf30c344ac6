use crate::services::SelectionStrategy;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 题库 TOML 文件路径
    pub question_bank: String,
    /// 测验随机数种子，未设置时使用系统熵
    pub quiz_seed: Option<u64>,
    /// 测验抽题策略
    pub quiz_selection: SelectionStrategy,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            question_bank: "data/trivia.toml".to_string(),
            quiz_seed: None,
            quiz_selection: SelectionStrategy::Redraw,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，缺失或无法解析的项使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let default = Self::default();
        Self {
            host: std::env::var("TRIVIA_HOST").unwrap_or(default.host),
            port: std::env::var("TRIVIA_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port),
            question_bank: std::env::var("QUESTION_BANK").unwrap_or(default.question_bank),
            quiz_seed: std::env::var("QUIZ_SEED").ok().and_then(|v| v.parse().ok()),
            quiz_selection: std::env::var("QUIZ_SELECTION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.quiz_selection),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 监听地址（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
