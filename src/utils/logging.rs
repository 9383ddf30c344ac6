/// 日志工具模块
///
/// 提供启动信息输出和日志文本格式化的辅助函数
use crate::config::Config;
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 Trivia API 启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 题库文件: {}", config.question_bank);
    info!("🎲 抽题策略: {:?}", config.quiz_selection);
    match config.quiz_seed {
        Some(seed) => info!("🌱 随机数种子: {}", seed),
        None => info!("🌱 随机数种子: 系统熵"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
///
/// # 参数
/// - `categories`: 分类数量
/// - `questions`: 题目数量
pub fn log_bank_loaded(categories: usize, questions: usize) {
    info!("✓ 已加载 {} 个分类, {} 道题目", categories, questions);
}

/// 记录监听地址
pub fn log_listening(addr: &str) {
    info!("🌐 服务已启动: http://{}", addr);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
