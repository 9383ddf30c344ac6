use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志级别由 `RUST_LOG` 控制，默认 `info`。重复调用不会报错。
pub fn init() {
    init_with_verbosity(false);
}

/// 按配置初始化日志，开启详细日志时默认级别为 `debug`
pub fn init_with_verbosity(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
