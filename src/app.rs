use crate::api::{self, AppState, SharedState};
use crate::config::Config;
use crate::infrastructure::MemoryStore;
use crate::models::load_question_bank_or_empty;
use crate::utils::logging::{log_bank_loaded, log_listening, log_startup};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 应用主结构
pub struct App {
    config: Config,
    state: SharedState,
}

impl App {
    /// 初始化应用：加载题库，构建存储与服务
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let bank = load_question_bank_or_empty(Path::new(&config.question_bank)).await?;
        log_bank_loaded(bank.categories.len(), bank.questions.len());

        let store = Arc::new(MemoryStore::from_bank(bank));
        let state = AppState::new(store, config.quiz_selection, config.quiz_seed).shared();

        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听地址: {}", addr))?;

        self.serve(listener).await
    }

    /// 在已绑定的监听器上提供服务
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr().context("无法获取监听地址")?;
        log_listening(&addr.to_string());

        axum::serve(listener, api::router(self.state))
            .await
            .context("HTTP 服务异常退出")?;

        Ok(())
    }
}
