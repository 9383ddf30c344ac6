use crate::infrastructure::QuestionStore;
use crate::services::{CatalogService, QuizSelector, SelectionStrategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 各个请求共享的状态
pub struct AppState {
    pub catalog: CatalogService,
    pub quiz: QuizSelector,
    /// 测验抽题使用的随机数来源
    pub rng: Mutex<StdRng>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// 创建共享状态
    ///
    /// # 参数
    /// - `store`: 题库存储
    /// - `strategy`: 抽题策略
    /// - `seed`: 随机数种子，`None` 时使用系统熵
    pub fn new(
        store: Arc<dyn QuestionStore>,
        strategy: SelectionStrategy,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog: CatalogService::new(store.clone()),
            quiz: QuizSelector::new(store, strategy),
            rng: Mutex::new(rng),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
