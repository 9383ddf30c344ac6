//! 测验抽题服务 - 业务能力层
//!
//! 只负责"从候选题中抽一道没出过的题"，不记录任何会话状态：
//! 调用方需要把每次返回的题目 id 追加到已出题列表后再发起下一次调用

use crate::error::{AppResult, TriviaError};
use crate::infrastructure::QuestionStore;
use crate::models::{Question, QuizCategory, QuizOutcome, QuizQuestion};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 抽题策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// 在全部候选中有放回地随机抽取，抽到已出过的题就重抽
    #[default]
    Redraw,
    /// 先算出未出过的题，再从中直接随机抽取
    Direct,
}

impl FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redraw" => Ok(SelectionStrategy::Redraw),
            "direct" => Ok(SelectionStrategy::Direct),
            other => Err(format!("未知的抽题策略: {}", other)),
        }
    }
}

/// 测验抽题服务
#[derive(Clone)]
pub struct QuizSelector {
    store: Arc<dyn QuestionStore>,
    strategy: SelectionStrategy,
}

impl QuizSelector {
    pub fn new(store: Arc<dyn QuestionStore>, strategy: SelectionStrategy) -> Self {
        Self { store, strategy }
    }

    /// 抽取下一道题
    ///
    /// # 参数
    /// - `quiz_category`: 测验分类，`None` 表示请求中缺失
    /// - `previous_questions`: 已出过的题目 id，`None` 表示请求中缺失
    /// - `rng`: 随机数来源
    ///
    /// # 返回
    /// 已出题数量不少于候选题数量时返回 `QuizOutcome::Exhausted`
    pub fn next<R: Rng + ?Sized>(
        &self,
        quiz_category: Option<QuizCategory>,
        previous_questions: Option<&[i64]>,
        rng: &mut R,
    ) -> AppResult<QuizOutcome> {
        let quiz_category =
            quiz_category.ok_or_else(|| TriviaError::missing_field("quiz_category"))?;
        let previous_questions =
            previous_questions.ok_or_else(|| TriviaError::missing_field("previous_questions"))?;

        let candidates = self.candidates(quiz_category, rng)?;
        debug!(
            "{}: 候选 {} 道, 已出 {} 道",
            quiz_category,
            candidates.len(),
            previous_questions.len()
        );

        if previous_questions.len() >= candidates.len() {
            info!("🏁 {} 的题目已全部出完", quiz_category);
            return Ok(QuizOutcome::Exhausted);
        }

        let seen: HashSet<i64> = previous_questions.iter().copied().collect();
        let picked = match self.strategy {
            SelectionStrategy::Redraw => redraw_unseen(&candidates, &seen, rng),
            SelectionStrategy::Direct => sample_unseen(&candidates, &seen, rng),
        };

        // 已出题数量少于候选数量时一定存在未出过的题；
        // 只有当候选 id 重复时才可能走到这里
        let question = picked.ok_or_else(|| {
            error!("❌ {} 中找不到未出过的题", quiz_category);
            TriviaError::Processing(format!("{} 中找不到未出过的题", quiz_category))
        })?;

        Ok(QuizOutcome::Question(QuizQuestion::from(question)))
    }

    /// 候选题：任意分类时为全部题目（随机顺序），否则为该分类的题目
    fn candidates<R: Rng + ?Sized>(
        &self,
        quiz_category: QuizCategory,
        rng: &mut R,
    ) -> AppResult<Vec<Question>> {
        let mut candidates = match quiz_category {
            QuizCategory::Any => self.store.questions(),
            QuizCategory::Id(id) => self.store.questions_in_category(id),
        }
        .map_err(|e| {
            error!("❌ 读取 {} 的候选题失败: {}", quiz_category, e);
            TriviaError::from(e)
        })?;

        if quiz_category == QuizCategory::Any {
            candidates.shuffle(rng);
        }
        Ok(candidates)
    }
}

/// 有放回地重抽，直到抽到未出过的题
///
/// 存在未出过的候选时以概率 1 终止
fn redraw_unseen<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    seen: &HashSet<i64>,
    rng: &mut R,
) -> Option<&'a Question> {
    if candidates.iter().all(|q| seen.contains(&q.id)) {
        return None;
    }

    loop {
        let candidate = &candidates[rng.gen_range(0..candidates.len())];
        if !seen.contains(&candidate.id) {
            return Some(candidate);
        }
    }
}

/// 从未出过的题中直接均匀抽取
fn sample_unseen<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    seen: &HashSet<i64>,
    rng: &mut R,
) -> Option<&'a Question> {
    let unseen: Vec<&Question> = candidates
        .iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();
    unseen.choose(rng).copied()
}
