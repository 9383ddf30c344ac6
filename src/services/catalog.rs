//! 题目目录服务 - 业务能力层
//!
//! 负责分类列表、题目分页、分类筛选、搜索、创建与删除，
//! 不关心请求如何到达、结果如何序列化

use crate::error::{AppResult, TriviaError};
use crate::infrastructure::QuestionStore;
use crate::models::{CategoryMap, CreateQuestionInput, Question};
use crate::utils::logging::truncate_text;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 每页题目数量
pub const QUESTIONS_PER_PAGE: usize = 5;

/// 分页窗口 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// 计算第 `page` 页（从 1 开始）的窗口，`page` 为 0 时按第 1 页处理
    pub fn for_page(page: usize) -> Self {
        let start = page.max(1).saturating_sub(1).saturating_mul(QUESTIONS_PER_PAGE);
        Self {
            start,
            end: start.saturating_add(QUESTIONS_PER_PAGE),
        }
    }

    /// 截取窗口内的元素，超出范围时返回空切片
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.min(items.len());
        &items[start..end]
    }
}

/// 解析页码参数：缺失、非数字或非正数都按第 1 页处理
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .and_then(|page| usize::try_from(page).ok())
        .unwrap_or(1)
}

/// 取第 `page` 页的题目
pub fn paginate<T: Clone>(page: usize, items: &[T]) -> Vec<T> {
    PageWindow::for_page(page).slice(items).to_vec()
}

/// 题干是否包含搜索词（不区分大小写，只比较题干）
///
/// `needle` 需已转为小写
pub fn matches_term(question: &Question, needle: &str) -> bool {
    question.question.to_ascii_lowercase().contains(needle)
}

/// 全部题目的分页结果
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    /// 未筛选的题目总数
    pub total_questions: usize,
    pub categories: CategoryMap,
}

/// 单个分类的分页结果
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub questions: Vec<Question>,
    /// 该分类下的题目总数
    pub total_questions: usize,
    pub current_category: i64,
}

/// 搜索结果（不分页）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// 题目目录服务
///
/// 每次调用都是无状态的，所有数据来自题库存储
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn QuestionStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// 所有分类，按 id 升序
    pub fn list_categories(&self) -> AppResult<CategoryMap> {
        let categories = self.store.categories().map_err(|e| {
            error!("❌ 读取分类失败: {}", e);
            TriviaError::from(e)
        })?;

        Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    /// 分页列出所有题目
    pub fn list_questions(&self, page: usize) -> AppResult<QuestionListing> {
        let selection = self.ordered_questions()?;
        let questions = paginate(page, &selection);
        debug!(
            "第 {} 页: {} 道题 / 共 {} 道",
            page,
            questions.len(),
            selection.len()
        );

        Ok(QuestionListing {
            questions,
            total_questions: selection.len(),
            categories: self.list_categories()?,
        })
    }

    /// 分页列出单个分类的题目
    ///
    /// 分类不存在时返回空列表而不是报错
    pub fn list_questions_by_category(
        &self,
        category_id: i64,
        page: usize,
    ) -> AppResult<CategoryListing> {
        let mut selection = self.store.questions_in_category(category_id).map_err(|e| {
            error!("❌ 读取分类 {} 的题目失败: {}", category_id, e);
            TriviaError::from(e)
        })?;
        selection.sort_by_key(|q| q.id);

        let questions = paginate(page, &selection);
        debug!(
            "分类 {} 第 {} 页: {} 道题 / 共 {} 道",
            category_id,
            page,
            questions.len(),
            selection.len()
        );

        Ok(CategoryListing {
            questions,
            total_questions: selection.len(),
            current_category: category_id,
        })
    }

    /// 按题干搜索
    ///
    /// 搜索词去除首尾空白后为空时返回空结果
    pub fn search(&self, term: &str) -> AppResult<SearchResults> {
        let term = term.trim();
        if term.is_empty() {
            debug!("搜索词为空，返回空结果");
            return Ok(SearchResults::default());
        }

        let needle = term.to_ascii_lowercase();
        let questions: Vec<Question> = self
            .ordered_questions()?
            .into_iter()
            .filter(|q| matches_term(q, &needle))
            .collect();
        debug!("搜索 {:?}: 命中 {} 道题", term, questions.len());

        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
        })
    }

    /// 创建题目并返回新 id
    pub fn create_question(&self, input: CreateQuestionInput) -> AppResult<i64> {
        let new_question = input.validate().map_err(|e| {
            warn!("⚠️ 创建题目被拒绝: {}", e);
            e
        })?;
        let preview = truncate_text(&new_question.question, 60);

        let id = self.store.insert_question(new_question).map_err(|e| {
            error!("❌ 写入题目失败: {}", e);
            TriviaError::from(e)
        })?;

        info!("✓ 已创建题目 {}: {}", id, preview);
        Ok(id)
    }

    /// 按 id 获取题目
    pub fn get_question(&self, id: i64) -> AppResult<Question> {
        self.store
            .find_question(id)?
            .ok_or_else(|| TriviaError::question_not_found(id))
    }

    /// 删除题目
    pub fn delete_question(&self, id: i64) -> AppResult<()> {
        let question = self.get_question(id).map_err(|e| {
            warn!("⚠️ 删除题目 {} 失败: {}", id, e);
            e
        })?;

        self.store.delete_question(question.id).map_err(|e| {
            error!("❌ 删除题目 {} 失败: {}", id, e);
            TriviaError::from(e)
        })?;

        info!("✓ 已删除题目 {}", id);
        Ok(())
    }

    fn ordered_questions(&self) -> AppResult<Vec<Question>> {
        let mut questions = self.store.questions().map_err(|e| {
            error!("❌ 读取题目失败: {}", e);
            TriviaError::from(e)
        })?;
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }
}
