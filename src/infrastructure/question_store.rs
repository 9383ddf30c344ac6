//! 题库存储 - 基础设施层
//!
//! 持有题目与分类数据，只暴露读写能力

use crate::error::{StoreError, StoreResult};
use crate::models::{Category, NewQuestion, Question, QuestionBank};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 题库存储
///
/// 职责：
/// - 每次调用都是独立的原子操作
/// - 列表按 id 升序返回
/// - 不包含分页、搜索、抽题等业务规则
pub trait QuestionStore: Send + Sync {
    /// 所有分类，按 id 升序
    fn categories(&self) -> StoreResult<Vec<Category>>;

    /// 所有题目，按 id 升序
    fn questions(&self) -> StoreResult<Vec<Question>>;

    /// 指定分类下的题目，按 id 升序；分类不存在时返回空列表
    fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>>;

    /// 按 id 查找题目
    fn find_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// 写入新题目并返回分配的 id
    fn insert_question(&self, question: NewQuestion) -> StoreResult<i64>;

    /// 删除题目
    fn delete_question(&self, id: i64) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    /// 下一个可分配的题目 id，删除后不回收
    next_id: i64,
}

/// 内存题库
///
/// 题目 id 从已有最大 id 之后递增分配；写入时检查分类是否存在，
/// 相当于外键约束。
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// 创建空题库
    pub fn new() -> Self {
        Self::from_bank(QuestionBank::default())
    }

    /// 从题库文件内容创建
    pub fn from_bank(bank: QuestionBank) -> Self {
        let categories: BTreeMap<i64, Category> =
            bank.categories.into_iter().map(|c| (c.id, c)).collect();
        let questions: BTreeMap<i64, Question> =
            bank.questions.into_iter().map(|q| (q.id, q)).collect();
        let next_id = questions.keys().next_back().map_or(1, |max| max + 1);

        Self {
            tables: RwLock::new(Tables {
                categories,
                questions,
                next_id,
            }),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl QuestionStore for MemoryStore {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.read()?.questions.values().cloned().collect())
    }

    fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        Ok(self
            .read()?
            .questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.get(&id).cloned())
    }

    fn insert_question(&self, question: NewQuestion) -> StoreResult<i64> {
        let mut tables = self.write()?;

        if !tables.categories.contains_key(&question.category) {
            return Err(StoreError::Constraint(format!(
                "分类 {} 不存在",
                question.category
            )));
        }

        let id = tables.next_id;
        tables.next_id += 1;
        tables.questions.insert(id, question.with_id(id));
        Ok(id)
    }

    fn delete_question(&self, id: i64) -> StoreResult<()> {
        match self.write()?.questions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::Constraint(format!("题目 {} 已不存在", id))),
        }
    }
}
