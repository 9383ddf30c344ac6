use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 测验模式中表示"任意分类"的保留 id，不对应任何已存储的分类
pub const QUIZ_ANY_CATEGORY: i64 = 0;

/// 题目分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// 分类显示名称
    #[serde(rename = "type")]
    pub kind: String,
}

/// 分类 id → 显示名称，按 id 升序
pub type CategoryMap = BTreeMap<i64, String>;

/// 测验的分类范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizCategory {
    /// 所有分类
    Any,
    /// 指定分类
    Id(i64),
}

impl QuizCategory {
    /// 从客户端传来的分类 id 构造，`0` 表示任意分类
    pub fn from_id(id: i64) -> Self {
        if id == QUIZ_ANY_CATEGORY {
            QuizCategory::Any
        } else {
            QuizCategory::Id(id)
        }
    }
}

impl std::fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizCategory::Any => write!(f, "全部分类"),
            QuizCategory::Id(id) => write!(f, "分类 {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_any_category() {
        assert_eq!(QuizCategory::from_id(0), QuizCategory::Any);
        assert_eq!(QuizCategory::from_id(3), QuizCategory::Id(3));
    }

    #[test]
    fn test_category_serializes_kind_as_type() {
        let category = Category {
            id: 1,
            kind: "Science".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            serde_json::json!({ "id": 1, "type": "Science" })
        );
    }
}
