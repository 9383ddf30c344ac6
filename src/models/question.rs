use crate::error::{AppResult, TriviaError};
use serde::{Deserialize, Serialize};

/// 题库中的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub category: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub difficulty: i64,
}

/// 通过校验、等待写入的新题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl NewQuestion {
    /// 存储分配 id 后转换为完整题目
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// 创建题目的原始输入，四个字段都可能缺失
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestionInput {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub difficulty: Option<i64>,
}

impl CreateQuestionInput {
    /// 校验四个必填字段
    pub fn validate(self) -> AppResult<NewQuestion> {
        let question = self.question.ok_or_else(|| TriviaError::missing_field("question"))?;
        let answer = self.answer.ok_or_else(|| TriviaError::missing_field("answer"))?;
        let category = self.category.ok_or_else(|| TriviaError::missing_field("category"))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| TriviaError::missing_field("difficulty"))?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

/// 测验模式下返回给客户端的题目（不含分类与难度）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

impl From<&Question> for QuizQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            answer: q.answer.clone(),
        }
    }
}

/// 一次抽题的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    /// 抽到一道未出现过的题
    Question(QuizQuestion),
    /// 候选题已全部出现过
    Exhausted,
}

impl QuizOutcome {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizOutcome::Exhausted)
    }
}

// ========== 整数字段的宽松反序列化 ==========
// 前端会把分类 id 作为字符串发送（例如 "3"），这里同时接受整数和数字字符串

struct IdVisitor;

impl<'de> serde::de::Visitor<'de> for IdVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an integer, a whole float or a numeric string")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Some)
            .map_err(|_| E::custom(format!("整数超出范围: {}", value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // 只接受没有小数部分的浮点数，例如 3.0
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(Some(value as i64))
        } else {
            Err(E::custom(format!("不是整数: {}", value)))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("无法解析为整数: {:?}", value)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }
}

/// 反序列化可缺失的整数字段，`null` 视为缺失
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor)
}

/// 反序列化必填的整数字段
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_optional_id(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("integer field must not be null"))
}
