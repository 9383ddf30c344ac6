use crate::models::category::{Category, QUIZ_ANY_CATEGORY};
use crate::models::question::Question;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// 题库文件内容
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// 校验分类 id 与题目 id 的唯一性，且分类 id 不能占用保留值 0
    fn validate(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.id == QUIZ_ANY_CATEGORY {
                anyhow::bail!("分类 id {} 为保留值 ({})", QUIZ_ANY_CATEGORY, category.kind);
            }
            if !category_ids.insert(category.id) {
                anyhow::bail!("分类 id 重复: {}", category.id);
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                anyhow::bail!("题目 id 重复: {}", question.id);
            }
            if !category_ids.contains(&question.category) {
                anyhow::bail!(
                    "题目 {} 引用了不存在的分类 {}",
                    question.id,
                    question.category
                );
            }
        }

        Ok(())
    }
}

/// 从 TOML 文件加载题库
pub async fn load_question_bank(toml_file_path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取题库文件: {}", toml_file_path.display()))?;

    let bank: QuestionBank = toml::from_str(&content)
        .with_context(|| format!("无法解析题库文件: {}", toml_file_path.display()))?;

    bank.validate()
        .with_context(|| format!("题库文件校验失败: {}", toml_file_path.display()))?;

    Ok(bank)
}

/// 加载题库，文件不存在时返回空题库
pub async fn load_question_bank_or_empty(toml_file_path: &Path) -> Result<QuestionBank> {
    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        tracing::warn!(
            "题库文件不存在: {}，将以空题库启动",
            toml_file_path.display()
        );
        return Ok(QuestionBank::default());
    }

    tracing::info!(
        "正在加载题库: {}",
        toml_file_path.file_name().unwrap_or_default().to_string_lossy()
    );
    load_question_bank(toml_file_path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// 在临时目录写入一个题库文件
    async fn write_bank(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "trivia_api_{}_{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).await.unwrap();
        path
    }

    const SAMPLE: &str = r#"
[[categories]]
id = 1
type = "Science"

[[categories]]
id = 2
type = "Art"

[[questions]]
id = 20
question = "What is the heaviest organ in the human body?"
answer = "The Liver"
category = 1
difficulty = 4

[[questions]]
id = 17
question = "La Giaconda is better known as what?"
answer = "Mona Lisa"
category = "2"
difficulty = 3
"#;

    #[tokio::test]
    async fn test_load_question_bank() {
        let path = write_bank("sample", SAMPLE).await;
        let bank = load_question_bank(&path).await.unwrap();
        fs::remove_file(&path).await.ok();

        assert_eq!(bank.categories.len(), 2);
        assert_eq!(bank.categories[1].kind, "Art");
        assert_eq!(bank.questions.len(), 2);
        assert_eq!(bank.questions[1].category, 2);
    }

    #[tokio::test]
    async fn test_reserved_category_id_rejected() {
        let path = write_bank(
            "reserved",
            r#"
[[categories]]
id = 0
type = "All"
"#,
        )
        .await;
        let result = load_question_bank(&path).await;
        fs::remove_file(&path).await.ok();

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dangling_category_rejected() {
        let path = write_bank(
            "dangling",
            r#"
[[questions]]
id = 1
question = "q"
answer = "a"
category = 9
difficulty = 1
"#,
        )
        .await;
        let result = load_question_bank(&path).await;
        fs::remove_file(&path).await.ok();

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_gives_empty_bank() {
        let path = std::env::temp_dir().join("trivia_api_definitely_missing.toml");
        let bank = load_question_bank_or_empty(&path).await.unwrap();
        assert!(bank.categories.is_empty());
        assert!(bank.questions.is_empty());
    }
}
