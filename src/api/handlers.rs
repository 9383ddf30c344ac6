//! 路由处理函数
//!
//! 每个函数只做三件事：取参数、调用服务、包装 `success` 信封

use crate::api::error::error_response;
use crate::api::state::SharedState;
use crate::error::TriviaError;
use crate::models::question::deserialize_optional_id;
use crate::models::{CreateQuestionInput, QuizCategory, QuizOutcome};
use crate::services::parse_page;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

type HandlerResult<T> = Result<T, TriviaError>;

/// 分页查询参数，原样保留字符串以便宽松解析
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// 搜索请求体
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// 测验请求中的分类
#[derive(Debug, Default, Deserialize)]
pub struct QuizCategoryPayload {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// 测验请求体
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryPayload>,
}

/// 请求体无法解析时按校验失败处理
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> HandlerResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        warn!("⚠️ 请求体无法解析: {}", rejection.body_text());
        TriviaError::Validation(rejection.body_text())
    })
}

/// 路径中的 id 不是非负整数时视为路由不存在
fn path_id(raw: &str) -> HandlerResult<i64> {
    let invalid = || TriviaError::NotFound(format!("无效的 id: {}", raw));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>().map_err(|_| invalid())
}

/// 带 id 的路由收到不支持的方法：id 无效时按路由不存在处理
pub async fn unsupported_method(Path(raw): Path<String>) -> HandlerResult<Response> {
    path_id(&raw)?;
    Ok(error_response(StatusCode::METHOD_NOT_ALLOWED))
}

/// GET /categories
pub async fn list_categories(State(state): State<SharedState>) -> HandlerResult<Json<Value>> {
    let categories = state.catalog.list_categories()?;
    Ok(Json(json!({
        "success": true,
        "categories": categories,
    })))
}

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> HandlerResult<Json<Value>> {
    let page = parse_page(query.page.as_deref());
    let listing = state.catalog.list_questions(page)?;
    Ok(Json(json!({
        "success": true,
        "questions": listing.questions,
        "total_questions": listing.total_questions,
        "categories": listing.categories,
    })))
}

/// GET /categories/{id}/questions?page=N
pub async fn list_category_questions(
    State(state): State<SharedState>,
    Path(category_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> HandlerResult<Json<Value>> {
    let category_id = path_id(&category_id)?;
    let page = parse_page(query.page.as_deref());
    let listing = state.catalog.list_questions_by_category(category_id, page)?;
    Ok(Json(json!({
        "success": true,
        "questions": listing.questions,
        "total_questions": listing.total_questions,
        "current_category": listing.current_category,
    })))
}

/// POST /questions
pub async fn create_question(
    State(state): State<SharedState>,
    payload: Result<Json<CreateQuestionInput>, JsonRejection>,
) -> HandlerResult<Response> {
    let input = body(payload)?;
    let id = state.catalog.create_question(input)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": id,
        })),
    )
        .into_response())
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<SharedState>,
    Path(question_id): Path<String>,
) -> HandlerResult<Json<Value>> {
    let question_id = path_id(&question_id)?;
    state.catalog.delete_question(question_id)?;
    Ok(Json(json!({ "success": true })))
}

/// POST /questions/search
pub async fn search_questions(
    State(state): State<SharedState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> HandlerResult<Json<Value>> {
    let request = body(payload)?;
    let results = state
        .catalog
        .search(request.search_term.as_deref().unwrap_or(""))?;
    Ok(Json(json!({
        "success": true,
        "questions": results.questions,
        "total_questions": results.total_questions,
    })))
}

/// POST /quizzes
pub async fn next_quiz_question(
    State(state): State<SharedState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> HandlerResult<Json<Value>> {
    let request = body(payload)?;

    let quiz_category = match request.quiz_category {
        Some(category) => {
            let id = category
                .id
                .ok_or_else(|| TriviaError::missing_field("quiz_category.id"))?;
            debug!("测验分类: {} ({:?})", id, category.kind);
            Some(QuizCategory::from_id(id))
        }
        None => None,
    };

    let outcome = {
        let mut rng = state.rng.lock().await;
        state.quiz.next(
            quiz_category,
            request.previous_questions.as_deref(),
            &mut *rng,
        )?
    };

    Ok(Json(match outcome {
        QuizOutcome::Question(question) => json!({
            "success": true,
            "question": question,
        }),
        QuizOutcome::Exhausted => json!({
            "success": true,
            "question": false,
            "message": "Maximum reached",
        }),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::AppState;
    use crate::infrastructure::MemoryStore;
    use crate::models::{Category, Question, QuestionBank};
    use crate::services::SelectionStrategy;
    use std::sync::Arc;

    fn state() -> SharedState {
        let bank = QuestionBank {
            categories: vec![
                Category {
                    id: 1,
                    kind: "Science".to_string(),
                },
                Category {
                    id: 5,
                    kind: "Entertainment".to_string(),
                },
            ],
            questions: (1..=6)
                .map(|id| Question {
                    id,
                    question: format!("Entertainment question {}", id),
                    answer: format!("Answer {}", id),
                    category: if id <= 2 { 1 } else { 5 },
                    difficulty: 3,
                })
                .collect(),
        };
        AppState::new(
            Arc::new(MemoryStore::from_bank(bank)),
            SelectionStrategy::Redraw,
            Some(11),
        )
        .shared()
    }

    fn page(raw: &str) -> Query<PageQuery> {
        Query(PageQuery {
            page: Some(raw.to_string()),
        })
    }

    #[tokio::test]
    async fn test_list_categories_keys_are_strings() {
        let Json(body) = list_categories(State(state())).await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["categories"]["1"], "Science");
        assert_eq!(body["categories"]["5"], "Entertainment");
    }

    #[tokio::test]
    async fn test_list_questions_invalid_page_defaults_to_first() {
        let Json(body) = list_questions(State(state()), page("abc")).await.unwrap();
        assert_eq!(body["questions"].as_array().unwrap().len(), 5);
        assert_eq!(body["questions"][0]["id"], 1);
        assert_eq!(body["total_questions"], 6);

        let Json(body) = list_questions(State(state()), page("2")).await.unwrap();
        assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_category_questions() {
        let Json(body) = list_category_questions(
            State(state()),
            Path("5".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(body["total_questions"], 4);
        assert_eq!(body["current_category"], 5);

        let err = list_category_questions(
            State(state()),
            Path("five".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_question_returns_created() {
        let state = state();
        let input = CreateQuestionInput {
            question: Some(
                "Which is the only team to play in every soccer World Cup tournament?".to_string(),
            ),
            answer: Some("Brazil".to_string()),
            category: Some(5),
            difficulty: Some(3),
        };
        let response = create_question(State(state.clone()), Ok(Json(input)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.catalog.get_question(7).unwrap().answer, "Brazil");
    }

    #[tokio::test]
    async fn test_create_question_missing_field_is_bad_request() {
        let input = CreateQuestionInput {
            question: Some("q".to_string()),
            ..Default::default()
        };
        let err = create_question(State(state()), Ok(Json(input)))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_question() {
        let state = state();
        let Json(body) = delete_question(State(state.clone()), Path("3".to_string()))
            .await
            .unwrap();
        assert_eq!(body, json!({ "success": true }));

        let err = delete_question(State(state), Path("3".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_defaults_to_empty_term() {
        let Json(body) = search_questions(State(state()), Ok(Json(SearchRequest::default())))
            .await
            .unwrap();
        assert_eq!(body["total_questions"], 0);

        let request = SearchRequest {
            search_term: Some("ENTERTAINMENT QUESTION 4".to_string()),
        };
        let Json(body) = search_questions(State(state()), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["questions"][0]["id"], 4);
    }

    #[tokio::test]
    async fn test_quiz_payloads() {
        let request: QuizRequest = serde_json::from_value(json!({
            "previous_questions": [],
            "quiz_category": { "type": "Science", "id": "1" }
        }))
        .unwrap();
        let Json(body) = next_quiz_question(State(state()), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(id == 1 || id == 2);
        assert!(body["question"].get("category").is_none());

        let request: QuizRequest = serde_json::from_value(json!({
            "previous_questions": [1, 2],
            "quiz_category": { "type": "Science", "id": 1 }
        }))
        .unwrap();
        let Json(body) = next_quiz_question(State(state()), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "question": false, "message": "Maximum reached" })
        );
    }

    #[tokio::test]
    async fn test_quiz_missing_fields_are_bad_request() {
        for payload in [
            json!({ "quiz_category": { "type": "click", "id": 0 } }),
            json!({ "previous_questions": [] }),
            json!({ "previous_questions": null, "quiz_category": { "id": 0 } }),
            json!({ "previous_questions": [], "quiz_category": { "type": "click" } }),
        ] {
            let request: QuizRequest = serde_json::from_value(payload).unwrap();
            let err = next_quiz_question(State(state()), Ok(Json(request)))
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_path_id_accepts_digits_only() {
        assert_eq!(path_id("23").unwrap(), 23);
        for raw in ["abc", "-3", "+3", "", " 4", "1.0", "99999999999999999999"] {
            let err = path_id(raw).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_unsupported_method_depends_on_id() {
        let response = unsupported_method(Path("5".to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let err = unsupported_method(Path("abc".to_string())).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
