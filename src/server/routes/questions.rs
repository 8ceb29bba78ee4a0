use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{NewQuestion, Question},
    server::app::AppState,
    service::TriviaService,
};

use super::{rejected, service_failure, ApiError, ApiResponse};

const NO_CATEGORY: &str = "category does not exist";

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    search_term: String,
}

#[derive(Serialize)]
struct QuestionPageBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
    #[serde(rename = "currentCategory")]
    current_category: Option<String>,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    quiz_id: i64,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
#[serde(untagged)]
enum SearchCategory {
    Id(i64),
    Missing(&'static str),
}

#[derive(Serialize)]
struct SearchBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: SearchCategory,
}

async fn get_questions(
    State(service): State<TriviaService>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionPageBody> {
    let Query(PageQuery { page }) = query.map_err(rejected(ApiError::BadRequest))?;
    let page = service
        .question_page(page.unwrap_or(1))
        .await
        .map_err(service_failure(ApiError::NotFound))?;
    Ok(Json(QuestionPageBody {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        categories: page.categories,
        current_category: page.current_category,
    }))
}

async fn delete_question(
    State(service): State<TriviaService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<DeletedBody> {
    let Path(id) = id.map_err(rejected(ApiError::NotFound))?;
    let quiz_id = service
        .delete_question(id)
        .await
        .map_err(service_failure(ApiError::NotFound))?;
    tracing::info!(id = quiz_id, "question deleted");
    Ok(Json(DeletedBody {
        success: true,
        quiz_id,
    }))
}

async fn create_question(
    State(service): State<TriviaService>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<CreatedBody> {
    let Json(new_question) = body.map_err(rejected(ApiError::BadRequest))?;
    let question = service
        .create_question(new_question)
        .await
        .map_err(service_failure(ApiError::NotFound))?;
    Ok(Json(CreatedBody {
        success: true,
        question,
    }))
}

async fn search_questions(
    State(service): State<TriviaService>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResponse<SearchBody> {
    let Json(SearchRequest { search_term }) = body.map_err(rejected(ApiError::BadRequest))?;
    let results = service
        .search(&search_term)
        .await
        .map_err(service_failure(ApiError::Unprocessable))?;
    Ok(Json(SearchBody {
        success: true,
        total_questions: results.questions.len(),
        questions: results.questions,
        current_category: results
            .current_category
            .map_or(SearchCategory::Missing(NO_CATEGORY), SearchCategory::Id),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/question/{id}", delete(delete_question))
        .with_state(state)
}
