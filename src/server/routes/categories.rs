use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    db::{Category, Question},
    server::app::AppState,
    service::TriviaService,
};

use super::{rejected, service_failure, ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    body: Vec<Category>,
    total_question: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(service): State<TriviaService>) -> ApiResponse<CategoriesBody> {
    let categories = service
        .categories()
        .await
        .map_err(service_failure(ApiError::Internal))?;
    Ok(Json(CategoriesBody {
        success: true,
        total_question: categories.len(),
        body: categories,
    }))
}

async fn get_category_questions(
    State(service): State<TriviaService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<CategoryQuestionsBody> {
    let Path(id) = id.map_err(rejected(ApiError::NotFound))?;
    let questions = service
        .questions_in_category(id)
        .await
        .map_err(service_failure(ApiError::NotFound))?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
