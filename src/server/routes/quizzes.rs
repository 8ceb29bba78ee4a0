use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::Question,
    server::{app::AppState, deserializers::deserialize_lenient_i64},
    service::{QuizCategory, TriviaService},
};

use super::{rejected, service_failure, ApiError, ApiResponse};

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategoryRef>,
}

#[derive(Deserialize)]
struct QuizCategoryRef {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    id: i64,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(service): State<TriviaService>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizBody> {
    let Json(request) = body.map_err(rejected(ApiError::BadRequest))?;
    let Some(previous) = request.previous_questions else {
        tracing::warn!("quiz request without previous_questions");
        return Err(ApiError::Unprocessable);
    };
    let Some(category) = request.quiz_category else {
        tracing::warn!("quiz request without quiz_category");
        return Err(ApiError::Unprocessable);
    };
    let question = service
        .next_quiz_question(&previous, QuizCategory::from(category.id))
        .await
        .map_err(service_failure(ApiError::Unprocessable))?;
    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
