//! Request-level rules of the trivia API, independent of HTTP.
//!
//! [`TriviaService`] is built once at startup with the pool and the page size
//! and then cloned into every handler.

use std::collections::{BTreeMap, HashSet};

use rand::seq::IndexedRandom;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::queries::{categories, questions};
use crate::db::{Category, NewQuestion, Question, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Category selector for quiz play. `All` matches every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(i64),
}

impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        if id == 0 {
            QuizCategory::All
        } else {
            QuizCategory::Only(id)
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: BTreeMap<i64, String>,
    /// Display-only: a random category name, unrelated to the page content.
    pub current_category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    /// Category of one randomly picked result.
    pub current_category: Option<i64>,
}

#[derive(Clone)]
pub struct TriviaService {
    pool: SqlitePool,
    questions_per_page: i64,
}

impl TriviaService {
    pub fn new(pool: SqlitePool, questions_per_page: i64) -> Self {
        Self {
            pool,
            questions_per_page: questions_per_page.max(1),
        }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    /// Page numbers start at 1. An empty page, including any page past the
    /// end, is `NotFound`.
    pub async fn question_page(&self, page: i64) -> ServiceResult<QuestionPage> {
        if page < 1 {
            return Err(ServiceError::NotFound(format!("page {page}")));
        }
        let offset = (page - 1).saturating_mul(self.questions_per_page);
        let page_questions =
            questions::get_questions_page(&self.pool, self.questions_per_page, offset).await?;
        if page_questions.is_empty() {
            return Err(ServiceError::NotFound(format!("page {page}")));
        }
        let total_questions = questions::count_questions(&self.pool).await?;
        let all_categories = categories::get_all_categories(&self.pool).await?;
        let current_category = all_categories
            .choose(&mut rand::rng())
            .map(|c| c.kind.clone());

        Ok(QuestionPage {
            questions: page_questions,
            total_questions,
            categories: all_categories.into_iter().map(|c| (c.id, c.kind)).collect(),
            current_category,
        })
    }

    pub async fn question(&self, id: i64) -> ServiceResult<Question> {
        questions::get_question(&self.pool, id)
            .await
            .map_err(|err| not_found_or(err, format!("question {id}")))
    }

    pub async fn delete_question(&self, id: i64) -> ServiceResult<i64> {
        match questions::delete_question(&self.pool, id).await? {
            0 => Err(ServiceError::NotFound(format!("question {id}"))),
            _ => Ok(id),
        }
    }

    pub async fn create_question(&self, new: NewQuestion) -> ServiceResult<Question> {
        if new.question.trim().is_empty() {
            return Err(ServiceError::Invalid("question must not be blank".to_owned()));
        }
        if new.answer.trim().is_empty() {
            return Err(ServiceError::Invalid("answer must not be blank".to_owned()));
        }
        let id = questions::create_question(&self.pool, &new).await?;
        tracing::info!(id, category = new.category, "question created");
        self.question(id).await
    }

    pub async fn search(&self, term: &str) -> ServiceResult<SearchResults> {
        let found = questions::search_questions(&self.pool, term).await?;
        let current_category = found.choose(&mut rand::rng()).map(|q| q.category);
        Ok(SearchResults {
            questions: found,
            current_category,
        })
    }

    /// An unknown category simply has no questions.
    pub async fn questions_in_category(&self, category: i64) -> ServiceResult<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    /// Picks uniformly among questions in `category` whose id is not in
    /// `previous`. `None` once every such question has been asked.
    pub async fn next_quiz_question(
        &self,
        previous: &[i64],
        category: QuizCategory,
    ) -> ServiceResult<Option<Question>> {
        let candidates = match category {
            QuizCategory::All => questions::get_all_questions(&self.pool).await?,
            QuizCategory::Only(id) => {
                questions::get_questions_for_category(&self.pool, id).await?
            }
        };
        let asked: HashSet<i64> = previous.iter().copied().collect();
        let eligible: Vec<Question> = candidates
            .into_iter()
            .filter(|q| !asked.contains(&q.id))
            .collect();
        tracing::debug!(eligible = eligible.len(), ?category, "quiz candidates");
        let picked = eligible.choose(&mut rand::rng()).cloned();
        Ok(picked)
    }
}

fn not_found_or(err: StoreError, what: String) -> ServiceError {
    match err {
        StoreError::NotFound => ServiceError::NotFound(what),
        other => ServiceError::Store(other),
    }
}
