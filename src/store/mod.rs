// src/store/mod.rs

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::authoring;
use crate::error::AppError;
use crate::models::quiz::{Question, Quiz};
use crate::models::submission::Submission;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Durable persistence of the three entity collections. Pure CRUD; no
/// business rules live here.
///
/// The store is an injected capability: handlers receive it through
/// `AppState`, never as ambient global state, so tests can substitute
/// [`MemoryStore`] for the SQLite-backed implementation.
///
/// There is deliberately no transaction isolation across calls: the
/// contract is read-modify-write with last-write-wins, acceptable for a
/// single-operator tool. Quiz deletion is not part of the contract.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All quizzes, in creation order.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError>;

    /// Upserts a quiz by id.
    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), AppError>;

    /// The quiz's question set, ordered by position.
    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<Question>, AppError>;

    /// Replaces the quiz's entire question set.
    async fn save_questions(&self, quiz_id: &str, questions: &[Question]) -> Result<(), AppError>;

    /// The quiz's submissions, newest-first.
    async fn list_submissions(&self, quiz_id: &str) -> Result<Vec<Submission>, AppError>;

    /// Appends a submission. Submissions are immutable once written.
    async fn save_submission(&self, submission: &Submission) -> Result<(), AppError>;

    /// Removes a submission by id. Returns false when no such
    /// submission exists.
    async fn delete_submission(&self, submission_id: &str) -> Result<bool, AppError>;

    /// Deep-copies a quiz and its question set under regenerated
    /// identities. Returns `None` when the source quiz does not exist.
    /// Submissions are never carried over.
    async fn clone_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, AppError> {
        let Some(source) = self
            .list_quizzes()
            .await?
            .into_iter()
            .find(|quiz| quiz.id == quiz_id)
        else {
            return Ok(None);
        };

        let questions = self.list_questions(quiz_id).await?;
        let (copy, copied_questions) = authoring::clone_quiz(&source, &questions);

        self.save_quiz(&copy).await?;
        self.save_questions(&copy.id, &copied_questions).await?;
        Ok(Some(copy))
    }
}
