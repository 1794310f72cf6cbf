// src/store/sqlite.rs

use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::quiz::{Question, Quiz};
use crate::models::submission::Submission;
use crate::store::EntityStore;

/// SQLite-backed entity store.
///
/// Each entity collection is a flat table of JSON blobs keyed by id;
/// the only extra columns are the ones the read contract filters or
/// orders by (quiz_id, position, submitted_at). All queries are bound
/// at runtime, so the crate builds without a live database.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn encode<T: serde::Serialize>(entity: &T) -> Result<String, AppError> {
        serde_json::to_string(entity).map_err(|e| AppError::InternalServerError(e.to_string()))
    }
}

/// Decodes persisted JSON blobs, skipping rows that no longer parse.
/// A corrupted row degrades the listing instead of crashing it.
fn decode_rows<T: DeserializeOwned>(kind: &str, rows: Vec<String>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|data| match serde_json::from_str(&data) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!("Skipping malformed {} row: {}", kind, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query_scalar::<_, String>("SELECT data FROM quizzes ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(decode_rows("quiz", rows))
    }

    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        let data = Self::encode(quiz)?;
        sqlx::query(
            "INSERT INTO quizzes (id, data) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        )
        .bind(&quiz.id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT data FROM questions WHERE quiz_id = ?1 ORDER BY position",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(decode_rows("question", rows))
    }

    async fn save_questions(&self, quiz_id: &str, questions: &[Question]) -> Result<(), AppError> {
        // Full replace of the quiz's set, atomically: either the new
        // question set is current or the old one still is.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM questions WHERE quiz_id = ?1")
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        for question in questions {
            let data = Self::encode(question)?;
            sqlx::query(
                "INSERT INTO questions (id, quiz_id, position, data) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&question.id)
            .bind(quiz_id)
            .bind(question.position)
            .bind(data)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_submissions(&self, quiz_id: &str) -> Result<Vec<Submission>, AppError> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT data FROM submissions WHERE quiz_id = ?1 ORDER BY submitted_at DESC",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(decode_rows("submission", rows))
    }

    async fn save_submission(&self, submission: &Submission) -> Result<(), AppError> {
        let data = Self::encode(submission)?;
        // Fixed-width fractional seconds keep the TEXT column ordering
        // chronological.
        let submitted_at = submission
            .submitted_at
            .to_rfc3339_opts(SecondsFormat::Micros, true);
        sqlx::query(
            "INSERT INTO submissions (id, quiz_id, submitted_at, data) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&submission.id)
        .bind(&submission.quiz_id)
        .bind(submitted_at)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?1")
            .bind(submission_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authoring;
    use chrono::{Duration, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory SQLite");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to migrate test database");
        SqliteStore::new(pool)
    }

    fn draft_with_questions(count: usize) -> authoring::EditorDraft {
        let mut draft = authoring::EditorDraft {
            quiz: authoring::new_quiz(),
            questions: vec![],
        };
        for _ in 0..count {
            draft = authoring::apply(draft, authoring::EditorAction::AddQuestion);
        }
        draft
    }

    fn submission(quiz_id: &str, total_score: i64, age: Duration) -> Submission {
        Submission {
            id: uuid::Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            total_score,
            submitted_at: Utc::now() - age,
            answers: vec![],
        }
    }

    #[tokio::test]
    async fn save_quiz_upserts_by_id() {
        let store = store().await;
        let mut quiz = authoring::new_quiz();

        store.save_quiz(&quiz).await.unwrap();
        quiz.title = "Renamed".to_string();
        store.save_quiz(&quiz).await.unwrap();

        let quizzes = store.list_quizzes().await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].title, "Renamed");
    }

    #[tokio::test]
    async fn save_questions_replaces_the_full_set() {
        let store = store().await;
        let draft = draft_with_questions(3);
        store.save_quiz(&draft.quiz).await.unwrap();
        store
            .save_questions(&draft.quiz.id, &draft.questions)
            .await
            .unwrap();

        let trimmed = &draft.questions[..1];
        store.save_questions(&draft.quiz.id, trimmed).await.unwrap();

        let questions = store.list_questions(&draft.quiz.id).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, draft.questions[0].id);
    }

    #[tokio::test]
    async fn submissions_come_back_newest_first() {
        let store = store().await;
        let old = submission("quiz", 4, Duration::hours(2));
        let recent = submission("quiz", 23, Duration::minutes(1));

        store.save_submission(&old).await.unwrap();
        store.save_submission(&recent).await.unwrap();

        let listed = store.list_submissions("quiz").await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![recent.id.as_str(), old.id.as_str()]);
    }

    #[tokio::test]
    async fn delete_submission_reports_absence() {
        let store = store().await;
        let sub = submission("quiz", 14, Duration::zero());
        store.save_submission(&sub).await.unwrap();

        assert!(store.delete_submission(&sub.id).await.unwrap());
        assert!(!store.delete_submission(&sub.id).await.unwrap());
        assert!(store.list_submissions("quiz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clone_quiz_copies_content_without_submissions() {
        let store = store().await;
        let draft = draft_with_questions(2);
        store.save_quiz(&draft.quiz).await.unwrap();
        store
            .save_questions(&draft.quiz.id, &draft.questions)
            .await
            .unwrap();
        store
            .save_submission(&submission(&draft.quiz.id, 6, Duration::zero()))
            .await
            .unwrap();

        let copy = store.clone_quiz(&draft.quiz.id).await.unwrap().unwrap();

        assert_ne!(copy.id, draft.quiz.id);
        let copied_questions = store.list_questions(&copy.id).await.unwrap();
        assert_eq!(copied_questions.len(), 2);
        assert!(store.list_submissions(&copy.id).await.unwrap().is_empty());

        assert!(store.clone_quiz("no-such-quiz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped_not_fatal() {
        let store = store().await;
        let quiz = authoring::new_quiz();
        store.save_quiz(&quiz).await.unwrap();

        sqlx::query("INSERT INTO quizzes (id, data) VALUES ('broken', 'not json')")
            .execute(&store.pool)
            .await
            .unwrap();

        let quizzes = store.list_quizzes().await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, quiz.id);
    }
}
