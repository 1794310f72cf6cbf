// src/store/memory.rs

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::quiz::{Question, Quiz};
use crate::models::submission::Submission;
use crate::store::EntityStore;

/// In-memory entity store with the same contract as [`super::SqliteStore`].
/// Used as the substitutable fake in unit tests; nothing survives the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    submissions: Vec<Submission>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.read().quizzes.clone())
    }

    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        let mut inner = self.write();
        match inner.quizzes.iter_mut().find(|q| q.id == quiz.id) {
            Some(existing) => *existing = quiz.clone(),
            None => inner.quizzes.push(quiz.clone()),
        }
        Ok(())
    }

    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<Question>, AppError> {
        let mut questions: Vec<Question> = self
            .read()
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.position);
        Ok(questions)
    }

    async fn save_questions(&self, quiz_id: &str, questions: &[Question]) -> Result<(), AppError> {
        let mut inner = self.write();
        inner.questions.retain(|q| q.quiz_id != quiz_id);
        inner.questions.extend_from_slice(questions);
        Ok(())
    }

    async fn list_submissions(&self, quiz_id: &str) -> Result<Vec<Submission>, AppError> {
        let mut submissions: Vec<Submission> = self
            .read()
            .submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id)
            .cloned()
            .collect();
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }

    async fn save_submission(&self, submission: &Submission) -> Result<(), AppError> {
        self.write().submissions.push(submission.clone());
        Ok(())
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<bool, AppError> {
        let mut inner = self.write();
        let before = inner.submissions.len();
        inner.submissions.retain(|s| s.id != submission_id);
        Ok(inner.submissions.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authoring;
    use chrono::{Duration, Utc};

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
    async fn questions_are_ordered_by_position() {
        let store = MemoryStore::new();
        let mut draft = authoring::EditorDraft {
            quiz: authoring::new_quiz(),
            questions: vec![],
        };
        for _ in 0..3 {
            draft = authoring::apply(draft, authoring::EditorAction::AddQuestion);
        }
        // Store them shuffled; the read contract sorts.
        let mut shuffled = draft.questions.clone();
        shuffled.rotate_left(1);
        store.save_questions(&draft.quiz.id, &shuffled).await.unwrap();

        let listed = store.list_questions(&draft.quiz.id).await.unwrap();
        let positions: Vec<i64> = listed.iter().map(|q| q.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn ledger_is_newest_first_and_deletion_is_point_wise() {
        let store = MemoryStore::new();
        let old = submission("quiz", 4, Duration::hours(3));
        let recent = submission("quiz", 14, Duration::minutes(5));
        store.save_submission(&old).await.unwrap();
        store.save_submission(&recent).await.unwrap();

        let listed = store.list_submissions("quiz").await.unwrap();
        assert_eq!(listed[0].id, recent.id);

        assert!(store.delete_submission(&old.id).await.unwrap());
        let listed = store.list_submissions("quiz").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, recent.id);
    }

    #[tokio::test]
    async fn clone_quiz_regenerates_ids_via_the_shared_path() {
        let store = MemoryStore::new();
        let mut draft = authoring::EditorDraft {
            quiz: authoring::new_quiz(),
            questions: vec![],
        };
        draft = authoring::apply(draft, authoring::EditorAction::AddQuestion);
        store.save_quiz(&draft.quiz).await.unwrap();
        store.save_questions(&draft.quiz.id, &draft.questions).await.unwrap();

        let copy = store.clone_quiz(&draft.quiz.id).await.unwrap().unwrap();
        let copied = store.list_questions(&copy.id).await.unwrap();

        assert_eq!(copied.len(), 1);
        assert_ne!(copied[0].id, draft.questions[0].id);
        assert_eq!(copied[0].text, draft.questions[0].text);
    }
}
