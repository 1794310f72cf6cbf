// src/stats.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::quiz::Question;
use crate::models::submission::Submission;

/// One non-empty decile bucket of the score histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBucket {
    /// Label of the form "{lower}-{lower+10}".
    pub range: String,
    pub count: u64,
}

/// Response count for one option of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCount {
    pub text: String,
    pub count: u64,
}

/// Per-question tally of how often each option was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBreakdown {
    pub question_text: String,
    pub options: Vec<OptionCount>,
}

/// Dashboard-ready statistics over one quiz's submissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_submissions: u64,
    /// Arithmetic mean of the total scores. `None` (JSON null) when
    /// there are no submissions; never 0 or NaN.
    pub average_score: Option<f64>,
    pub score_distribution: Vec<ScoreBucket>,
    pub question_stats: Vec<QuestionBreakdown>,
}

/// Derives dashboard statistics from `(questions, submissions)`.
///
/// Never mutates its inputs and is idempotent: the same submission
/// collection yields identical statistics regardless of input order.
pub fn dashboard_stats(questions: &[Question], submissions: &[Submission]) -> DashboardStats {
    DashboardStats {
        total_submissions: submissions.len() as u64,
        average_score: average_score(submissions),
        score_distribution: score_distribution(submissions),
        question_stats: question_stats(questions, submissions),
    }
}

fn average_score(submissions: &[Submission]) -> Option<f64> {
    if submissions.is_empty() {
        return None;
    }
    let sum: i64 = submissions.iter().map(|s| s.total_score).sum();
    Some(sum as f64 / submissions.len() as f64)
}

/// Buckets submissions into decile ranges `[floor(score/10)*10, +10)`.
///
/// The histogram is sparse: buckets with zero submissions are omitted.
/// Euclidean flooring keeps negative totals in their own buckets
/// (e.g. a score of -4 lands in "-10-0").
fn score_distribution(submissions: &[Submission]) -> Vec<ScoreBucket> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for submission in submissions {
        let lower = submission.total_score.div_euclid(10) * 10;
        *buckets.entry(lower).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(lower, count)| ScoreBucket {
            range: format!("{}-{}", lower, lower + 10),
            count,
        })
        .collect()
}

/// Counts, per question and option, the submissions whose answer for
/// that question contains the option. A multi-select submission can
/// increment several options of the same question.
fn question_stats(questions: &[Question], submissions: &[Submission]) -> Vec<QuestionBreakdown> {
    questions
        .iter()
        .map(|question| QuestionBreakdown {
            question_text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|opt| OptionCount {
                    text: opt.text.clone(),
                    count: submissions
                        .iter()
                        .filter(|submission| {
                            submission
                                .answers
                                .iter()
                                .find(|a| a.question_id == question.id)
                                .is_some_and(|a| a.option_ids.contains(&opt.id))
                        })
                        .count() as u64,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::{AnswerOption, QuestionType};
    use crate::models::submission::Answer;
    use chrono::Utc;

    fn submission(id: &str, total_score: i64, answers: Vec<Answer>) -> Submission {
        Submission {
            id: id.to_string(),
            quiz_id: "quiz".to_string(),
            total_score,
            submitted_at: Utc::now(),
            answers,
        }
    }

    fn demo_question() -> Question {
        Question {
            id: "q1".to_string(),
            quiz_id: "quiz".to_string(),
            text: "Do you use generative AI for legal research?".to_string(),
            question_type: QuestionType::Multi,
            position: 1,
            options: vec![
                AnswerOption {
                    id: "o1".to_string(),
                    text: "No, banned by policy".to_string(),
                    score: 0,
                },
                AnswerOption {
                    id: "o2".to_string(),
                    text: "Yes, with standard tools".to_string(),
                    score: 4,
                },
            ],
        }
    }

    #[test]
    fn distribution_buckets_are_sparse_and_sorted() {
        let submissions = vec![
            submission("s1", 4, vec![]),
            submission("s2", 14, vec![]),
            submission("s3", 23, vec![]),
        ];
        let stats = dashboard_stats(&[], &submissions);
        assert_eq!(
            stats.score_distribution,
            vec![
                ScoreBucket { range: "0-10".to_string(), count: 1 },
                ScoreBucket { range: "10-20".to_string(), count: 1 },
                ScoreBucket { range: "20-30".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn negative_totals_land_in_negative_buckets() {
        let submissions = vec![submission("s1", -4, vec![])];
        let stats = dashboard_stats(&[], &submissions);
        assert_eq!(
            stats.score_distribution,
            vec![ScoreBucket { range: "-10-0".to_string(), count: 1 }]
        );
    }

    #[test]
    fn average_is_absent_without_submissions() {
        let stats = dashboard_stats(&[], &[]);
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.average_score, None);
        assert!(stats.score_distribution.is_empty());
    }

    #[test]
    fn average_is_the_arithmetic_mean() {
        let submissions = vec![submission("s1", 4, vec![]), submission("s2", 14, vec![])];
        let stats = dashboard_stats(&[], &submissions);
        assert_eq!(stats.average_score, Some(9.0));
    }

    #[test]
    fn multi_select_increments_every_selected_option() {
        let question = demo_question();
        let submissions = vec![
            submission(
                "s1",
                4,
                vec![Answer {
                    question_id: "q1".to_string(),
                    option_ids: vec!["o1".to_string(), "o2".to_string()],
                }],
            ),
            submission(
                "s2",
                4,
                vec![Answer {
                    question_id: "q1".to_string(),
                    option_ids: vec!["o2".to_string()],
                }],
            ),
        ];
        let stats = dashboard_stats(std::slice::from_ref(&question), &submissions);
        assert_eq!(stats.question_stats.len(), 1);
        let counts: Vec<u64> = stats.question_stats[0].options.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let question = demo_question();
        let mut submissions = vec![
            submission(
                "s1",
                23,
                vec![Answer {
                    question_id: "q1".to_string(),
                    option_ids: vec!["o2".to_string()],
                }],
            ),
            submission("s2", 4, vec![]),
            submission("s3", 14, vec![]),
        ];
        let forward = dashboard_stats(std::slice::from_ref(&question), &submissions);
        submissions.reverse();
        let backward = dashboard_stats(std::slice::from_ref(&question), &submissions);

        assert_eq!(forward.average_score, backward.average_score);
        assert_eq!(forward.score_distribution, backward.score_distribution);
        assert_eq!(forward.question_stats, backward.question_stats);
    }

    #[test]
    fn deleting_a_submission_inverts_its_contribution() {
        let question = demo_question();
        let with_all = vec![
            submission(
                "s1",
                4,
                vec![Answer {
                    question_id: "q1".to_string(),
                    option_ids: vec!["o2".to_string()],
                }],
            ),
            submission("s2", 14, vec![]),
        ];
        let after_delete: Vec<Submission> =
            with_all.iter().filter(|s| s.id != "s1").cloned().collect();

        let stats = dashboard_stats(std::slice::from_ref(&question), &after_delete);
        assert_eq!(stats.total_submissions, 1);
        assert_eq!(stats.average_score, Some(14.0));
        assert_eq!(
            stats.score_distribution,
            vec![ScoreBucket { range: "10-20".to_string(), count: 1 }]
        );
        assert_eq!(stats.question_stats[0].options[1].count, 0);
    }
}
