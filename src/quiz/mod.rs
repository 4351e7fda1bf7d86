pub mod client;
pub mod questions;
pub mod render;
pub mod store;
pub mod widget;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub use client::{ClientError, HttpPayoutClient, PayoutClient};
pub use store::{CompletionStore, FileStore, MemoryStore, StoreError};
pub use widget::{ClaimTicket, CompletionPolicy, QuizWidget, View, WidgetOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_key: String,
}

impl Question {
    pub fn new(prompt: &str, options: &[(&str, &str)], correct_option_key: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options
                .iter()
                .map(|(key, label)| AnswerOption::new(key, label))
                .collect(),
            correct_option_key: correct_option_key.to_string(),
        }
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|option| option.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Selected option key per question index.
pub type AnswerSet = BTreeMap<usize, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizOutcome {
    #[default]
    Pending,
    Win,
    Lose,
}

/// Win iff every question has its correct key selected. Unanswered counts as wrong.
pub fn evaluate(questions: &[Question], answers: &AnswerSet) -> QuizOutcome {
    let all_correct = questions
        .iter()
        .enumerate()
        .all(|(i, q)| answers.get(&i) == Some(&q.correct_option_key));
    if all_correct {
        QuizOutcome::Win
    } else {
        QuizOutcome::Lose
    }
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("No question at index {0}")]
    UnknownQuestion(usize),

    #[error("Question {index} has no option '{key}'")]
    UnknownOption { index: usize, key: String },

    #[error("Payment is required before taking the quiz")]
    PaymentRequired,

    #[error("Answers can only be changed while the quiz is open")]
    QuizClosed,

    #[error("A payout can only be claimed after passing the quiz")]
    ClaimUnavailable,

    #[error("A payout claim is already in progress")]
    ClaimInFlight,

    #[error("Wallet address not found. Please connect your wallet to claim.")]
    WalletNotConnected,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(usize, &str)]) -> AnswerSet {
        pairs.iter().map(|(i, k)| (*i, k.to_string())).collect()
    }

    #[test]
    fn all_correct_answers_win() {
        let questions = questions::default_questions();
        let set = answers(&[(0, "c"), (1, "b"), (2, "b")]);
        assert_eq!(evaluate(&questions, &set), QuizOutcome::Win);
    }

    #[test]
    fn any_wrong_answer_loses() {
        let questions = questions::default_questions();
        let set = answers(&[(0, "c"), (1, "a"), (2, "b")]);
        assert_eq!(evaluate(&questions, &set), QuizOutcome::Lose);
    }

    #[test]
    fn unanswered_question_loses() {
        let questions = questions::default_questions();
        let set = answers(&[(0, "c"), (2, "b")]);
        assert_eq!(evaluate(&questions, &set), QuizOutcome::Lose);
    }

    #[test]
    fn every_single_wrong_position_loses() {
        let questions = questions::default_questions();
        for wrong in 0..questions.len() {
            let set: AnswerSet = questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let key = if i == wrong {
                        q.options
                            .iter()
                            .find(|o| o.key != q.correct_option_key)
                            .map(|o| o.key.clone())
                            .unwrap()
                    } else {
                        q.correct_option_key.clone()
                    };
                    (i, key)
                })
                .collect();
            assert_eq!(evaluate(&questions, &set), QuizOutcome::Lose);
        }
    }
}
