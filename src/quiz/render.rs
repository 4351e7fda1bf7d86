use std::fmt;

use crate::constants::{payout_amount, PAYOUT_TOKEN_SYMBOL};

use super::questions::QUIZ_TITLE;
use super::widget::View;

/// Control offered on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub enabled: bool,
}

impl Action {
    fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub lines: Vec<String>,
    pub actions: Vec<Action>,
}

/// Builds the card for `view`. `wallet` is the connected address, if any.
pub fn render(view: &View<'_>, wallet: Option<&str>) -> Card {
    let wallet_connected = wallet.is_some_and(|w| !w.trim().is_empty());
    match view {
        View::Win {
            tx_hash,
            explorer_url,
            claiming,
        } => {
            let mut lines = Vec::new();
            if !wallet_connected {
                lines.push("Connect wallet to claim".to_string());
            }
            if let (Some(_), Some(url)) = (tx_hash, explorer_url) {
                lines.push(format!("Payout sent: View on block explorer <{}>", url));
            }
            let claim_label = if *claiming {
                "Processing...".to_string()
            } else {
                format!("Claim ${} {}", payout_amount(), PAYOUT_TOKEN_SYMBOL)
            };
            Card {
                title: "Congratulations! You Passed!".to_string(),
                description:
                    "You answered all questions correctly! Click below to receive your payout."
                        .to_string(),
                lines,
                actions: vec![
                    Action::new(claim_label, !*claiming && wallet_connected),
                    Action::new("Retake Quiz", true),
                ],
            }
        }
        View::Lose => Card {
            title: "Oops! You Failed.".to_string(),
            description: "Sorry, some of your answers were incorrect. Please try again."
                .to_string(),
            lines: Vec::new(),
            actions: vec![Action::new("Try Again", true)],
        },
        View::AlreadyCompleted => Card {
            title: "Quiz Already Completed".to_string(),
            description: "You have already completed the quiz in a previous session.".to_string(),
            lines: Vec::new(),
            actions: vec![Action::new("Retake Quiz", true)],
        },
        View::PaymentRequired => Card {
            title: QUIZ_TITLE.to_string(),
            description: "Complete the entry payment to unlock the quiz.".to_string(),
            lines: Vec::new(),
            actions: vec![Action::new("Pay to Play", true)],
        },
        View::Questions { questions, answers } => {
            let mut lines = Vec::new();
            for (i, question) in questions.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, question.prompt));
                for option in &question.options {
                    let marker = if answers.get(&i) == Some(&option.key) {
                        "(x)"
                    } else {
                        "( )"
                    };
                    lines.push(format!("   {} {}. {}", marker, option.key, option.label));
                }
            }
            Card {
                title: QUIZ_TITLE.to_string(),
                description: "Answer the following questions:".to_string(),
                lines,
                actions: vec![Action::new("Submit Answers", true)],
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "{}", self.description)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        let actions: Vec<String> = self
            .actions
            .iter()
            .map(|a| {
                if a.enabled {
                    format!("[{}]", a.label)
                } else {
                    format!("[{} (disabled)]", a.label)
                }
            })
            .collect();
        write!(f, "{}", actions.join(" "))
    }
}
