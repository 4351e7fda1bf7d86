//! Quiz widget state: answers, outcome, the persisted completion flag and
//! the claim/retake actions. Rendering lives in [`super::render`].

use crate::constants::{explorer_tx_url, COMPLETION_FLAG_KEY, COMPLETION_FLAG_VALUE};

use super::client::{ClientError, PayoutClient};
use super::store::CompletionStore;
use super::{evaluate, AnswerSet, Question, QuizError, QuizOutcome};

/// When the completion flag is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Play-then-claim: only a winning submission marks the quiz as taken.
    #[default]
    OnWin,
    /// Pay-then-play: any submission uses up the paid attempt.
    OnAnySubmission,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetOptions {
    pub completion_policy: CompletionPolicy,
    /// Require a reported payment before the questions are shown.
    pub payment_gate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Win {
        tx_hash: Option<&'a str>,
        explorer_url: Option<String>,
        claiming: bool,
    },
    Lose,
    AlreadyCompleted,
    PaymentRequired,
    Questions {
        questions: &'a [Question],
        answers: &'a AnswerSet,
    },
}

/// Proof that a claim was started. Stale after a retake.
#[must_use]
#[derive(Debug)]
pub struct ClaimTicket {
    to_address: String,
    attempt: u64,
}

impl ClaimTicket {
    pub fn to_address(&self) -> &str {
        &self.to_address
    }
}

pub struct QuizWidget<S: CompletionStore> {
    questions: Vec<Question>,
    store: S,
    options: WidgetOptions,
    answers: AnswerSet,
    outcome: QuizOutcome,
    tx_hash: Option<String>,
    claiming: bool,
    paid: bool,
    notice: Option<String>,
    attempt: u64,
}

impl<S: CompletionStore> QuizWidget<S> {
    pub fn new(questions: Vec<Question>, store: S, options: WidgetOptions) -> Self {
        Self {
            questions,
            store,
            options,
            answers: AnswerSet::new(),
            outcome: QuizOutcome::Pending,
            tx_hash: None,
            claiming: false,
            paid: false,
            notice: None,
            attempt: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn outcome(&self) -> QuizOutcome {
        self.outcome
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    pub fn is_claiming(&self) -> bool {
        self.claiming
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_completed(&self) -> bool {
        self.store.get(COMPLETION_FLAG_KEY).as_deref() == Some(COMPLETION_FLAG_VALUE)
    }

    /// Pending user-facing message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn view(&self) -> View<'_> {
        match self.outcome {
            QuizOutcome::Win => View::Win {
                tx_hash: self.tx_hash.as_deref(),
                explorer_url: self.tx_hash.as_deref().map(explorer_tx_url),
                claiming: self.claiming,
            },
            QuizOutcome::Lose => View::Lose,
            QuizOutcome::Pending if self.has_completed() => View::AlreadyCompleted,
            QuizOutcome::Pending if self.options.payment_gate && !self.paid => {
                View::PaymentRequired
            }
            QuizOutcome::Pending => View::Questions {
                questions: &self.questions,
                answers: &self.answers,
            },
        }
    }

    /// Callback from the payment integration.
    pub fn record_payment(&mut self) {
        if !self.paid {
            tracing::info!("Quiz payment recorded");
        }
        self.paid = true;
    }

    fn ensure_questions_open(&self) -> Result<(), QuizError> {
        match self.view() {
            View::Questions { .. } => Ok(()),
            View::PaymentRequired => Err(QuizError::PaymentRequired),
            _ => Err(QuizError::QuizClosed),
        }
    }

    /// Selects `key` for question `index`, replacing any earlier choice.
    pub fn select_option(&mut self, index: usize, key: &str) -> Result<(), QuizError> {
        self.ensure_questions_open()?;
        let question = self
            .questions
            .get(index)
            .ok_or(QuizError::UnknownQuestion(index))?;
        if !question.has_option(key) {
            return Err(QuizError::UnknownOption {
                index,
                key: key.to_string(),
            });
        }
        self.answers.insert(index, key.to_string());
        Ok(())
    }

    pub fn submit(&mut self) -> Result<QuizOutcome, QuizError> {
        self.ensure_questions_open()?;
        let outcome = evaluate(&self.questions, &self.answers);

        // Persist first so a failed write leaves the quiz open.
        let persist = match self.options.completion_policy {
            CompletionPolicy::OnWin => outcome == QuizOutcome::Win,
            CompletionPolicy::OnAnySubmission => true,
        };
        if persist {
            self.store.set(COMPLETION_FLAG_KEY, COMPLETION_FLAG_VALUE)?;
        }

        self.outcome = outcome;
        tracing::debug!("Quiz submitted: {:?}", outcome);
        Ok(outcome)
    }

    /// Starts a claim for `address`. Only one claim may be in flight.
    pub fn begin_claim(&mut self, address: Option<&str>) -> Result<ClaimTicket, QuizError> {
        if self.outcome != QuizOutcome::Win {
            return Err(QuizError::ClaimUnavailable);
        }
        if self.claiming {
            return Err(QuizError::ClaimInFlight);
        }
        let address = address.map(str::trim).filter(|a| !a.is_empty());
        let Some(address) = address else {
            let err = QuizError::WalletNotConnected;
            self.notice = Some(err.to_string());
            return Err(err);
        };

        self.claiming = true;
        self.notice = None;
        Ok(ClaimTicket {
            to_address: address.to_string(),
            attempt: self.attempt,
        })
    }

    /// Applies the endpoint's answer. Failures leave the win view in place.
    pub fn finish_claim(&mut self, ticket: ClaimTicket, result: Result<String, ClientError>) {
        if ticket.attempt != self.attempt {
            tracing::warn!("Ignoring payout result for a retaken quiz");
            return;
        }
        self.claiming = false;
        match result {
            Ok(tx_hash) => {
                tracing::info!("Payout received: {}", tx_hash);
                self.tx_hash = Some(tx_hash);
            }
            Err(err @ ClientError::Rejected { .. }) => {
                tracing::warn!("Payout rejected: {}", err);
                self.notice = Some(err.to_string());
            }
            Err(err) => {
                tracing::warn!("Payout request failed: {}", err);
                self.notice = Some(format!("Payout error: {}", err));
            }
        }
    }

    /// Claims the reward through `client`. Returns the transaction hash, or
    /// `None` when the request failed and a notice was recorded.
    pub async fn claim<C>(
        &mut self,
        client: &C,
        address: Option<&str>,
    ) -> Result<Option<String>, QuizError>
    where
        C: PayoutClient + ?Sized,
    {
        let ticket = self.begin_claim(address)?;
        let result = client.request_payout(ticket.to_address()).await;
        let tx_hash = result.as_ref().ok().cloned();
        self.finish_claim(ticket, result);
        Ok(tx_hash)
    }

    /// Resets to a fresh, unanswered quiz.
    pub fn retake(&mut self) -> Result<(), QuizError> {
        self.store.remove(COMPLETION_FLAG_KEY)?;
        self.answers.clear();
        self.outcome = QuizOutcome::Pending;
        self.tx_hash = None;
        self.claiming = false;
        self.notice = None;
        self.paid = false;
        self.attempt += 1;
        Ok(())
    }
}
