//! The quiz session state machine.
//!
//! ```text
//! Start --start--> Ongoing(0) --next--> Ongoing(1) ... --next--> Finished
//!   ^                  <--prev--                                    |
//!   +-----------------------------restart---------------------------+
//! ```
//!
//! Per-question UI state (the highlighted option and whether `next` is
//! enabled) lives inside the `Ongoing` variant and is rebuilt on every index
//! change, so returning to an answered question starts with no selection.
//! The answer ledger itself keeps every recorded answer.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{AnswerOption, AnswerRecord, QuestionRecord};

/// Recorded answers keyed by question id. At most one entry per question.
pub type AnswerLedger = BTreeMap<usize, AnswerRecord>;

/// Selection state of the question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QuestionTurn {
    /// Option picked during this visit, if any.
    pub selected: Option<usize>,
}

/// Where the session is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuizState {
    Start,
    Ongoing {
        index: usize,
        turn: QuestionTurn,
    },
    Finished {
        /// Whether this run's result notification has been dispatched.
        notified: bool,
    },
}

impl QuizState {
    pub fn name(&self) -> &'static str {
        match self {
            QuizState::Start => "start",
            QuizState::Ongoing { .. } => "ongoing",
            QuizState::Finished { .. } => "finished",
        }
    }
}

/// What `next` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved to the question at this index.
    Advanced(usize),
    /// The last question was answered; the session is now finished.
    Finished,
}

/// Everything a screen needs to render the current question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView<'a> {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub question_id: usize,
    /// `Q{number}/{total}: {text}?`
    pub heading: String,
    pub options: &'a [AnswerOption],
    pub selected: Option<usize>,
    pub next_enabled: bool,
    pub prev_enabled: bool,
}

/// One run of the quiz over a question bank.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    state: QuizState,
    answers: AnswerLedger,
    run_id: Uuid,
}

impl QuizSession {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            state: QuizState::Start,
            answers: AnswerLedger::new(),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerLedger {
        &self.answers
    }

    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// Identifier of the current run, renewed on every `start`.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Begin a run at the first question with an empty ledger.
    pub fn start(&mut self) -> Result<(), QuizError> {
        if !matches!(self.state, QuizState::Start) {
            return Err(self.invalid("start"));
        }
        self.answers.clear();
        self.run_id = Uuid::new_v4();
        self.enter_question(0);
        tracing::debug!(run_id = %self.run_id, "quiz started");
        Ok(())
    }

    /// Record (or overwrite) the answer to the displayed question.
    pub fn select_answer(
        &mut self,
        question_id: usize,
        option_index: usize,
    ) -> Result<&AnswerRecord, QuizError> {
        let QuizState::Ongoing { index, .. } = self.state else {
            return Err(self.invalid("select an answer"));
        };
        let bank = Arc::clone(&self.bank);
        let question = bank.get(index).ok_or(QuizError::QuestionMismatch {
            expected: index,
            got: question_id,
        })?;
        if question.id != question_id {
            return Err(QuizError::QuestionMismatch {
                expected: question.id,
                got: question_id,
            });
        }
        let option = question
            .options
            .get(option_index)
            .ok_or(QuizError::UnknownOption {
                question_id,
                option_index,
            })?;

        if let QuizState::Ongoing { turn, .. } = &mut self.state {
            turn.selected = Some(option_index);
        }
        let record = AnswerRecord {
            question_id,
            question_text: question.text.clone(),
            is_correct: option.is_correct,
        };
        tracing::debug!(question_id, option_index, "answer recorded");
        self.answers.insert(question_id, record);
        Ok(&self.answers[&question_id])
    }

    /// Advance to the next question, or finish after the last one.
    pub fn next(&mut self) -> Result<Progress, QuizError> {
        let QuizState::Ongoing { index, turn } = self.state else {
            return Err(self.invalid("go to the next question"));
        };
        if turn.selected.is_none() {
            return Err(QuizError::NextDisabled);
        }
        if index + 1 < self.bank.len() {
            self.enter_question(index + 1);
            Ok(Progress::Advanced(index + 1))
        } else {
            self.state = QuizState::Finished { notified: false };
            tracing::debug!(run_id = %self.run_id, answered = self.answers.len(), "quiz finished");
            Ok(Progress::Finished)
        }
    }

    /// Go back one question.
    pub fn prev(&mut self) -> Result<usize, QuizError> {
        let QuizState::Ongoing { index, .. } = self.state else {
            return Err(self.invalid("go to the previous question"));
        };
        if index == 0 {
            return Err(QuizError::PrevDisabled);
        }
        self.enter_question(index - 1);
        Ok(index - 1)
    }

    /// Return a finished run to the start screen with an empty ledger.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if !matches!(self.state, QuizState::Finished { .. }) {
            return Err(self.invalid("restart"));
        }
        self.answers.clear();
        self.state = QuizState::Start;
        Ok(())
    }

    /// Consume the one-shot notification guard of a finished run.
    ///
    /// Returns `true` exactly once per finished run.
    pub fn claim_notification(&mut self) -> bool {
        if let QuizState::Finished { notified } = &mut self.state {
            if !*notified {
                *notified = true;
                return true;
            }
        }
        false
    }

    pub fn can_next(&self) -> bool {
        matches!(
            self.state,
            QuizState::Ongoing {
                turn: QuestionTurn {
                    selected: Some(_)
                },
                ..
            }
        )
    }

    pub fn can_prev(&self) -> bool {
        matches!(self.state, QuizState::Ongoing { index, .. } if index > 0)
    }

    /// The question currently on screen.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.state {
            QuizState::Ongoing { index, .. } => self.bank.get(index),
            _ => None,
        }
    }

    /// Render data for the current question.
    pub fn view(&self) -> Option<QuestionView<'_>> {
        let QuizState::Ongoing { index, turn } = self.state else {
            return None;
        };
        let question = self.bank.get(index)?;
        let total = self.bank.len();
        Some(QuestionView {
            number: index + 1,
            total,
            question_id: question.id,
            heading: format!("Q{}/{}: {}?", index + 1, total, question.text),
            options: &question.options,
            selected: turn.selected,
            next_enabled: self.can_next(),
            prev_enabled: self.can_prev(),
        })
    }

    fn enter_question(&mut self, index: usize) {
        self.state = QuizState::Ongoing {
            index,
            turn: QuestionTurn::default(),
        };
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
