//! The quiz screen: identity guard, session, and result notification.
//!
//! Entering requires a stored user; without one the screen redirects home
//! before any session exists. The result mail is tied to the transition into
//! `Finished`: that transition hands out a single [`PendingNotification`],
//! and recomputing the summary afterwards never produces another.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{ActionOutcome, AsyncAction};
use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{AnswerRecord, Notification, UserRecord};
use crate::quiz::{Progress, QuestionView, QuizSession, QuizState};
use crate::scoring::{compose_notification, summarize, ResultSummary, DEFAULT_SUBJECT};
use crate::traits::{Screen, Services};

/// Result mail settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_enabled() -> bool {
    true
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            subject: default_subject(),
        }
    }
}

/// What happened on entering the quiz screen.
pub enum Entry {
    /// No user is stored; navigation home was requested.
    Redirected,
    Entered(QuizRunner),
}

/// What `next` did.
#[derive(Debug)]
pub enum Step {
    Advanced(usize),
    /// The run is over. `notification` is present when mail is enabled and
    /// must be handed to [`QuizRunner::send_notification`].
    Finished {
        summary: ResultSummary,
        notification: Option<PendingNotification>,
    },
}

/// The one result mail of a finished run.
#[derive(Debug)]
#[must_use = "a finished run's notification is only sent through QuizRunner::send_notification"]
pub struct PendingNotification {
    run_id: Uuid,
    payload: Notification,
}

impl PendingNotification {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn payload(&self) -> &Notification {
        &self.payload
    }
}

/// The guarded quiz screen.
pub struct QuizRunner {
    user: UserRecord,
    session: QuizSession,
    notifier: AsyncAction,
    settings: NotificationSettings,
}

impl QuizRunner {
    /// Enter the quiz screen, or redirect home if nobody is logged in.
    pub fn enter(
        services: &Services,
        bank: Arc<QuestionBank>,
        settings: NotificationSettings,
    ) -> anyhow::Result<Entry> {
        Self::enter_with(services, settings, || Ok(bank))
    }

    /// Like [`enter`](Self::enter), but the bank is only loaded once the
    /// identity check has passed.
    pub fn enter_with<L>(
        services: &Services,
        settings: NotificationSettings,
        load_bank: L,
    ) -> anyhow::Result<Entry>
    where
        L: FnOnce() -> anyhow::Result<Arc<QuestionBank>>,
    {
        let Some(user) = services.store.get()? else {
            tracing::info!("no stored user, redirecting to {}", Screen::Home);
            services.navigator.navigate(Screen::Home, true);
            return Ok(Entry::Redirected);
        };
        let bank = load_bank()?;

        let notifier = AsyncAction::post(
            "notify",
            services.endpoints.mail.clone(),
            services.transport.clone(),
        );
        Ok(Entry::Entered(Self {
            user,
            session: QuizSession::new(bank),
            notifier,
            settings,
        }))
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Start-screen greeting.
    pub fn greeting(&self) -> String {
        format!("Welcome to GO Quiz, {}", self.user.name)
    }

    pub fn view(&self) -> Option<QuestionView<'_>> {
        self.session.view()
    }

    pub fn start(&mut self) -> Result<(), QuizError> {
        self.session.start()
    }

    /// Select option `option_index` of the displayed question.
    pub fn select(&mut self, option_index: usize) -> Result<&AnswerRecord, QuizError> {
        let Some(question_id) = self.session.current_question().map(|q| q.id) else {
            return Err(QuizError::InvalidTransition {
                action: "select an answer",
                state: self.session.state().name(),
            });
        };
        self.session.select_answer(question_id, option_index)
    }

    pub fn next(&mut self) -> Result<Step, QuizError> {
        match self.session.next()? {
            Progress::Advanced(index) => Ok(Step::Advanced(index)),
            Progress::Finished => {
                let summary = self.summarize();
                let notification = self.claim_notification(&summary);
                Ok(Step::Finished {
                    summary,
                    notification,
                })
            }
        }
    }

    pub fn prev(&mut self) -> Result<usize, QuizError> {
        self.session.prev()
    }

    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.session.restart()
    }

    /// Summary of the finished run, recomputed on every call.
    pub fn summary(&self) -> Option<ResultSummary> {
        matches!(self.session.state(), QuizState::Finished { .. }).then(|| self.summarize())
    }

    /// Dispatch the result mail. Failures are logged, never surfaced.
    pub async fn send_notification(&self, pending: PendingNotification) -> ActionOutcome<()> {
        let run_id = pending.run_id;
        let outcome = self.notifier.invoke(&pending.payload, |_| ()).await;
        match &outcome {
            ActionOutcome::Succeeded(()) => {
                tracing::info!(%run_id, to = %pending.payload.to, "result notification sent")
            }
            ActionOutcome::Failed(err) => {
                tracing::warn!(%run_id, error = %err, "result notification failed")
            }
            ActionOutcome::Skipped => {
                tracing::warn!(%run_id, "result notification skipped, another is in flight")
            }
            ActionOutcome::Detached => {
                tracing::debug!(%run_id, "result notification dropped, the quiz screen was left")
            }
        }
        outcome
    }

    /// The screen is going away.
    pub fn leave(&self) {
        self.notifier.detach();
    }

    fn summarize(&self) -> ResultSummary {
        summarize(self.session.answers().values(), self.session.total_questions())
    }

    fn claim_notification(&mut self, summary: &ResultSummary) -> Option<PendingNotification> {
        if !self.session.claim_notification() {
            return None;
        }
        if !self.settings.enabled {
            tracing::debug!("result notification disabled");
            return None;
        }
        Some(PendingNotification {
            run_id: self.session.run_id(),
            payload: compose_notification(&self.user, summary, &self.settings.subject, Utc::now()),
        })
    }
}
