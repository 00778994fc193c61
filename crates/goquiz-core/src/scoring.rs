//! Result statistics and the result notification payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, Notification, UserRecord};

/// Default subject line of the result mail.
pub const DEFAULT_SUBJECT: &str = "GO Quiz results";

/// Pass/fail statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub passed: usize,
    pub failed: usize,
    /// Number of questions in the bank (the denominator of the average).
    pub total: usize,
    /// `passed / total * 100`, rounded to one decimal.
    pub average_percent: f64,
}

impl ResultSummary {
    /// Questions with no recorded answer.
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.passed + self.failed)
    }
}

/// Compute the summary of a set of answers against `total_questions`.
///
/// Unanswered questions count toward neither `passed` nor `failed`, but the
/// average is always taken over the whole bank. The result does not depend
/// on the order of `answers`.
pub fn summarize<'a, I>(answers: I, total_questions: usize) -> ResultSummary
where
    I: IntoIterator<Item = &'a AnswerRecord>,
{
    let (passed, failed) = answers
        .into_iter()
        .fold((0, 0), |(p, f), a| if a.is_correct { (p + 1, f) } else { (p, f + 1) });

    let average_percent = if total_questions == 0 {
        0.0
    } else {
        round_one_decimal(passed as f64 / total_questions as f64 * 100.0)
    };

    ResultSummary {
        passed,
        failed,
        total: total_questions,
        average_percent,
    }
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Build the result mail for `user`.
pub fn compose_notification(
    user: &UserRecord,
    summary: &ResultSummary,
    subject: &str,
    completed_at: DateTime<Utc>,
) -> Notification {
    let total = summary.total;
    let html = format!(
        "<h2>Quiz finished, {name}</h2>\
         <p><b>Questions passed:</b> {passed}/{total}</p>\
         <p><b>Questions failed:</b> {failed}/{total}</p>\
         <p><b>Total average:</b> {average:.1}%</p>\
         <p>Completed at {at}</p>",
        name = ammonia::clean_text(&user.name),
        passed = summary.passed,
        failed = summary.failed,
        average = summary.average_percent,
        at = completed_at.to_rfc3339(),
    );

    Notification {
        to: user.email.clone(),
        subject: subject.to_string(),
        html,
    }
}
