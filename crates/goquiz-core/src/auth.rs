//! Login and registration flows.
//!
//! Both flows are the same machine: a form gathers credentials, a valid
//! submit invokes the matching remote action, and a successful response is
//! stored as the session identity before navigating to the quiz.

use anyhow::Context;
use serde::Serialize;

use crate::action::{ActionOutcome, AsyncAction};
use crate::error::GENERIC_FAILURE_MESSAGE;
use crate::field::ValidatedField;
use crate::form::{FormOrchestrator, Submission};
use crate::model::{LoginCredentials, RegisterCredentials, UserRecord};
use crate::traits::{Screen, Services};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirm_password";

pub const NAME_MESSAGE: &str = "Input must not be empty";
pub const EMAIL_MESSAGE: &str = "Input must be a valid email address";
pub const PASSWORD_MESSAGE: &str = "Input must be greater than 8 characters";
pub const CONFIRM_PASSWORD_MESSAGE: &str = "Input must be equal to password";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_name(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    !value.trim().is_empty() && value.contains('@')
}

pub fn is_valid_password(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_valid_confirmation(value: &str, password: &str) -> bool {
    !value.trim().is_empty() && value == password
}

/// Email and password.
pub fn login_form() -> FormOrchestrator {
    FormOrchestrator::new(vec![
        ValidatedField::new(EMAIL, EMAIL_MESSAGE, is_valid_email),
        ValidatedField::new(PASSWORD, PASSWORD_MESSAGE, is_valid_password),
    ])
}

/// Name, email, password, and its confirmation.
pub fn register_form() -> FormOrchestrator {
    FormOrchestrator::new(vec![
        ValidatedField::new(NAME, NAME_MESSAGE, is_valid_name),
        ValidatedField::new(EMAIL, EMAIL_MESSAGE, is_valid_email),
        ValidatedField::new(PASSWORD, PASSWORD_MESSAGE, is_valid_password),
        ValidatedField::dependent(CONFIRM_PASSWORD, CONFIRM_PASSWORD_MESSAGE, |value, siblings| {
            is_valid_confirmation(value, siblings.get(PASSWORD).unwrap_or_default())
        }),
    ])
}

/// Which authentication widget a screen is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    Login,
    Register,
}

impl AuthKind {
    /// The other widget.
    pub fn toggled(self) -> Self {
        match self {
            AuthKind::Login => AuthKind::Register,
            AuthKind::Register => AuthKind::Login,
        }
    }
}

/// Result of pressing the submit button.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form is invalid; every field error is now visible. Nothing was sent.
    Rejected,
    /// A previous submit is still in flight; this one was ignored.
    InFlight,
    /// The remote call failed; holds the banner message.
    Failed(String),
    /// The screen was unmounted before the response arrived.
    Detached,
    /// The user is stored and navigation to the quiz was requested.
    Authenticated(UserRecord),
}

#[derive(Serialize)]
#[serde(untagged)]
enum Credentials {
    Login(LoginCredentials),
    Register(RegisterCredentials),
}

/// A login or registration widget.
pub struct AuthScreen {
    kind: AuthKind,
    form: FormOrchestrator,
    action: AsyncAction,
    services: Services,
    banner: Option<String>,
}

impl AuthScreen {
    pub fn new(kind: AuthKind, services: Services) -> Self {
        let (form, action) = match kind {
            AuthKind::Login => (
                login_form(),
                AsyncAction::post("login", services.endpoints.login.clone(), services.transport.clone()),
            ),
            AuthKind::Register => (
                register_form(),
                AsyncAction::post(
                    "register",
                    services.endpoints.register.clone(),
                    services.transport.clone(),
                ),
            ),
        };
        Self {
            kind,
            form,
            action,
            services,
            banner: None,
        }
    }

    pub fn login(services: Services) -> Self {
        Self::new(AuthKind::Login, services)
    }

    pub fn register(services: Services) -> Self {
        Self::new(AuthKind::Register, services)
    }

    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    pub fn form(&self) -> &FormOrchestrator {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormOrchestrator {
        &mut self.form
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.action.is_enabled()
    }

    /// Remote failure message to show, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
        self.action.dismiss_error();
    }

    /// The screen is going away; a response still in flight is discarded.
    pub fn unmount(&self) {
        self.action.detach();
    }

    /// Validate the form and, if it passes, authenticate.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.form.attempt_submit() == Submission::Rejected {
            return SubmitOutcome::Rejected;
        }

        let credentials = self.credentials();
        let Self {
            form,
            action,
            services,
            banner,
            ..
        } = self;

        let outcome = action
            .invoke(&credentials, |body| -> anyhow::Result<UserRecord> {
                let user: UserRecord = serde_json::from_value(body)
                    .context("authentication response is not a user record")?;
                services.store.set(&user).context("failed to store session")?;
                form.reset();
                services.navigator.navigate(Screen::Quiz, true);
                Ok(user)
            })
            .await;

        match outcome {
            ActionOutcome::Succeeded(Ok(user)) => {
                tracing::info!(email = %user.email, "authenticated");
                *banner = None;
                SubmitOutcome::Authenticated(user)
            }
            ActionOutcome::Succeeded(Err(e)) => {
                let detail = format!("{e:#}");
                tracing::warn!(error = %detail, "authentication succeeded but could not be applied");
                *banner = Some(GENERIC_FAILURE_MESSAGE.to_string());
                SubmitOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string())
            }
            ActionOutcome::Failed(err) => {
                let message = err.display_message().to_string();
                *banner = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
            ActionOutcome::Skipped => SubmitOutcome::InFlight,
            ActionOutcome::Detached => SubmitOutcome::Detached,
        }
    }

    fn credentials(&self) -> Credentials {
        let value = |name| self.form.value(name).to_string();
        match self.kind {
            AuthKind::Login => Credentials::Login(LoginCredentials {
                email: value(EMAIL),
                password: value(PASSWORD),
            }),
            AuthKind::Register => Credentials::Register(RegisterCredentials {
                name: value(NAME),
                email: value(EMAIL),
                password: value(PASSWORD),
                confirm_password: value(CONFIRM_PASSWORD),
            }),
        }
    }
}

/// The entry screen: one authentication widget at a time, login first.
pub struct HomeScreen {
    services: Services,
    widget: AuthScreen,
}

impl HomeScreen {
    pub fn new(services: Services) -> Self {
        let widget = AuthScreen::login(services.clone());
        Self { services, widget }
    }

    pub fn widget(&self) -> &AuthScreen {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut AuthScreen {
        &mut self.widget
    }

    /// Swap between login and registration with a fresh form.
    pub fn toggle(&mut self) -> AuthKind {
        let next = self.widget.kind().toggled();
        self.widget.unmount();
        self.widget = AuthScreen::new(next, self.services.clone());
        next
    }
}
