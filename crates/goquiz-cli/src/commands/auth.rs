//! The `goquiz login` and `goquiz register` commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use goquiz_client::config::{create_services, load_config_from};
use goquiz_core::auth::{
    AuthKind, AuthScreen, SubmitOutcome, CONFIRM_PASSWORD, EMAIL, NAME, PASSWORD,
};

use super::TerminalNavigator;

pub async fn login(email: String, password: String, config_path: Option<PathBuf>) -> Result<()> {
    submit(
        AuthKind::Login,
        vec![(EMAIL, email), (PASSWORD, password)],
        config_path,
    )
    .await
}

pub async fn register(
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    submit(
        AuthKind::Register,
        vec![
            (NAME, name),
            (EMAIL, email),
            (PASSWORD, password),
            (CONFIRM_PASSWORD, confirm_password),
        ],
        config_path,
    )
    .await
}

/// Type each value into its field, leave it, then press submit.
async fn submit(
    kind: AuthKind,
    values: Vec<(&'static str, String)>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let services = create_services(&config, Arc::new(TerminalNavigator))?;
    let mut screen = AuthScreen::new(kind, services);

    for (name, value) in values {
        screen.form_mut().change(name, value)?;
        screen.form_mut().blur(name)?;
    }

    match screen.submit().await {
        SubmitOutcome::Authenticated(user) => {
            println!("Signed in as {} <{}>", user.name, user.email);
            Ok(())
        }
        SubmitOutcome::Rejected => {
            for (field, message) in screen.form().errors() {
                println!("  {field}: {message}");
            }
            anyhow::bail!("please fix the highlighted fields")
        }
        SubmitOutcome::Failed(message) => anyhow::bail!("{message}"),
        SubmitOutcome::InFlight | SubmitOutcome::Detached => {
            anyhow::bail!("request did not complete")
        }
    }
}
