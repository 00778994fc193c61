pub mod auth;
pub mod init;
pub mod play;
pub mod validate;

use goquiz_core::traits::{Navigator, Screen};

/// Navigation in a terminal amounts to telling the user where to go next.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: Screen, _replace: bool) {
        match target {
            Screen::Quiz => println!("Go to the quiz: goquiz play"),
            Screen::Home => println!("Please log in first: goquiz login (or goquiz register)"),
        }
        tracing::debug!(%target, "navigated");
    }
}
