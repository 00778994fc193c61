//! The `goquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use goquiz_client::config::load_config_from;
use goquiz_core::bank::{load_question_bank, validate_question_bank};

pub fn execute(questions: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let path = match questions {
        Some(p) => p,
        None => load_config_from(config_path.as_deref())?.questions,
    };
    let bank = load_question_bank(&path)?;
    println!("Question bank: {} ({} questions)", path.display(), bank.len());

    let warnings = validate_question_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
