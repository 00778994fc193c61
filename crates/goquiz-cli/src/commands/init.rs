//! The `goquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing("goquiz.toml", SAMPLE_CONFIG)?;
    write_if_missing("questions.json", SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Point [api] base_url in goquiz.toml at your quiz service");
    println!("  2. Run: goquiz validate");
    println!("  3. Run: goquiz register --name ... --email ... --password ... --confirm-password ...");
    println!("  4. Run: goquiz play");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# goquiz configuration

questions = "questions.json"

[api]
base_url = "http://localhost:8080"
login_path = "/api/auth/login"
register_path = "/api/auth/register"
mail_path = "/api/mail/send"
timeout_secs = 30
# api_key = "${GOQUIZ_API_KEY}"

[notification]
enabled = true
subject = "GO Quiz results"
"#;

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "_id": 0,
    "question": "Which keyword starts a goroutine",
    "options": [
      { "text": "go", "isCorrect": true },
      { "text": "async", "isCorrect": false },
      { "text": "spawn", "isCorrect": false },
      { "text": "thread", "isCorrect": false }
    ]
  },
  {
    "_id": 1,
    "question": "What is the zero value of a pointer in Go",
    "options": [
      { "text": "0", "isCorrect": false },
      { "text": "nil", "isCorrect": true },
      { "text": "undefined", "isCorrect": false },
      { "text": "NULL", "isCorrect": false }
    ]
  },
  {
    "_id": 2,
    "question": "Which statement runs a call when the surrounding function returns",
    "options": [
      { "text": "finally", "isCorrect": false },
      { "text": "ensure", "isCorrect": false },
      { "text": "defer", "isCorrect": true },
      { "text": "atexit", "isCorrect": false }
    ]
  },
  {
    "_id": 3,
    "question": "How do you declare and initialize a variable inside a function in one step",
    "options": [
      { "text": "x := 1", "isCorrect": true },
      { "text": "let x = 1", "isCorrect": false },
      { "text": "var x <- 1", "isCorrect": false },
      { "text": "x = new 1", "isCorrect": false }
    ]
  }
]
"#;
