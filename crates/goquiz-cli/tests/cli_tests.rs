//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn goquiz() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("goquiz").unwrap()
}

const QUESTIONS: &str = r#"[
  {"_id": 0, "question": "Which keyword starts a goroutine",
   "options": [{"text": "go", "isCorrect": true}, {"text": "spawn", "isCorrect": false}]},
  {"_id": 1, "question": "What is the zero value of a pointer",
   "options": [{"text": "0", "isCorrect": false}, {"text": "nil", "isCorrect": true}]}
]"#;

/// A temp dir holding a config that keeps the session and bank inside it.
fn setup(logged_in: bool) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("questions.json");
    let session = dir.path().join("state/session.json");
    std::fs::write(&questions, QUESTIONS).unwrap();

    if logged_in {
        std::fs::create_dir_all(session.parent().unwrap()).unwrap();
        let user = serde_json::json!({"name": "Ada", "email": "ada@example.com"});
        std::fs::write(&session, user.to_string()).unwrap();
    }

    let config = dir.path().join("goquiz.toml");
    std::fs::write(
        &config,
        format!(
            "questions = '{}'\nsession_file = '{}'\n\n[api]\nbase_url = 'http://127.0.0.1:1'\ntimeout_secs = 2\n\n[notification]\nenabled = false\n",
            questions.display(),
            session.display()
        ),
    )
    .unwrap();
    (dir, config)
}

#[test]
fn help_lists_commands() {
    goquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("play"));
}

#[test]
fn version_flag() {
    goquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("goquiz"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    goquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goquiz.toml"))
        .stdout(predicate::str::contains("Created questions.json"));

    assert!(dir.path().join("goquiz.toml").exists());
    assert!(dir.path().join("questions.json").exists());
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("goquiz.toml"), "# mine\n").unwrap();

    goquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("goquiz.toml already exists, skipping."))
        .stdout(predicate::str::contains("Created questions.json"));

    let kept = std::fs::read_to_string(dir.path().join("goquiz.toml")).unwrap();
    assert_eq!(kept, "# mine\n");
}

#[test]
fn init_then_validate() {
    let dir = TempDir::new().unwrap();
    goquiz().current_dir(dir.path()).arg("init").assert().success();

    goquiz()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 questions"))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.json");
    std::fs::write(
        &path,
        r#"[{"_id": 0, "question": "Pick one", "options": [{"text": "a"}, {"text": "b"}]}]"#,
    )
    .unwrap();

    goquiz()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] WARNING: no option is marked correct"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    goquiz()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read question bank"));
}

#[test]
fn missing_explicit_config_fails() {
    goquiz()
        .arg("--config")
        .arg("/nonexistent/goquiz.toml")
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn login_with_short_password_is_rejected() {
    let (_dir, config) = setup(false);

    goquiz()
        .arg("--config")
        .arg(&config)
        .args(["login", "--email", "a@b.com", "--password", "short"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "password: Input must be greater than 8 characters",
        ))
        .stdout(predicate::str::contains("email:").not());
}

#[test]
fn register_reports_every_invalid_field() {
    let (_dir, config) = setup(false);

    goquiz()
        .arg("--config")
        .arg(&config)
        .args(["register", "--email", "nope", "--password", "longenough"])
        .args(["--confirm-password", "different"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("name: Input must not be empty"))
        .stdout(predicate::str::contains("email: Input must be a valid email address"))
        .stdout(predicate::str::contains("confirm_password: Input must be equal to password"));
}

#[test]
fn login_against_unreachable_service_shows_generic_banner() {
    let (dir, config) = setup(false);

    goquiz()
        .arg("--config")
        .arg(&config)
        .args(["login", "--email", "a@b.com", "--password", "longenough"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Something went wrong, please try again."));

    assert!(!dir.path().join("state/session.json").exists());
}

#[test]
fn play_without_session_redirects() {
    let (_dir, config) = setup(false);

    goquiz()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .write_stdin("start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please log in first"))
        .stdout(predicate::str::contains("Welcome").not());
}

#[test]
fn play_without_session_redirects_even_without_bank() {
    let (dir, config) = setup(false);
    std::fs::remove_file(dir.path().join("questions.json")).unwrap();

    goquiz()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .write_stdin("start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please log in first"))
        .stderr(predicate::str::contains("question bank").not());
}

#[test]
fn play_with_session_reports_missing_bank() {
    let (dir, config) = setup(true);
    std::fs::remove_file(dir.path().join("questions.json")).unwrap();

    goquiz()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read question bank"));
}

#[test]
fn play_full_run() {
    let (_dir, config) = setup(true);

    goquiz()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .write_stdin("n\nstart\nn\n1\nn\n1\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to GO Quiz, Ada"))
        .stdout(predicate::str::contains("while quiz is start"))
        .stdout(predicate::str::contains("Q1/2: Which keyword starts a goroutine?"))
        .stdout(predicate::str::contains("select an answer before moving to the next question"))
        .stdout(predicate::str::contains("Q2/2: What is the zero value of a pointer?"))
        .stdout(predicate::str::contains("Quiz finished!"))
        .stdout(predicate::str::contains("1/2"))
        .stdout(predicate::str::contains("50.0%"));
}

#[test]
fn play_uses_questions_flag() {
    let (dir, config) = setup(true);
    let other = dir.path().join("other.json");
    std::fs::write(
        &other,
        r#"[{"_id": 0, "question": "Only question", "options": [{"text": "yes", "isCorrect": true}]}]"#,
    )
    .unwrap();

    goquiz()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .arg("--questions")
        .arg(Path::new(&other))
        .write_stdin("start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1/1: Only question?"));
}
