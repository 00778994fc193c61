//! Question bank loading and validation.
//!
//! The bank is a JSON array of question records, loaded once and read-only
//! afterwards.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::QuizError;
use crate::model::QuestionRecord;

/// An ordered, non-empty list of questions.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        Ok(Self { questions })
    }

    /// Question at display position `index`.
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }
}

/// Load a question bank from a JSON file.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a question bank from a JSON string (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let questions: Vec<QuestionRecord> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    QuestionBank::new(questions).with_context(|| format!("in {}", source_path.display()))
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// The question ID (if applicable).
    pub question_id: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    // Ids double as display positions
    let mut seen_ids = HashSet::new();
    for (position, q) in bank.questions().iter().enumerate() {
        if !seen_ids.insert(q.id) {
            warnings.push(BankWarning {
                question_id: Some(q.id),
                message: format!("duplicate question ID: {}", q.id),
            });
        } else if q.id != position {
            warnings.push(BankWarning {
                question_id: Some(q.id),
                message: format!("question ID {} is at position {position}", q.id),
            });
        }
    }

    for q in bank.questions() {
        if q.text.trim().is_empty() {
            warnings.push(BankWarning {
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }

        if q.options.is_empty() {
            warnings.push(BankWarning {
                question_id: Some(q.id),
                message: "question has no options".into(),
            });
            continue;
        }

        match q.options.iter().filter(|o| o.is_correct).count() {
            0 => warnings.push(BankWarning {
                question_id: Some(q.id),
                message: "no option is marked correct".into(),
            }),
            1 => {}
            n => warnings.push(BankWarning {
                question_id: Some(q.id),
                message: format!("{n} options are marked correct"),
            }),
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"[
        {
            "_id": 0,
            "question": "Which keyword declares a goroutine",
            "options": [
                {"text": "go", "isCorrect": true},
                {"text": "async", "isCorrect": false}
            ]
        },
        {
            "_id": 1,
            "question": "What does len return for a nil slice",
            "options": [
                {"text": "0", "isCorrect": true},
                {"text": "panic", "isCorrect": false}
            ]
        }
    ]"#;

    #[test]
    fn parse_valid_bank() {
        let bank = parse_question_bank_str(VALID_JSON, &PathBuf::from("q.json")).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().options[0].text, "0");
        assert!(validate_question_bank(&bank).is_empty());
    }

    #[test]
    fn empty_bank_is_rejected() {
        let err = parse_question_bank_str("[]", &PathBuf::from("q.json")).unwrap_err();
        assert!(format!("{err:#}").contains("empty"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = parse_question_bank_str("{not json", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_problems() {
        let json = r#"[
            {"_id": 0, "question": "", "options": []},
            {"_id": 0, "question": "Dup", "options": [{"text": "a"}]},
            {"_id": 5, "question": "Gap", "options": [
                {"text": "a", "isCorrect": true},
                {"text": "b", "isCorrect": true}
            ]}
        ]"#;
        let bank = parse_question_bank_str(json, &PathBuf::from("q.json")).unwrap();
        let warnings = validate_question_bank(&bank);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));

        assert!(has("duplicate"));
        assert!(has("at position 2"));
        assert!(has("text is empty"));
        assert!(has("no options"));
        assert!(has("no option is marked correct"));
        assert!(has("2 options are marked correct"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, VALID_JSON).unwrap();

        let bank = load_question_bank(&path).unwrap();
        assert_eq!(bank.questions()[0].id, 0);
        assert!(load_question_bank(&dir.path().join("missing.json")).is_err());
    }
}
