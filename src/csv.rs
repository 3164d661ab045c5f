use crate::error::QuizError;
use crate::logger;
use crate::models::{AnswerOption, QuestionRecord};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_QUESTIONS_PATH: &str = "quiz_domande_320.csv";

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "Numero")]
    numero: Option<String>,
    #[serde(rename = "Domanda")]
    domanda: Option<String>,
    #[serde(rename = "A")]
    a: Option<String>,
    #[serde(rename = "B")]
    b: Option<String>,
    #[serde(rename = "C")]
    c: Option<String>,
    #[serde(rename = "Corretta")]
    corretta: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

impl RawQuestion {
    fn into_record(self) -> Option<QuestionRecord> {
        let id = non_empty(self.numero)?.trim().parse::<u32>().ok()?;
        let prompt = non_empty(self.domanda)?;
        let option_a = non_empty(self.a)?;
        let option_b = non_empty(self.b)?;
        let option_c = non_empty(self.c)?;
        let correct = AnswerOption::from_letter(self.corretta.as_deref().unwrap_or(""))?;

        Some(QuestionRecord {
            id,
            prompt,
            option_a,
            option_b,
            option_c,
            correct,
        })
    }
}

/// Parses the question sheet. Rows that cannot form a complete record are skipped,
/// and the surviving records keep their file order.
pub fn parse_questions(text: &str) -> Vec<QuestionRecord> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut questions = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<RawQuestion>() {
        match row.ok().and_then(RawQuestion::into_record) {
            Some(record) => questions.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        logger::log(&format!("Dropped {} incomplete question rows", dropped));
    }

    questions
}

pub fn load_questions(path: &Path) -> Result<Vec<QuestionRecord>, QuizError> {
    let content = fs::read_to_string(path)?;
    let questions = parse_questions(&content);
    logger::log(&format!(
        "Loaded {} questions from {}",
        questions.len(),
        path.display()
    ));
    Ok(questions)
}
