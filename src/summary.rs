use crate::models::{AnswerOption, QuestionRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question: QuestionRecord,
    pub user_answer: Option<AnswerOption>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub correct_count: usize,
    pub wrong_count: usize,
    pub percentage: u32,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Scores a finished run. Unanswered questions count as wrong, and an empty run
/// scores zero.
pub fn summarize(questions: &[QuestionRecord], answers: &[Option<AnswerOption>]) -> QuizSummary {
    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let user_answer = answers.get(position).copied().flatten();
            QuestionOutcome {
                question: question.clone(),
                user_answer,
                is_correct: user_answer == Some(question.correct),
            }
        })
        .collect();

    let total = outcomes.len();
    let correct_count = outcomes.iter().filter(|o| o.is_correct).count();
    let percentage = if total > 0 {
        ((correct_count as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    QuizSummary {
        correct_count,
        wrong_count: total - correct_count,
        percentage,
        outcomes,
    }
}
