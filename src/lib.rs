pub mod app;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod review;
pub mod selection;
pub mod session;
pub mod summary;
pub mod timer;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use crate::app::App;
pub use crate::csv::{load_questions, parse_questions};
pub use crate::error::QuizError;
pub use crate::models::{AnswerOption, AppState, QuestionRecord, QuizConfig, QuizMode};
pub use crate::review::{MemoryReviewStore, ReviewList, ReviewStore, SqliteReviewStore};
pub use crate::selection::build_question_set;
pub use crate::session::{QuizSession, handle_quiz_input};
pub use crate::summary::{QuizSummary, summarize};
