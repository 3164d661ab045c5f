use std::fmt;

pub const COUNT_STEP: usize = 10;
pub const MAX_COUNT: usize = 880;
pub const TIMER_STEP: u32 = 10;
pub const MAX_TIMER_MINUTES: u32 = 100;

/// One of the three answer slots a question offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerOption {
    A,
    B,
    C,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 3] = [AnswerOption::A, AnswerOption::B, AnswerOption::C];

    /// Parses a letter as written in the `Corretta` column. Case and surrounding
    /// whitespace are ignored.
    pub fn from_letter(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(AnswerOption::A),
            "B" => Some(AnswerOption::B),
            "C" => Some(AnswerOption::C),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            AnswerOption::A => 'A',
            AnswerOption::B => 'B',
            AnswerOption::C => 'C',
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: u32,
    pub prompt: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub correct: AnswerOption,
}

impl QuestionRecord {
    pub fn option_text(&self, option: AnswerOption) -> &str {
        match option {
            AnswerOption::A => &self.option_a,
            AnswerOption::B => &self.option_b,
            AnswerOption::C => &self.option_c,
        }
    }

    pub fn is_correct(&self, option: AnswerOption) -> bool {
        self.correct == option
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Random,
    Interval,
    Review,
}

impl QuizMode {
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Random => "Random questions",
            QuizMode::Interval => "Custom interval",
            QuizMode::Review => "Review list only",
        }
    }

    pub fn next(self) -> Self {
        match self {
            QuizMode::Random => QuizMode::Interval,
            QuizMode::Interval => QuizMode::Review,
            QuizMode::Review => QuizMode::Random,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            QuizMode::Random => QuizMode::Review,
            QuizMode::Interval => QuizMode::Random,
            QuizMode::Review => QuizMode::Interval,
        }
    }
}

/// Settings for a single run, frozen when the quiz starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub mode: QuizMode,
    pub count: usize,
    pub interval_start: u32,
    pub interval_end: u32,
    /// Labelled in minutes; the countdown runs for `timer_minutes * 60` seconds.
    pub timer_minutes: u32,
    pub auto_save_wrong: bool,
}

impl QuizConfig {
    pub fn countdown_seconds(&self) -> u32 {
        self.timer_minutes.saturating_mul(60)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mode: QuizMode::Random,
            count: 10,
            interval_start: 1,
            interval_end: 10,
            timer_minutes: 10,
            auto_save_wrong: false,
        }
    }
}

/// Outcome of the most recent attempt to read the question file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready(usize),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
