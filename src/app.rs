use crate::csv::load_questions;
use crate::logger;
use crate::models::{
    AppState, COUNT_STEP, LoadStatus, MAX_COUNT, MAX_TIMER_MINUTES, QuizConfig, QuizMode,
    TIMER_STEP,
};
use crate::review::ReviewList;
use crate::selection::build_question_set;
use crate::session::{QuizSession, handle_quiz_input};
use crate::summary::QuizSummary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    Mode,
    Count,
    IntervalStart,
    IntervalEnd,
    Timer,
    AutoSave,
}

impl MenuField {
    pub fn label(self) -> &'static str {
        match self {
            MenuField::Mode => "Mode",
            MenuField::Count => "Number of questions",
            MenuField::IntervalStart => "From question #",
            MenuField::IntervalEnd => "To question #",
            MenuField::Timer => "Timer (minutes)",
            MenuField::AutoSave => "Auto-save wrong answers",
        }
    }
}

/// Editable settings shown on the configuration screen.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub config: QuizConfig,
    pub selected: usize,
}

impl ConfigForm {
    /// Fields relevant to the current mode, in display order.
    pub fn fields(&self) -> Vec<MenuField> {
        let mut fields = vec![MenuField::Mode];
        match self.config.mode {
            QuizMode::Random => fields.push(MenuField::Count),
            QuizMode::Interval => {
                fields.push(MenuField::IntervalStart);
                fields.push(MenuField::IntervalEnd);
            }
            QuizMode::Review => {}
        }
        fields.push(MenuField::Timer);
        fields.push(MenuField::AutoSave);
        fields
    }

    pub fn selected_field(&self) -> MenuField {
        let fields = self.fields();
        fields[self.selected.min(fields.len() - 1)]
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.fields().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Steps the selected field by `direction` (+1 or -1).
    pub fn adjust(&mut self, direction: i32) {
        let field = self.selected_field();
        let config = &mut self.config;
        match field {
            MenuField::Mode => {
                config.mode = if direction >= 0 {
                    config.mode.next()
                } else {
                    config.mode.previous()
                };
                self.selected = 0;
            }
            MenuField::Count => {
                config.count = if direction >= 0 {
                    (config.count + COUNT_STEP).min(MAX_COUNT)
                } else {
                    config.count.saturating_sub(COUNT_STEP).max(COUNT_STEP)
                };
            }
            MenuField::IntervalStart => {
                config.interval_start = step_bound(config.interval_start, direction);
            }
            MenuField::IntervalEnd => {
                config.interval_end = step_bound(config.interval_end, direction);
            }
            MenuField::Timer => {
                config.timer_minutes = if direction >= 0 {
                    (config.timer_minutes + TIMER_STEP).min(MAX_TIMER_MINUTES)
                } else {
                    config.timer_minutes.saturating_sub(TIMER_STEP).max(TIMER_STEP)
                };
            }
            MenuField::AutoSave => {
                config.auto_save_wrong = !config.auto_save_wrong;
            }
        }
    }

    pub fn push_digit(&mut self, digit: u32) {
        if let Some(bound) = self.selected_bound_mut() {
            *bound = bound
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .unwrap_or(*bound);
        }
    }

    pub fn pop_digit(&mut self) {
        if let Some(bound) = self.selected_bound_mut() {
            *bound /= 10;
        }
    }

    fn selected_bound_mut(&mut self) -> Option<&mut u32> {
        match self.selected_field() {
            MenuField::IntervalStart => Some(&mut self.config.interval_start),
            MenuField::IntervalEnd => Some(&mut self.config.interval_end),
            _ => None,
        }
    }
}

fn step_bound(value: u32, direction: i32) -> u32 {
    if direction >= 0 {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    }
}

pub struct App {
    pub state: AppState,
    pub form: ConfigForm,
    pub load_status: LoadStatus,
    pub session: Option<QuizSession>,
    pub summary: Option<QuizSummary>,
    pub summary_cursor: usize,
    pub summary_scroll: usize,
    pub status_message: Option<String>,
    pub review: ReviewList,
    questions_path: PathBuf,
    rng: StdRng,
    pending_start: bool,
    should_quit: bool,
}

impl App {
    pub fn new(questions_path: PathBuf, review: ReviewList, rng: StdRng) -> Self {
        Self {
            state: AppState::Menu,
            form: ConfigForm::default(),
            load_status: LoadStatus::Idle,
            session: None,
            summary: None,
            summary_cursor: 0,
            summary_scroll: 0,
            status_message: None,
            review,
            questions_path,
            rng,
            pending_start: false,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn has_pending_start(&self) -> bool {
        self.pending_start
    }

    /// How long the event loop may wait for input before the next tick is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.pending_start {
            return Duration::ZERO;
        }
        self.session
            .as_ref()
            .and_then(|s| s.time_until_tick(now))
            .map(|d| d.min(IDLE_POLL))
            .unwrap_or(IDLE_POLL)
    }

    /// Runs deferred work: a requested quiz start and any countdown ticks.
    pub fn update(&mut self, now: Instant) {
        if self.pending_start {
            self.pending_start = false;
            self.start_quiz(now);
        }

        if let Some(session) = self.session.as_mut() {
            session.poll_timer(now);
        }
        self.sync_finished();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::Quiz => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(e) =
                        handle_quiz_input(session, key, &mut self.state, &mut self.review)
                    {
                        self.status_message = Some(format!("Review list not saved: {}", e));
                    }
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.return_to_menu(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Quiz;
                }
                _ => {}
            },
            AppState::Summary => self.handle_summary_key(key),
        }
        self.sync_finished();
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.form.select_previous(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => self.form.adjust(-1),
            KeyCode::Right => self.form.adjust(1),
            KeyCode::Char(' ') => {
                self.form.config.auto_save_wrong = !self.form.config.auto_save_wrong;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.form.push_digit(c.to_digit(10).unwrap_or(0));
            }
            KeyCode::Backspace => self.form.pop_digit(),
            KeyCode::Enter => {
                self.load_status = LoadStatus::Loading;
                self.pending_start = true;
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        let total = self.summary.as_ref().map(|s| s.total()).unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.summary_cursor = self.summary_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.summary_cursor + 1 < total {
                    self.summary_cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('f') => self.toggle_selected_review(),
            KeyCode::Char('m') | KeyCode::Char('r') | KeyCode::Enter => self.return_to_menu(),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn start_quiz(&mut self, now: Instant) {
        let all = match load_questions(&self.questions_path) {
            Ok(all) => all,
            Err(e) => {
                logger::log(&format!("Question load failed: {}", e));
                self.load_status = LoadStatus::Failed(e.to_string());
                return;
            }
        };
        self.load_status = LoadStatus::Ready(all.len());

        let config = self.form.config.clone();
        let questions = build_question_set(&config, &all, &self.review, &mut self.rng);
        self.session = Some(QuizSession::start(config, questions, now));
        self.summary = None;
        self.status_message = None;
        self.state = AppState::Quiz;
    }

    /// Moves to the results screen once the session has stopped.
    fn sync_finished(&mut self) {
        let finished = self.session.as_ref().is_some_and(|s| s.is_finished());
        if finished && self.summary.is_none() {
            self.summary = self.session.as_ref().map(|s| s.summary());
            self.summary_cursor = 0;
            self.summary_scroll = 0;
            self.state = AppState::Summary;
        }
    }

    pub fn toggle_selected_review(&mut self) {
        let Some(id) = self
            .summary
            .as_ref()
            .and_then(|s| s.outcomes.get(self.summary_cursor))
            .map(|o| o.question.id)
        else {
            return;
        };
        match self.review.toggle(id) {
            Ok(_) => self.status_message = None,
            Err(e) => self.status_message = Some(format!("Review list not saved: {}", e)),
        }
    }

    /// Discards the run and its settings. The auto-save toggle and the review list stay.
    pub fn return_to_menu(&mut self) {
        let auto_save_wrong = self.form.config.auto_save_wrong;
        self.session = None;
        self.summary = None;
        self.summary_cursor = 0;
        self.summary_scroll = 0;
        self.status_message = None;
        self.form = ConfigForm::default();
        self.form.config.auto_save_wrong = auto_save_wrong;
        self.state = AppState::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;
    use crate::review::{MemoryReviewStore, ReviewStore};
    use rand::SeedableRng;

    const SHEET: &str = "Numero,Domanda,A,B,C,Corretta\n\
        1,Q1,a,b,c,A\n\
        2,Q2,a,b,c,B\n\
        3,Q3,a,b,c,C\n\
        4,Q4,a,b,c,A\n";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_sheet(dir: &tempfile::TempDir, store: MemoryReviewStore) -> App {
        let path = dir.path().join("questions.csv");
        std::fs::write(&path, SHEET).unwrap();
        App::new(
            path,
            ReviewList::open(Box::new(store)),
            StdRng::seed_from_u64(3),
        )
    }

    fn start(app: &mut App, now: Instant) {
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.load_status, LoadStatus::Loading);
        assert_eq!(app.poll_timeout(now), Duration::ZERO);
        app.update(now);
    }

    #[test]
    fn test_start_random_quiz() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        start(&mut app, Instant::now());

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.load_status, LoadStatus::Ready(4));
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.questions().len(), 4);
        assert_eq!(session.remaining_seconds(), 600);
    }

    #[test]
    fn test_missing_sheet_reports_failure_and_stays_on_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            dir.path().join("missing.csv"),
            ReviewList::open(Box::new(MemoryReviewStore::new())),
            StdRng::seed_from_u64(3),
        );
        start(&mut app, Instant::now());

        assert_eq!(app.state, AppState::Menu);
        assert!(matches!(app.load_status, LoadStatus::Failed(_)));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_empty_review_mode_goes_straight_to_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.form.config.mode, QuizMode::Review);
        start(&mut app, Instant::now());

        assert_eq!(app.state, AppState::Summary);
        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.percentage, 0);
    }

    #[test]
    fn test_interval_bounds_typed_as_digits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.form.config.mode, QuizMode::Interval);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.form.config.interval_start, 2);
        assert_eq!(app.form.config.interval_end, 3);

        start(&mut app, Instant::now());
        let ids: Vec<u32> = app
            .session
            .as_ref()
            .unwrap()
            .questions()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_timer_expiry_moves_to_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        let now = Instant::now();
        start(&mut app, now);

        app.update(now + Duration::from_secs(599));
        assert_eq!(app.state, AppState::Quiz);
        app.update(now + Duration::from_secs(600));
        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.summary.as_ref().unwrap().wrong_count, 4);
    }

    #[test]
    fn test_summary_toggle_persists_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryReviewStore::new();
        let mut app = app_with_sheet(&dir, store.clone());
        start(&mut app, Instant::now());

        app.handle_key(key(KeyCode::Char('a')));
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(app.state, AppState::Summary);

        let first_id = app.summary.as_ref().unwrap().outcomes[0].question.id;
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.review.contains(first_id));
        assert_eq!(store.stored(), vec![first_id]);

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.review.contains(first_id));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_auto_save_survives_return_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryReviewStore::new();
        let mut app = app_with_sheet(&dir, store.clone());
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.form.config.count, 20);
        start(&mut app, Instant::now());

        let session = app.session.as_ref().unwrap();
        let wrong = AnswerOption::ALL
            .into_iter()
            .find(|o| *o != session.questions()[0].correct)
            .unwrap();
        let wrong_key = wrong.letter().to_ascii_lowercase();
        let first_id = session.questions()[0].id;
        app.handle_key(key(KeyCode::Char(wrong_key)));
        assert_eq!(store.stored(), vec![first_id]);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::QuizQuitConfirm);
        app.handle_key(key(KeyCode::Char('y')));

        assert_eq!(app.state, AppState::Menu);
        assert!(app.session.is_none());
        assert!(app.form.config.auto_save_wrong);
        assert_eq!(app.form.config.count, 10);
        assert_eq!(app.review.ids(), &[first_id]);
    }

    #[test]
    fn test_quit_confirm_can_resume() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        start(&mut app, Instant::now());

        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.session.is_some());
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_sheet(&dir, MemoryReviewStore::new());
        start(&mut app, Instant::now());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_form_fields_follow_mode() {
        let mut form = ConfigForm::default();
        assert_eq!(
            form.fields(),
            vec![
                MenuField::Mode,
                MenuField::Count,
                MenuField::Timer,
                MenuField::AutoSave
            ]
        );
        form.adjust(1);
        assert!(form.fields().contains(&MenuField::IntervalStart));
        form.adjust(1);
        assert_eq!(form.fields().len(), 3);
    }

    #[test]
    fn test_form_steps_are_clamped() {
        let mut form = ConfigForm::default();
        form.select_next();
        form.adjust(-1);
        assert_eq!(form.config.count, 10);
        for _ in 0..100 {
            form.adjust(1);
        }
        assert_eq!(form.config.count, MAX_COUNT);

        form.select_next();
        assert_eq!(form.selected_field(), MenuField::Timer);
        for _ in 0..20 {
            form.adjust(1);
        }
        assert_eq!(form.config.timer_minutes, MAX_TIMER_MINUTES);
    }
}
