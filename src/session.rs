use crate::error::QuizError;
use crate::logger;
use crate::models::{AnswerOption, AppState, QuestionRecord, QuizConfig};
use crate::review::ReviewList;
use crate::summary::{QuizSummary, summarize};
use crate::timer::Countdown;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    NoQuestions,
    TimeExpired,
    Concluded,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Finished(FinishReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running(u32),
    Expired,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub added_to_review: bool,
}

#[derive(Debug)]
pub struct QuizSession {
    config: QuizConfig,
    questions: Vec<QuestionRecord>,
    answers: Vec<Option<AnswerOption>>,
    current_index: usize,
    remaining_seconds: u32,
    countdown: Option<Countdown>,
    phase: SessionPhase,
}

impl QuizSession {
    /// Starts a run over `questions`. A run without questions is finished at once
    /// and never arms its countdown.
    pub fn start(config: QuizConfig, questions: Vec<QuestionRecord>, now: Instant) -> Self {
        let remaining_seconds = config.countdown_seconds();
        let answers = vec![None; questions.len()];
        let mut session = Self {
            config,
            questions,
            answers,
            current_index: 0,
            remaining_seconds,
            countdown: None,
            phase: SessionPhase::Active,
        };

        if session.questions.is_empty() {
            session.finish(FinishReason::NoQuestions);
        } else if session.remaining_seconds == 0 {
            session.finish(FinishReason::TimeExpired);
        } else {
            session.countdown = Some(Countdown::start(now));
            logger::log(&format!(
                "Session started with {} questions, {}s on the clock",
                session.questions.len(),
                session.remaining_seconds
            ));
        }

        session
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<AnswerOption>] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished(_))
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<AnswerOption> {
        self.answers.get(self.current_index).copied().flatten()
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Records `option` for the current question, replacing any earlier choice.
    ///
    /// With auto-save on, a wrong choice appends the question id to `review`
    /// even when it is already listed. Returns `None` when there is nothing to answer.
    pub fn answer(
        &mut self,
        option: AnswerOption,
        review: &mut ReviewList,
    ) -> Result<Option<AnswerOutcome>, QuizError> {
        if self.is_finished() {
            return Ok(None);
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return Ok(None);
        };
        let id = question.id;
        let is_correct = question.is_correct(option);
        self.answers[self.current_index] = Some(option);

        let added_to_review = self.config.auto_save_wrong && !is_correct;
        if added_to_review {
            review.record_wrong(id)?;
        }

        Ok(Some(AnswerOutcome {
            is_correct,
            added_to_review,
        }))
    }

    /// Moves to the next question. Moving past the last one finishes the run.
    pub fn next(&mut self) {
        if self.is_finished() {
            return;
        }
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.current_index = self.questions.len();
            self.finish(FinishReason::Completed);
        }
    }

    pub fn previous(&mut self) {
        if self.is_finished() {
            return;
        }
        self.current_index = self.current_index.saturating_sub(1);
    }

    pub fn conclude(&mut self) {
        if !self.is_finished() {
            self.finish(FinishReason::Concluded);
        }
    }

    /// Counts one second off the clock. Ticks after the run finished change nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_finished() || self.countdown.is_none() {
            return TickOutcome::Stopped;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.finish(FinishReason::TimeExpired);
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining_seconds)
        }
    }

    /// Applies every tick that has come due by `now`.
    pub fn poll_timer(&mut self, now: Instant) -> TickOutcome {
        let due = match self.countdown.as_mut() {
            Some(countdown) => countdown.take_due_ticks(now),
            None => return TickOutcome::Stopped,
        };

        let mut outcome = TickOutcome::Running(self.remaining_seconds);
        for _ in 0..due {
            outcome = self.tick();
            if !matches!(outcome, TickOutcome::Running(_)) {
                break;
            }
        }
        outcome
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.countdown.as_ref().map(|c| c.time_until_next(now))
    }

    pub fn summary(&self) -> QuizSummary {
        summarize(&self.questions, &self.answers)
    }

    fn finish(&mut self, reason: FinishReason) {
        self.countdown = None;
        self.phase = SessionPhase::Finished(reason);
        logger::log(&format!(
            "Session finished ({:?}) with {}/{} answered",
            reason,
            self.answered_count(),
            self.questions.len()
        ));
    }
}

fn option_for_key(code: KeyCode) -> Option<AnswerOption> {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('1') => Some(AnswerOption::A),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('2') => Some(AnswerOption::B),
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('3') => Some(AnswerOption::C),
        _ => None,
    }
}

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
    review: &mut ReviewList,
) -> Result<(), QuizError> {
    let result = match key.code {
        KeyCode::Esc => {
            *app_state = AppState::QuizQuitConfirm;
            Ok(())
        }
        KeyCode::Left | KeyCode::Up => {
            session.previous();
            Ok(())
        }
        KeyCode::Right | KeyCode::Down => {
            if !session.is_last() {
                session.next();
            }
            Ok(())
        }
        KeyCode::Enter => {
            if session.is_last() {
                session.conclude();
            } else {
                session.next();
            }
            Ok(())
        }
        code => match option_for_key(code) {
            Some(option) => session.answer(option, review).map(|_| ()),
            None => Ok(()),
        },
    };

    if session.is_finished() {
        *app_state = AppState::Summary;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizMode;
    use crate::review::MemoryReviewStore;
    use crossterm::event::KeyModifiers;

    fn question(id: u32, correct: AnswerOption) -> QuestionRecord {
        QuestionRecord {
            id,
            prompt: format!("Question {}", id),
            option_a: "a".to_string(),
            option_b: "b".to_string(),
            option_c: "c".to_string(),
            correct,
        }
    }

    fn three_questions() -> Vec<QuestionRecord> {
        vec![
            question(1, AnswerOption::A),
            question(2, AnswerOption::B),
            question(3, AnswerOption::C),
        ]
    }

    fn config(timer_minutes: u32, auto_save_wrong: bool) -> QuizConfig {
        QuizConfig {
            mode: QuizMode::Random,
            timer_minutes,
            auto_save_wrong,
            ..QuizConfig::default()
        }
    }

    fn empty_review() -> (MemoryReviewStore, ReviewList) {
        let store = MemoryReviewStore::new();
        let list = ReviewList::open(Box::new(store.clone()));
        (store, list)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_start_seeds_countdown_from_minutes() {
        let session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        assert_eq!(session.remaining_seconds(), 600);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.has_countdown());
        assert_eq!(session.answers(), &[None, None, None]);
    }

    #[test]
    fn test_empty_session_is_finished_immediately() {
        let mut session = QuizSession::start(config(10, false), Vec::new(), Instant::now());
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::NoQuestions)
        );
        assert!(!session.has_countdown());
        assert_eq!(session.tick(), TickOutcome::Stopped);
        assert_eq!(session.summary().percentage, 0);
    }

    #[test]
    fn test_answer_overwrites_previous_choice() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());

        session.answer(AnswerOption::B, &mut review).unwrap();
        let outcome = session.answer(AnswerOption::A, &mut review).unwrap();

        assert_eq!(session.current_answer(), Some(AnswerOption::A));
        assert_eq!(
            outcome,
            Some(AnswerOutcome {
                is_correct: true,
                added_to_review: false
            })
        );
    }

    #[test]
    fn test_same_answer_twice_is_idempotent() {
        let (store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());

        session.answer(AnswerOption::C, &mut review).unwrap();
        let answers_before = session.answers().to_vec();
        session.answer(AnswerOption::C, &mut review).unwrap();

        assert_eq!(session.answers(), answers_before.as_slice());
        assert!(review.is_empty());
        assert!(store.stored().is_empty());
    }

    #[test]
    fn test_auto_save_records_wrong_answers_with_duplicates() {
        let (store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, true), three_questions(), Instant::now());

        let outcome = session.answer(AnswerOption::B, &mut review).unwrap().unwrap();
        assert!(outcome.added_to_review);
        session.answer(AnswerOption::C, &mut review).unwrap();
        session.answer(AnswerOption::A, &mut review).unwrap();

        assert_eq!(review.ids(), &[1, 1]);
        assert_eq!(store.stored(), vec![1, 1]);
    }

    #[test]
    fn test_auto_save_off_leaves_review_alone() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        session.answer(AnswerOption::C, &mut review).unwrap();
        assert!(review.is_empty());
    }

    #[test]
    fn test_previous_is_clamped_at_first_question() {
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        session.previous();
        assert_eq!(session.current_index(), 0);
        assert!(session.is_first());

        session.next();
        session.previous();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_next_past_last_finishes() {
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        session.next();
        session.next();
        assert!(session.is_last());
        assert!(!session.is_finished());

        session.next();
        assert_eq!(session.current_index(), 3);
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::Completed)
        );
        assert!(session.current_question().is_none());
        assert!(!session.has_countdown());
    }

    #[test]
    fn test_conclude_finishes_and_stops_timer() {
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        session.conclude();
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::Concluded)
        );
        assert_eq!(session.tick(), TickOutcome::Stopped);
        assert_eq!(session.remaining_seconds(), 600);
    }

    #[test]
    fn test_one_minute_expires_after_sixty_ticks() {
        let mut session = QuizSession::start(config(1, false), three_questions(), Instant::now());
        for expected in (1..60).rev() {
            assert_eq!(session.tick(), TickOutcome::Running(expected));
        }
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::TimeExpired)
        );
        assert_eq!(session.remaining_seconds(), 0);

        assert_eq!(session.tick(), TickOutcome::Stopped);
        assert_eq!(session.remaining_seconds(), 0);
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::TimeExpired)
        );
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, true), three_questions(), Instant::now());
        session.conclude();

        assert_eq!(session.answer(AnswerOption::B, &mut review).unwrap(), None);
        session.previous();
        assert_eq!(session.current_index(), 0);
        assert!(review.is_empty());
    }

    #[test]
    fn test_poll_timer_applies_due_ticks() {
        let start = Instant::now();
        let mut session = QuizSession::start(config(1, false), three_questions(), start);

        assert_eq!(
            session.poll_timer(start + Duration::from_millis(500)),
            TickOutcome::Running(60)
        );
        assert_eq!(
            session.poll_timer(start + Duration::from_secs(5)),
            TickOutcome::Running(55)
        );
        assert_eq!(
            session.poll_timer(start + Duration::from_secs(120)),
            TickOutcome::Expired
        );
        assert!(session.time_until_tick(start).is_none());
    }

    #[test]
    fn test_handle_input_answers_and_navigates() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        let mut state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Char('a')), &mut state, &mut review).unwrap();
        assert_eq!(session.answers()[0], Some(AnswerOption::A));

        handle_quiz_input(&mut session, key(KeyCode::Right), &mut state, &mut review).unwrap();
        handle_quiz_input(&mut session, key(KeyCode::Char('3')), &mut state, &mut review).unwrap();
        assert_eq!(session.answers()[1], Some(AnswerOption::C));

        handle_quiz_input(&mut session, key(KeyCode::Left), &mut state, &mut review).unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(state, AppState::Quiz);
    }

    #[test]
    fn test_handle_input_enter_on_last_concludes() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        let mut state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut state, &mut review).unwrap();
        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut state, &mut review).unwrap();
        handle_quiz_input(&mut session, key(KeyCode::Right), &mut state, &mut review).unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(state, AppState::Quiz);

        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut state, &mut review).unwrap();
        assert_eq!(state, AppState::Summary);
        assert_eq!(
            session.phase(),
            SessionPhase::Finished(FinishReason::Concluded)
        );
    }

    #[test]
    fn test_handle_input_escape_asks_for_confirmation() {
        let (_store, mut review) = empty_review();
        let mut session = QuizSession::start(config(10, false), three_questions(), Instant::now());
        let mut state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Esc), &mut state, &mut review).unwrap();
        assert_eq!(state, AppState::QuizQuitConfirm);
        assert!(!session.is_finished());
    }
}
