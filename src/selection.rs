use crate::models::{QuestionRecord, QuizConfig, QuizMode};
use crate::review::ReviewList;
use rand::Rng;
use rand::seq::SliceRandom;

/// Picks the questions for one run and puts them in presentation order.
///
/// An empty result is a valid outcome for every mode.
pub fn build_question_set<R: Rng + ?Sized>(
    config: &QuizConfig,
    all: &[QuestionRecord],
    review: &ReviewList,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    match config.mode {
        QuizMode::Random => random_subset(all, config.count, rng),
        QuizMode::Interval => interval_subset(all, config.interval_start, config.interval_end),
        QuizMode::Review => review_subset(all, review.ids()),
    }
}

fn random_subset<R: Rng + ?Sized>(
    all: &[QuestionRecord],
    count: usize,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    let mut pool = all.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

fn interval_subset(all: &[QuestionRecord], start: u32, end: u32) -> Vec<QuestionRecord> {
    let mut selected: Vec<QuestionRecord> = all
        .iter()
        .filter(|q| (start..=end).contains(&q.id))
        .cloned()
        .collect();
    selected.sort_by_key(|q| q.id);
    selected
}

fn review_subset(all: &[QuestionRecord], review_ids: &[u32]) -> Vec<QuestionRecord> {
    all.iter()
        .filter(|q| review_ids.contains(&q.id))
        .cloned()
        .collect()
}
