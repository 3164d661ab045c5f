use crate::db;
use crate::error::QuizError;
use crate::logger;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

pub const REVIEW_LIST_KEY: &str = "reviewList";

/// Backing storage for the review list. Every save replaces the whole list.
pub trait ReviewStore {
    fn load(&self) -> Result<Vec<u32>, QuizError>;
    fn save(&self, ids: &[u32]) -> Result<(), QuizError>;
}

/// Stores the list as a JSON array under a single key of the local database.
pub struct SqliteReviewStore {
    conn: Connection,
}

impl SqliteReviewStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl ReviewStore for SqliteReviewStore {
    fn load(&self) -> Result<Vec<u32>, QuizError> {
        let Some(raw) = db::get_value(&self.conn, REVIEW_LIST_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<u32>>(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                logger::log(&format!("Ignoring unreadable review list: {}", e));
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, ids: &[u32]) -> Result<(), QuizError> {
        let encoded = serde_json::to_string(ids)?;
        db::set_value(&self.conn, REVIEW_LIST_KEY, &encoded)?;
        Ok(())
    }
}

/// Keeps the list in process memory only. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviewStore {
    ids: Rc<RefCell<Vec<u32>>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<u32> {
        self.ids.borrow().clone()
    }
}

impl ReviewStore for MemoryReviewStore {
    fn load(&self) -> Result<Vec<u32>, QuizError> {
        Ok(self.ids.borrow().clone())
    }

    fn save(&self, ids: &[u32]) -> Result<(), QuizError> {
        *self.ids.borrow_mut() = ids.to_vec();
        Ok(())
    }
}

/// Question ids the user wants to revisit.
///
/// The in-memory list is the source of truth for the running process. Each
/// mutation is written through to the store in full; a failed write still leaves
/// the in-memory change in place and reports the error to the caller.
pub struct ReviewList {
    ids: Vec<u32>,
    store: Box<dyn ReviewStore>,
}

impl ReviewList {
    /// Loads the persisted list. A store that cannot be read yields an empty list.
    pub fn open(store: Box<dyn ReviewStore>) -> Self {
        let ids = store.load().unwrap_or_else(|e| {
            logger::log(&format!("Could not load review list: {}", e));
            Vec::new()
        });
        Self { ids, store }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Appends `id` without checking for duplicates.
    pub fn record_wrong(&mut self, id: u32) -> Result<(), QuizError> {
        self.ids.push(id);
        self.persist()
    }

    /// Removes every occurrence of `id` when present, otherwise appends it.
    /// Returns whether the id is flagged afterwards.
    pub fn toggle(&mut self, id: u32) -> Result<bool, QuizError> {
        let flagged = if self.contains(id) {
            self.ids.retain(|&existing| existing != id);
            false
        } else {
            self.ids.push(id);
            true
        };
        self.persist()?;
        Ok(flagged)
    }

    fn persist(&self) -> Result<(), QuizError> {
        self.store.save(&self.ids).inspect_err(|e| {
            logger::log(&format!("Could not save review list: {}", e));
        })
    }
}
