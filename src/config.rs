use crate::csv::DEFAULT_QUESTIONS_PATH;
use crate::db;
use crate::logger::DEFAULT_LOG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Multiple-choice quiz trainer with a review list", long_about = None)]
pub struct Args {
    /// CSV file with Numero, Domanda, A, B, C and Corretta columns
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    pub questions: PathBuf,

    /// SQLite database holding the review list
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Keep the review list in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Debug log destination
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(db::get_db_path)
    }
}
