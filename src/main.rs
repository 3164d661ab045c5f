use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use interactive_quiz::config::Args;
use interactive_quiz::{App, MemoryReviewStore, ReviewList, ReviewStore, SqliteReviewStore};
use interactive_quiz::{db, logger, ui};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Instant;

fn open_review_store(args: &Args) -> Box<dyn ReviewStore> {
    if args.ephemeral {
        return Box::new(MemoryReviewStore::new());
    }
    let db_path = args.db_path();
    match db::init_db(&db_path) {
        Ok(conn) => Box::new(SqliteReviewStore::new(conn)),
        Err(e) => {
            logger::log(&format!(
                "Could not open {}: {}; review list kept in memory",
                db_path.display(),
                e
            ));
            Box::new(MemoryReviewStore::new())
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Show the loading state before the question file is read.
        if app.has_pending_start() {
            terminal.draw(|f| ui::draw(f, app))?;
        }
        app.update(Instant::now());
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logger::init(&args.log_file);

    let review = ReviewList::open(open_review_store(&args));
    let mut app = App::new(args.questions.clone(), review, StdRng::from_entropy());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
