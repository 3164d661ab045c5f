pub mod layout;
mod menu;
mod quiz;
mod summary;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

pub use layout::{calculate_menu_chunks, calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.state {
        AppState::Menu => draw_menu(f, &app.form, &app.load_status, app.review.len()),
        AppState::Quiz => {
            if let Some(session) = &app.session {
                draw_quiz(f, session);
            }
        }
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Summary => {
            if let Some(summary) = &app.summary {
                draw_summary(
                    f,
                    summary,
                    &app.review,
                    app.summary_cursor,
                    &mut app.summary_scroll,
                    app.status_message.as_deref(),
                );
            }
        }
    }
}
