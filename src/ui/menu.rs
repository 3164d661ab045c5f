use crate::app::{ConfigForm, MenuField};
use crate::models::{LoadStatus, QuizMode};
use crate::ui::layout::calculate_menu_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn field_value(form: &ConfigForm, field: MenuField) -> String {
    let config = &form.config;
    match field {
        MenuField::Mode => config.mode.label().to_string(),
        MenuField::Count => config.count.to_string(),
        MenuField::IntervalStart => config.interval_start.to_string(),
        MenuField::IntervalEnd => config.interval_end.to_string(),
        MenuField::Timer => format!("{} min", config.timer_minutes),
        MenuField::AutoSave => {
            if config.auto_save_wrong {
                "ON".to_string()
            } else {
                "OFF".to_string()
            }
        }
    }
}

fn status_line(load_status: &LoadStatus, form: &ConfigForm, review_len: usize) -> Line<'static> {
    match load_status {
        LoadStatus::Idle if form.config.mode == QuizMode::Review && review_len == 0 => {
            Line::from(Span::styled(
                "Review list is empty",
                Style::default().fg(Color::Yellow),
            ))
        }
        LoadStatus::Idle | LoadStatus::Ready(_) => {
            Line::from(format!("{} questions in review list", review_len))
        }
        LoadStatus::Loading => Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow),
        )),
        LoadStatus::Failed(reason) => Line::from(Span::styled(
            format!("Could not load questions (Enter to retry): {}", reason),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    }
}

pub fn draw_menu(f: &mut Frame, form: &ConfigForm, load_status: &LoadStatus, review_len: usize) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new("Set up your quiz")
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    let selected = form.selected_field();
    let items: Vec<ListItem> = form
        .fields()
        .into_iter()
        .map(|field| {
            let value = field_value(form, field);
            let value_style = match field {
                MenuField::AutoSave if form.config.auto_save_wrong => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                MenuField::AutoSave => {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                }
                _ => Style::default(),
            };
            let marker = if field == selected { "> " } else { "  " };
            let label_style = if field == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:<26}", marker, field.label()), label_style),
                Span::styled(format!("< {} >", value), value_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Configuration"),
    );
    f.render_widget(list, layout.form_area);

    let status = Paragraph::new(status_line(load_status, form, review_len))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let help_text = vec![Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::from(" Field  "),
        Span::styled("←/→", key_style()),
        Span::from(" Change  "),
        Span::styled("0-9", key_style()),
        Span::from(" Type bound  "),
        Span::styled("Space", key_style()),
        Span::from(" Auto-save  "),
        Span::styled("Enter", key_style()),
        Span::from(" Start  "),
        Span::styled("Esc", key_style()),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
