use crate::models::AnswerOption;
use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::format_countdown;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Colour for an option once the question has been answered: the pick is green or
/// red, and the right option is tinted when the pick was wrong.
fn option_style(option: AnswerOption, chosen: Option<AnswerOption>, correct: AnswerOption) -> Style {
    match chosen {
        Some(pick) if pick == option && option == correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(pick) if pick == option => Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Some(_) if option == correct => Style::default().fg(Color::Green),
        _ => Style::default(),
    }
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());
    let Some(question) = session.current_question() else {
        return;
    };

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout.header_area);

    let progress = format!(
        "Question {} / {}",
        session.current_index() + 1,
        session.questions().len()
    );
    let header = Paragraph::new(progress)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, header_chunks[0]);

    let clock = Paragraph::new(format!("⏱ {}", format_countdown(session.remaining_seconds())))
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(clock, header_chunks[1]);

    let prompt = Paragraph::new(format!("{}. {}", question.id, question.prompt))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let chosen = session.current_answer();
    let mut options = Text::default();
    for option in AnswerOption::ALL {
        options.push_line(Line::from(Span::styled(
            format!("{}) {}", option, question.option_text(option)),
            option_style(option, chosen, question.correct),
        )));
        options.push_line(Line::from(""));
    }
    let options = Paragraph::new(options)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let mut nav_spans = vec![Span::styled("a/b/c", key_style()), Span::from(" Answer  ")];
    if !session.is_first() {
        nav_spans.extend([Span::styled("←", key_style()), Span::from(" Previous  ")]);
    }
    if session.is_last() {
        nav_spans.extend([Span::styled("Enter", key_style()), Span::from(" Conclude  ")]);
    } else {
        nav_spans.extend([Span::styled("→/Enter", key_style()), Span::from(" Next  ")]);
    }
    nav_spans.extend([Span::styled("Esc", key_style()), Span::from(" Quit to Menu")]);

    let help_text = vec![
        Line::from(nav_spans),
        Line::from(vec![Span::styled("Ctrl+C", key_style()), Span::from(" Exit App")]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Abandon this quiz and return to the menu?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
