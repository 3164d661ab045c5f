use crate::review::ReviewList;
use crate::summary::{QuestionOutcome, QuizSummary};
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{scroll_offset, truncate_string};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

const LINES_PER_ROW: usize = 4;

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn outcome_lines(
    outcome: &QuestionOutcome,
    flagged: bool,
    selected: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let question = &outcome.question;
    let heading_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "> " } else { "  " };

    let verdict = if outcome.is_correct {
        Span::styled("   Correct answer", Style::default().fg(Color::Green))
    } else {
        let given = outcome
            .user_answer
            .map(|a| format!("{}) {}", a, question.option_text(a)))
            .unwrap_or_else(|| "-".to_string());
        Span::styled(
            truncate_string(&format!("   Your answer: {}", given), width),
            Style::default().fg(Color::Red),
        )
    };

    vec![
        Line::from(Span::styled(
            truncate_string(
                &format!("{}{}. {}", marker, question.id, question.prompt),
                width,
            ),
            heading_style,
        )),
        Line::from(truncate_string(
            &format!(
                "   Correct: {}) {}",
                question.correct,
                question.option_text(question.correct)
            ),
            width,
        )),
        Line::from(verdict),
        Line::from(format!(
            "   [{}] Mark for review",
            if flagged { "x" } else { " " }
        )),
    ]
}

pub fn draw_summary(
    f: &mut Frame,
    summary: &QuizSummary,
    review: &ReviewList,
    cursor: usize,
    scroll: &mut usize,
    status: Option<&str>,
) {
    let layout = calculate_summary_chunks(f.area());

    let score = vec![
        Line::from(vec![
            Span::styled(
                summary.correct_count.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" correct   "),
            Span::styled(
                summary.wrong_count.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" wrong"),
        ]),
        Line::from(Span::styled(
            format!("{}% correct", summary.percentage),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} questions", summary.total())),
    ];
    let score = Paragraph::new(score)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(score, layout.score_area);

    let inner_height = layout.content_area.height.saturating_sub(2) as usize;
    let inner_width = layout.content_area.width.saturating_sub(2) as usize;
    let visible_rows = (inner_height / LINES_PER_ROW).max(1);
    *scroll = scroll_offset(cursor, *scroll, visible_rows);

    let mut text = Text::default();
    if summary.outcomes.is_empty() {
        text.push_line(Line::from(Span::styled(
            "No questions in this quiz",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for (i, outcome) in summary
        .outcomes
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_rows)
    {
        let flagged = review.contains(outcome.question.id);
        for line in outcome_lines(outcome, flagged, i == cursor, inner_width) {
            text.push_line(line);
        }
    }
    let details = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Quiz review"),
    );
    f.render_widget(details, layout.content_area);

    let footer = match status {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            Span::styled("↑/↓", key_style()),
            Span::from(" Select  "),
            Span::styled("Space", key_style()),
            Span::from(" Toggle review  "),
            Span::styled("m", key_style()),
            Span::from(" Main Menu  "),
            Span::styled("Esc", key_style()),
            Span::from(" Quit"),
        ]),
    };
    let help = Paragraph::new(footer)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
