//! Name entry after every finished run.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serpent::input::NameInput;

/// `qualifies` picks the title; a score that misses the table is still
/// offered the prompt and dropped on save.
pub fn render_name_entry(
    frame: &mut Frame,
    area: Rect,
    input: &NameInput,
    score: u32,
    qualifies: bool,
) {
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(2), // Score
            Constraint::Length(4), // Input label + field
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Rules
            Constraint::Length(2), // Validation
            Constraint::Min(0),
            Constraint::Length(1), // Controls
        ])
        .split(area);

    let title_text = if qualifies {
        "New High Score!"
    } else {
        "Game Over"
    };
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let score_line = Paragraph::new(Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            score.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(score_line, chunks[1]);

    frame.render_widget(
        Paragraph::new("Enter your name:").alignment(Alignment::Center),
        chunks[2],
    );

    let input_area = Rect {
        x: chunks[2].x + (chunks[2].width.saturating_sub(30)) / 2,
        y: chunks[2].y + 1,
        width: 30.min(chunks[2].width),
        height: 3.min(chunks[2].height.saturating_sub(1)),
    };
    let input_widget = Paragraph::new(input.display_text())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(input_widget, input_area);

    let rules = vec![
        Line::from("• 1-16 characters"),
        Line::from("• Letters, numbers, spaces, hyphens, underscores"),
        Line::from("• Leave empty to skip"),
    ];
    frame.render_widget(
        Paragraph::new(rules)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[4],
    );

    let validation_text = if let Some(error) = &input.validation_error {
        Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if !input.text.trim().is_empty() {
        Line::from(Span::styled(
            "✓ Name is valid",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(
        Paragraph::new(validation_text).alignment(Alignment::Center),
        chunks[5],
    );

    frame.render_widget(
        Paragraph::new("[Enter] Save    [Esc] Skip")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[7],
    );
}
