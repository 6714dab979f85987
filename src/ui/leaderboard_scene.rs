//! Leaderboard table.

use super::game_common::{centered_rect, controls_line};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use serpent::leaderboard::Leaderboard;

pub fn render_leaderboard_scene(
    frame: &mut Frame,
    area: Rect,
    leaderboard: &Leaderboard,
    highlight: Option<usize>,
) {
    frame.render_widget(Clear, area);
    let panel = centered_rect(area, 64, 18);

    let block = Block::default()
        .title(" Leaderboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if inner.height < 2 {
        return;
    }
    let table_area = Rect {
        height: inner.height - 1,
        ..inner
    };
    let controls_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };

    if leaderboard.is_empty() {
        frame.render_widget(
            Paragraph::new("No scores yet. Go eat something!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(ratatui::layout::Alignment::Center),
            table_area,
        );
    } else {
        let header = Row::new(["#", "Name", "Score", "Level", "Date"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = leaderboard.entries().iter().enumerate().map(|(i, e)| {
            let style = if Some(i) == highlight {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new([
                Cell::from(format!("{}", i + 1)),
                Cell::from(e.name.clone()),
                Cell::from(e.score.to_string()),
                Cell::from(e.difficulty.map(|d| d.name()).unwrap_or("-")),
                Cell::from(e.date_label()),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(17),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .column_spacing(2);
        frame.render_widget(table, table_area);
    }

    frame.render_widget(
        Paragraph::new(controls_line(&[("[Esc/Enter]", "Back")]))
            .alignment(ratatui::layout::Alignment::Center),
        controls_area,
    );
}
