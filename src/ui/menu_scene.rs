//! Main menu rendering.

use super::game_common::{centered_rect, controls_line};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serpent::menu::{MainMenu, MenuItem};
use serpent::settings::Settings;

const TITLE_ART: [&str; 3] = [
    "┏━┓┏━╸┏━┓┏━┓┏━╸┏┓╻╺┳╸",
    "┗━┓┣╸ ┣┳┛┣━┛┣╸ ┃┗┫ ┃ ",
    "┗━┛┗━╸╹┗╸╹  ┗━╸╹ ╹ ╹ ",
];

pub fn render_menu_scene(
    frame: &mut Frame,
    area: Rect,
    menu: &MainMenu,
    settings: &Settings,
    high_score: u32,
) {
    frame.render_widget(Clear, area);
    let panel = centered_rect(area, 44, 18);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Length(1), // High score
            Constraint::Length(1), // Spacer
            Constraint::Min(5),    // Items
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let title: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("High score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(high_score.to_string(), Style::default().fg(Color::Yellow)),
        ]))
        .alignment(Alignment::Center),
        chunks[1],
    );

    let items: Vec<Line> = MenuItem::ALL
        .iter()
        .map(|item| {
            let selected = *item == menu.selected_item();
            let text = if selected {
                format!("> {} <", item.label(settings))
            } else {
                item.label(settings)
            };
            let style = if selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(items).alignment(Alignment::Center),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(controls_line(&[
            ("[↑↓]", "Select"),
            ("[←→]", "Change"),
            ("[Enter]", "OK"),
            ("[Q]", "Quit"),
        ]))
        .alignment(Alignment::Center),
        chunks[4],
    );
}
