//! Game screen rendering.
//!
//! Uses half-block pixel rendering. Each grid cell maps to a colored pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colors.

use super::game_common::{
    centered_rect, create_game_layout, render_game_over_overlay, render_info_panel_frame,
    render_status_bar,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serpent::game::{FoodKind, RunState, Snapshot};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Snake gradient colors ────────────────────────────────────────────
const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

pub fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Normal => Color::Rgb(255, 80, 40),
        FoodKind::Speed => Color::Rgb(255, 220, 40),
        FoodKind::Slow => Color::Rgb(80, 160, 255),
        FoodKind::Double => Color::Rgb(220, 90, 255),
    }
}

/// Render the game screen.
pub fn render_game_scene(frame: &mut Frame, area: Rect, snapshot: &Snapshot, high_score: u32) {
    let layout = create_game_layout(frame, area, " Serpent ", Color::LightGreen, 10, 22);

    render_play_field(frame, layout.content, snapshot);

    if snapshot.state == RunState::Paused {
        render_banner(frame, layout.content, "PAUSED", Color::Yellow);
    }

    render_status_bar_content(frame, layout.status_bar, snapshot);
    render_info_panel(frame, layout.info_panel, snapshot, high_score);
}

fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Build the pixel grid for a snapshot. Off-board segments (a head that
/// just hit the wall) are skipped.
fn build_pixels(snapshot: &Snapshot) -> Vec<Vec<Option<Color>>> {
    let size = snapshot.grid_size.max(0) as usize;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; size]; size];

    let food = snapshot.food.position;
    if food.in_bounds(snapshot.grid_size) {
        pixels[food.y as usize][food.x as usize] = Some(food_color(snapshot.food.kind));
    }

    let snake_len = snapshot.snake.len();
    // Tail first so the head wins if it overlaps its own body.
    for (i, seg) in snapshot.snake.iter().enumerate().rev() {
        if !seg.in_bounds(snapshot.grid_size) {
            continue;
        }
        pixels[seg.y as usize][seg.x as usize] = Some(if i == 0 {
            HEAD_COLOR
        } else {
            body_color(i, snake_len)
        });
    }
    pixels
}

fn render_play_field(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = build_pixels(snapshot);
    let grid = pixels.len();

    let content_rows = grid.div_ceil(2);
    let render_w = ((grid + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(BORDER_COLOR);

    // ── Top border with score ───────────────────────────────────
    {
        let score_val = snapshot.score.to_string();
        let label = "Score: ";
        let score_full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_full_len);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_TL.to_string(), border)];
        if pad_before > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_before).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(label, border));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_after).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(BORDER_TR.to_string(), border));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, y_off, render_w, 1),
        );
    }

    // ── Board rows ──────────────────────────────────────────────
    let empty_row: Vec<Option<Color>> = vec![None; grid];
    for term_row in 0..content_rows {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch consecutive cells with the same colors into one span.
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(BORDER_V.to_string(), border));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat(BORDER_H).take(inner_w));
        s.push(BORDER_BR);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(s, border))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

/// Small boxed message centered on the board.
fn render_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    if area.height < 3 || area.width < 10 {
        return;
    }
    let banner = centered_rect(area, text.len() as u16 + 6, 3);
    frame.render_widget(Clear, banner);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, banner);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    match snapshot.state {
        RunState::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[Space/P/Esc]", "Resume"), ("[R]", "Restart"), ("[Q]", "Menu")],
        ),
        _ => render_status_bar(
            frame,
            area,
            "Slither!",
            Color::Green,
            &[("[Arrows/WASD]", "Move"), ("[Space/P/Esc]", "Pause")],
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot, high_score: u32) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(
                snapshot.difficulty.name(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(high_score.max(snapshot.score).to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(snapshot.snake.len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.tick_interval_ms), value),
        ]),
        Line::from(vec![
            Span::styled("Multiplier: ", label),
            Span::styled(
                format!("x{}", snapshot.multiplier),
                if snapshot.multiplier > 1 {
                    Style::default().fg(food_color(FoodKind::Double))
                } else {
                    value
                },
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Effects:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if snapshot.active_effects.is_empty() {
        lines.push(Line::from(Span::styled(" none", label)));
    }
    for effect in &snapshot.active_effects {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<7}", effect.kind.name()), value),
            Span::styled(
                format!("{:.1}s", effect.remaining_ms as f64 / 1000.0),
                label,
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Food:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for kind in FoodKind::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(food_color(kind)),
            ),
            Span::styled(format!("{:<7}", kind.name()), label),
            Span::styled(format!("{:>3}", kind.points()), value),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Game over screen: final score, collision reason and rank if recorded.
pub fn render_game_over_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    previous_best: u32,
    rank: Option<usize>,
) {
    let reason = match snapshot.state {
        RunState::GameOver { reason } => reason.describe(),
        _ => "",
    };
    let new_best = snapshot.score > previous_best;

    let mut details = vec![
        Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {}", snapshot.score),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Length: {}", snapshot.snake.len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if new_best {
        details.push(Line::from(Span::styled(
            "New high score!",
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(rank) = rank {
        details.push(Line::from(Span::styled(
            format!("Leaderboard rank #{}", rank + 1),
            Style::default().fg(Color::Yellow),
        )));
    }

    render_game_over_overlay(
        frame,
        area,
        Color::Red,
        "GAME OVER",
        &details,
        &[("[R]", "Restart"), ("[L]", "Leaderboard"), ("[Q]", "Menu")],
    );
}
