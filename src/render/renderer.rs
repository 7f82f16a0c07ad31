use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
    Frame,
};

use super::hud::{Banner, Hud};
use crate::game::{Position, Snapshot};

pub const LIGHT_GREEN: Color = Color::Rgb(0x3f, 0xa3, 0x4d);
pub const DARK_GREEN: Color = Color::Rgb(0x1f, 0x52, 0x2a);
pub const FOOD_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Blue;

/// Color of one grid cell: checkerboard, then food, then snake on top
pub fn cell_color(snapshot: &Snapshot<'_>, pos: Position) -> Color {
    if snapshot.snake.contains(&pos) {
        SNAKE_COLOR
    } else if pos == snapshot.food {
        FOOD_COLOR
    } else if (pos.x + pos.y) % 2 == 0 {
        LIGHT_GREEN
    } else {
        DARK_GREEN
    }
}

/// The grid, each cell `cell_width` columns wide and one row tall
pub struct Board<'a> {
    snapshot: &'a Snapshot<'a>,
    cell_width: u16,
}

impl<'a> Board<'a> {
    pub fn new(snapshot: &'a Snapshot<'a>, cell_width: u16) -> Self {
        Self {
            snapshot,
            cell_width: cell_width.max(1),
        }
    }

    /// Size in terminal cells, without any border
    pub fn size(&self) -> (u16, u16) {
        let cells = self.snapshot.grid_size.min(u16::MAX as usize) as u16;
        (cells.saturating_mul(self.cell_width), cells)
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let grid = self.snapshot.grid_size;

        for row in 0..area.height {
            let y = row as usize;
            if y >= grid {
                break;
            }
            for col in 0..area.width {
                let x = (col / self.cell_width) as usize;
                if x >= grid {
                    break;
                }
                let color = cell_color(self.snapshot, Position::new(x as i32, y as i32));
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}

pub struct Renderer {
    cell_width: u16,
}

impl Renderer {
    pub fn new(cell_width: u16) -> Self {
        Self { cell_width }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot<'_>, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(hud), chunks[0]);

        let board = Board::new(snapshot, self.cell_width);
        let (width, height) = board.size();
        let outer = centered(chunks[1], width.saturating_add(2), height.saturating_add(2));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(outer);
        frame.render_widget(block, outer);
        frame.render_widget(board, inner);

        match hud.banner {
            Banner::PressAnyKey => {
                let popup = centered(inner, 30, 3);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_start_prompt(), popup);
            }
            Banner::GameOver { final_score } => {
                let popup = centered(inner, 36, 7);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(final_score), popup);
            }
            Banner::Playing => {}
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_stats(&self, hud: &Hud) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                hud.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                hud.metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_prompt(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "Press any key to start",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_game_over(&self, final_score: u32) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Points Earned: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
