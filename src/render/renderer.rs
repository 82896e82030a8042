use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, GameState, Phase, Position};
use crate::metrics::GameMetrics;

const POPUP_WIDTH: u16 = 52;
const POPUP_HEIGHT: u16 = 9;
/// One row each for the stats line and the controls line
const CHROME_ROWS: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Columns and rows needed to draw a `grid_width` x `grid_height` grid
    /// without clipping
    pub fn required_size(grid_width: usize, grid_height: usize) -> (u16, u16) {
        // Each cell is two columns wide, plus the border
        let columns = grid_width.saturating_mul(2).saturating_add(2);
        let rows = grid_height.saturating_add(2 + CHROME_ROWS as usize);
        (
            u16::try_from(columns).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let area = frame.area();
        let (columns, rows) = Self::required_size(state.grid_width(), state.grid_height());
        if area.width < columns || area.height < rows {
            frame.render_widget(self.render_too_small(columns, rows), area);
            return;
        }

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid_area = centered(chunks[1], columns, rows - CHROME_ROWS);
        frame.render_widget(self.render_grid(state), grid_area);

        let overlay = match state.phase() {
            Phase::NotStarted => Some(self.render_title()),
            Phase::Paused => Some(self.render_paused()),
            Phase::GameOver => Some(self.render_game_over(state, metrics)),
            Phase::Running => None,
        };
        if let Some(overlay) = overlay {
            let popup = centered(chunks[1], POPUP_WIDTH, POPUP_HEIGHT);
            frame.render_widget(Clear, popup);
            frame.render_widget(overlay, popup);
        }

        let controls = self.render_controls(state.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.head();
        let mut lines = Vec::with_capacity(state.grid_height());

        for y in 0..state.grid_height() {
            let mut spans = Vec::with_capacity(state.grid_width());

            for x in 0..state.grid_width() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        head_glyph(state.direction()),
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if state.food() == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::LightBlue)),
            Span::styled(state.speed().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_too_small(&self, columns: u16, rows: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {columns}x{rows}")),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_title(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE GAME",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press SPACE to Start",
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Arrow Keys: Move • P: Pause • R: Restart",
                Style::default().fg(Color::LightBlue),
            )),
        ];

        popup(text, Color::Yellow)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press SPACE to Resume",
                Style::default().fg(Color::White),
            )),
        ];

        popup(text, Color::LightBlue)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let headline = if state.food().is_none() {
            "BOARD CLEARED"
        } else {
            "GAME OVER"
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (best {})", metrics.high_score),
                    Style::default().fg(Color::Gray),
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
                Span::styled(" to Play Again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        popup(text, Color::Red)
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let spans = match phase {
            Phase::Running | Phase::Paused => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("P", key),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
            Phase::NotStarted => vec![
                Span::styled("SPACE", key),
                Span::raw(" start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
            Phase::GameOver => vec![
                Span::styled("R", key),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "^ ",
        Direction::Down => "v ",
        Direction::Left => "< ",
        Direction::Right => "> ",
    }
}

fn popup(text: Vec<Line<'static>>, accent: Color) -> Paragraph<'static> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent)),
    )
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Snake};
    use ratatui::{Terminal, backend::TestBackend};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draw_sized(width: u16, height: u16, state: &GameState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, &GameMetrics::new()))
            .unwrap();
        terminal
    }

    fn draw(state: &GameState, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn new_game() -> (GameEngine<StdRng>, GameState) {
        let mut engine = GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(11));
        let state = engine.new_game();
        (engine, state)
    }

    #[test]
    fn test_title_overlay_before_start() {
        let (_, state) = new_game();
        let screen = draw(&state, &GameMetrics::new());

        assert!(screen.contains("SNAKE GAME"));
        assert!(screen.contains("Press SPACE to Start"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Speed: 12"));
    }

    #[test]
    fn test_running_shows_snake_and_food() {
        let (mut engine, mut state) = new_game();
        engine.start(&mut state);
        let screen = draw(&state, &GameMetrics::new());

        assert!(!screen.contains("Press SPACE to Start"));
        assert!(screen.contains("> "));
        assert!(screen.contains('●'));
    }

    #[test]
    fn test_paused_overlay() {
        let (mut engine, mut state) = new_game();
        engine.start(&mut state);
        engine.pause(&mut state);
        let screen = draw(&state, &GameMetrics::new());

        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut engine = GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(11));
        let snake = Snake::new(Position::new(9, 4), Direction::Right);
        let mut state = GameState::from_parts(
            snake,
            Some(Position::new(2, 2)),
            10,
            10,
            12,
            Phase::Running,
        );
        engine.tick(&mut state);

        let mut metrics = GameMetrics::new();
        metrics.on_game_over(state.score());
        let screen = draw(&state, &metrics);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 0"));
        assert!(screen.contains("to Play Again"));
    }

    #[test]
    fn test_default_grid_fits_standard_terminal() {
        let config = GameConfig::default();
        assert_eq!(
            Renderer::required_size(config.grid_width, config.grid_height),
            (54, 24)
        );

        // Food on the last inset row, the snake in the opposite corner
        let state = GameState::from_parts(
            Snake::new(Position::new(24, 1), Direction::Up),
            Some(Position::new(5, 18)),
            config.grid_width,
            config.grid_height,
            config.base_speed,
            Phase::Running,
        );
        let terminal = draw_sized(80, 24, &state);
        let buffer = terminal.backend().buffer();

        // Grid block spans columns 13..67 and rows 1..23
        assert_eq!(buffer[(13, 1)].symbol(), "╔");
        assert_eq!(buffer[(66, 22)].symbol(), "╝");
        assert_eq!(buffer[(14 + 5 * 2, 2 + 18)].symbol(), "●");
        assert_eq!(buffer[(14 + 24 * 2, 2 + 1)].symbol(), "^");
    }

    #[test]
    fn test_too_small_terminal_shows_notice() {
        let (_, state) = new_game();
        let terminal = draw_sized(20, 10, &state);

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
        }
        assert!(text.contains("Terminal too small"));
        assert!(text.contains("need 22x14"));
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 3, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 6, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
