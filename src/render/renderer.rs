use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Command, CommandQueue, Direction as Facing, GameState, Position};
use crate::metrics::SessionMetrics;

/// Commands shown on the program line
const PROGRAM_PREVIEW_LEN: usize = 10;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(5), // Control panel
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(state);
        frame.render_widget(grid, chunks[1]);

        if state.is_won() {
            let banner_area = centered(chunks[1], 40, 5);
            frame.render_widget(Clear, banner_area);
            frame.render_widget(self.render_victory(), banner_area);
        }

        let panel = self.render_control_panel(state);
        frame.render_widget(panel, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.robot.position {
                    Span::styled(
                        format!("{} ", robot_glyph(state.robot.direction)),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.treasures.contains(pos) {
                    Span::styled(
                        "◆ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Robot Treasure "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Treasures Found: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", state.score, state.treasure_total),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Wins: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.rounds_won.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Programs: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.programs_run.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_best(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_control_panel(&self, state: &GameState) -> Paragraph<'_> {
        let mut text = Vec::new();

        if state.is_running() {
            text.push(Line::from(Span::styled(
                format!(
                    "Executing command {} of {}",
                    state.cursor.index + 1,
                    state.program.len()
                ),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            text.push(Line::from(vec![
                Span::styled("SPACE", Style::default().fg(Color::Cyan)),
                Span::raw(" forward | "),
                Span::styled("←", Style::default().fg(Color::Cyan)),
                Span::raw(" turn left | "),
                Span::styled("→", Style::default().fg(Color::Cyan)),
                Span::raw(" turn right | "),
                Span::styled("BACKSPACE", Style::default().fg(Color::Cyan)),
                Span::raw(" undo"),
            ]));
            text.push(Line::from(vec![
                Span::styled("ENTER", Style::default().fg(Color::Green)),
                Span::raw(" run your program | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" reset | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]));
        }

        if !state.program.is_empty() {
            text.push(Line::from(Span::styled(
                program_line(&state.program),
                Style::default().fg(Color::Magenta),
            )));
        }

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }

    fn render_victory(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "YOU WON! Great Programming!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn robot_glyph(direction: Facing) -> char {
    match direction {
        Facing::Right => '▶',
        Facing::Down => '▼',
        Facing::Left => '◀',
        Facing::Up => '▲',
    }
}

/// The tail of the program, with an ellipsis when older commands are hidden
fn program_line(program: &CommandQueue) -> String {
    let shown: Vec<&str> = program
        .tail(PROGRAM_PREVIEW_LEN)
        .iter()
        .map(Command::label)
        .collect();
    let joined = shown.join(" → ");

    if program.len() > PROGRAM_PREVIEW_LEN {
        format!("Program: ... → {joined}")
    } else {
        format!("Program: {joined}")
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TreasureSet;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &GameState) -> String {
        screen_text_with(state, &SessionMetrics::new())
    }

    fn screen_text_with(state: &GameState, metrics: &SessionMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, state, metrics))
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

    #[test]
    fn test_program_line() {
        let program: CommandQueue = [Command::Forward, Command::TurnRight].into_iter().collect();
        assert_eq!(program_line(&program), "Program: FORWARD → RIGHT");

        let long: CommandQueue = [Command::TurnLeft; 12].into_iter().collect();
        let line = program_line(&long);
        assert!(line.starts_with("Program: ... → LEFT"));
        assert_eq!(line.matches("LEFT").count(), PROGRAM_PREVIEW_LEN);
    }

    #[test]
    fn test_idle_screen() {
        let mut state = GameState::new(TreasureSet::from_cells([Position::new(2, 1)]), 5, 4);
        state.push_command(Command::Forward);
        let text = screen_text(&state);

        assert!(text.contains("Treasures Found: 0/1"));
        assert!(text.contains('▶'));
        assert!(text.contains('◆'));
        assert!(text.contains("Program: FORWARD"));
        assert!(text.contains("run your program"));
    }

    #[test]
    fn test_header_shows_session_stats() {
        let state = GameState::new(TreasureSet::from_cells([Position::new(2, 1)]), 5, 4);
        let mut metrics = SessionMetrics::new();
        metrics.on_program_started();
        metrics.on_program_started();
        metrics.rounds_won = 1;

        let text = screen_text_with(&state, &metrics);
        assert!(text.contains("Programs: 2"));
        assert!(text.contains("Wins: 1"));
    }

    #[test]
    fn test_running_screen() {
        let mut state = GameState::new(TreasureSet::from_cells([Position::new(2, 1)]), 5, 4);
        state.push_command(Command::TurnRight);
        state.push_command(Command::Forward);
        state.start_replay();
        state.robot.turn_right();

        let text = screen_text(&state);
        assert!(text.contains("Executing command 1 of 2"));
        assert!(text.contains('▼'));
    }

    #[test]
    fn test_victory_banner() {
        let mut state = GameState::new(TreasureSet::from_cells([Position::new(1, 0)]), 5, 4);
        state.robot.advance(5, 4);
        state.collect_treasure();

        let text = screen_text(&state);
        assert!(text.contains("YOU WON! Great Programming!"));
        assert!(text.contains("Treasures Found: 1/1"));
    }
}
