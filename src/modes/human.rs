use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Time the victory banner has been up
    victory_shown: Option<Duration>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            victory_shown: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation polls at 60 Hz; the replay cadence comes from measured time
        let mut tick_timer = interval(Duration::from_millis(16));
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    self.update_game(now - last_tick);
                    last_tick = now;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_key_action(action);
        }

        Ok(())
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        // The won round is about to be replaced; only reset and quit apply
        if self.victory_shown.is_some()
            && matches!(
                action,
                KeyAction::Append(_) | KeyAction::Undo | KeyAction::Run
            )
        {
            return;
        }

        match action {
            KeyAction::Append(command) => {
                if self.state.push_command(command) {
                    debug!(
                        command = command.label(),
                        len = self.state.program.len(),
                        "command_appended"
                    );
                }
            }
            KeyAction::Undo => {
                if let Some(command) = self.state.undo_command() {
                    debug!(
                        command = command.label(),
                        len = self.state.program.len(),
                        "command_undone"
                    );
                }
            }
            KeyAction::Run => {
                if self.state.start_replay() {
                    self.metrics.on_program_started();
                    info!(commands = self.state.program.len(), "replay_started");
                }
            }
            KeyAction::Reset => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self, dt: Duration) {
        if let Some(shown) = self.victory_shown.as_mut() {
            *shown += dt;
            if *shown >= self.engine.config().victory_pause() {
                self.reset_game();
            }
            return;
        }

        let result = self.engine.advance(&mut self.state, dt);

        if result.won {
            info!(
                commands = self.state.program.len(),
                time = %self.metrics.format_time(),
                "round_won"
            );
            self.metrics.on_round_won();
            self.victory_shown = Some(Duration::ZERO);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_round_start();
        self.victory_shown = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, Position, TreasureSet};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn test_mode() -> HumanMode {
        HumanMode::new(GameConfig::small())
    }

    #[test]
    fn test_game_initialization() {
        let mode = test_mode();
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.treasures.len(), 5);
        assert!(!mode.state.is_running());
    }

    #[test]
    fn test_keys_build_program() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        mode.handle_event(key(KeyCode::Left)).unwrap();
        mode.handle_event(key(KeyCode::Right)).unwrap();
        mode.handle_event(key(KeyCode::Backspace)).unwrap();

        assert_eq!(
            mode.state.program.as_slice(),
            &[Command::Forward, Command::TurnLeft]
        );
    }

    #[test]
    fn test_editing_locked_while_running() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        assert!(mode.state.is_running());
        assert_eq!(mode.metrics.programs_run, 1);

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        mode.handle_event(key(KeyCode::Backspace)).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(mode.state.program.len(), 1);
        assert_eq!(mode.metrics.programs_run, 1);
    }

    #[test]
    fn test_victory_pause_then_reset() {
        let mut mode = test_mode();
        mode.state = GameState::new(TreasureSet::from_cells([Position::new(1, 0)]), 5, 5);
        mode.apply_key_action(KeyAction::Append(Command::Forward));
        mode.apply_key_action(KeyAction::Run);

        mode.update_game(Duration::from_millis(800));
        assert!(mode.state.is_won());
        assert_eq!(mode.metrics.rounds_won, 1);

        // Banner stays up for the configured pause
        mode.update_game(Duration::from_millis(2999));
        assert!(mode.state.is_won());

        mode.update_game(Duration::from_millis(1));
        assert!(!mode.state.is_won());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.treasures.len(), 5);
        assert!(mode.state.program.is_empty());
    }

    #[test]
    fn test_editing_ignored_during_victory_banner() {
        let mut mode = test_mode();
        mode.state = GameState::new(TreasureSet::from_cells([Position::new(1, 0)]), 5, 5);
        mode.apply_key_action(KeyAction::Append(Command::Forward));
        mode.apply_key_action(KeyAction::Append(Command::TurnLeft));
        mode.apply_key_action(KeyAction::Run);
        mode.update_game(Duration::from_millis(800));
        assert!(mode.state.is_won());

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        mode.handle_event(key(KeyCode::Backspace)).unwrap();
        mode.handle_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(
            mode.state.program.as_slice(),
            &[Command::Forward, Command::TurnLeft]
        );

        // Reset still cuts the banner short
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert!(!mode.state.is_won());
        assert!(mode.victory_shown.is_none());

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.state.program.as_slice(), &[Command::Forward]);
    }

    #[test]
    fn test_reset_during_replay() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert!(!mode.state.is_running());
        assert!(mode.state.program.is_empty());
        assert_eq!(mode.state.robot.position, Position::ORIGIN);
    }

    #[test]
    fn test_quit() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
