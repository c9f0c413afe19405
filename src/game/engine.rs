use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    command::Command,
    config::{GameConfig, StepPolicy},
    state::{GameState, Position, TreasureSet},
};

/// Information about one replayed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Command that was applied
    pub command: Command,
    /// Index of the command in the program
    pub index: usize,
    /// Cell of a treasure picked up by this command
    pub collected: Option<Position>,
}

/// Result of advancing the game clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Commands applied during this tick, in order
    pub steps: Vec<StepInfo>,
    /// Whether the replay went back to idle during this tick
    pub finished: bool,
    /// Whether the last treasure was collected during this tick
    pub won: bool,
}

impl TickResult {
    pub fn collected(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().filter_map(|step| step.collected)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    ///
    /// The configuration is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: robot home, new treasures, empty program
    pub fn reset(&mut self) -> GameState {
        let treasures = TreasureSet::generate(
            &mut self.rng,
            self.config.treasure_count,
            self.config.grid_width,
            self.config.grid_height,
            Position::ORIGIN,
            self.config.max_resample_attempts,
        );
        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            treasures = treasures.len(),
            "round_reset"
        );

        GameState::new(treasures, self.config.grid_width, self.config.grid_height)
    }

    /// Advance the replay clock by `dt` and apply whatever commands fall due
    pub fn advance(&mut self, state: &mut GameState, dt: Duration) -> TickResult {
        let mut result = TickResult::default();
        if !state.is_running() {
            return result;
        }

        let interval = self.config.step_interval();
        state.cursor.accumulate(dt);

        while state.cursor.is_due(interval, state.program.len()) {
            let index = state.cursor.index;
            let Some(command) = state.program.get(index) else {
                break;
            };

            state
                .robot
                .execute(command, state.grid_width, state.grid_height);
            debug_assert!(state.is_in_bounds(state.robot.position));
            let collected = state.collect_treasure();
            state.cursor.consume(interval, self.config.step_policy);

            debug!(
                index,
                command = command.label(),
                x = state.robot.position.x,
                y = state.robot.position.y,
                "command_applied"
            );
            if let Some(pos) = collected {
                info!(x = pos.x, y = pos.y, score = state.score, "treasure_collected");
            }
            result.steps.push(StepInfo {
                command,
                index,
                collected,
            });

            if state.is_won() {
                result.won = true;
                break;
            }
            if self.config.step_policy == StepPolicy::Single {
                break;
            }
        }

        if result.won || state.cursor.index >= state.program.len() {
            state.cursor.stop();
            result.finished = true;
            info!(
                commands = state.program.len(),
                score = state.score,
                won = result.won,
                "replay_finished"
            );
        }

        result
    }
}
