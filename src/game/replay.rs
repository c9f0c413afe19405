use std::time::Duration;

use super::config::StepPolicy;

/// Progress of the replay through the program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayCursor {
    /// Index of the next command to apply
    pub index: usize,
    /// Time accumulated since the last applied command
    pub elapsed: Duration,
    pub running: bool,
}

impl ReplayCursor {
    /// Rewind to the first command and start the clock
    pub fn start(&mut self) {
        *self = Self {
            running: true,
            ..Self::default()
        };
    }

    /// Back to idle, rewound
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Accumulate `dt` of wall-clock time
    pub fn accumulate(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Whether a command is due, given `len` commands in the program
    pub fn is_due(&self, interval: Duration, len: usize) -> bool {
        self.running && self.elapsed >= interval && self.index < len
    }

    /// Record one applied command
    pub fn consume(&mut self, interval: Duration, policy: StepPolicy) {
        self.index += 1;
        self.elapsed -= interval;

        // A stalled poll under the single policy must not queue up extra steps
        if policy == StepPolicy::Single && self.elapsed >= interval {
            self.elapsed = Duration::ZERO;
        }
    }
}
