use std::time::{Duration, Instant};

pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_won: u32,
    pub programs_run: u32,
    /// Fastest winning round so far
    pub best_time: Option<Duration>,
    /// Set once the round is won so the clock stops
    frozen: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_won: 0,
            programs_run: 0,
            best_time: None,
            frozen: false,
        }
    }

    pub fn update(&mut self) {
        if !self.frozen {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.frozen = false;
    }

    pub fn on_program_started(&mut self) {
        self.programs_run += 1;
    }

    pub fn on_round_won(&mut self) {
        self.update();
        self.frozen = true;
        self.rounds_won += 1;
        if self.best_time.is_none_or(|best| self.elapsed_time < best) {
            self.best_time = Some(self.elapsed_time);
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }

    pub fn format_best(&self) -> String {
        self.best_time
            .map(format_duration)
            .unwrap_or_else(|| "--:--".to_string())
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
