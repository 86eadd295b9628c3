use std::time::{Duration, Instant};

use tracing::debug;

pub const DEFAULT_DURATION: Duration = Duration::from_secs(20 * 60);
const WARNING_BELOW: Duration = Duration::from_secs(2 * 60);
const ALERT_BELOW: Duration = Duration::from_secs(60);
const PULSE_PERIOD: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    /// Under two minutes left.
    Warning,
    /// Under one minute left; the display pulses.
    Alert,
}

impl Urgency {
    pub fn for_remaining(remaining: Duration) -> Self {
        if remaining < ALERT_BELOW {
            Self::Alert
        } else if remaining < WARNING_BELOW {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub fn pulses(&self) -> bool {
        matches!(self, Self::Alert)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerDisplay {
    pub text: String,
    pub remaining: Duration,
    pub urgency: Urgency,
}

/// Talk countdown. Purely cosmetic: it never touches navigation state.
#[derive(Debug, Clone)]
pub struct PresentationTimer {
    running: bool,
    started: Option<Instant>,
    target: Duration,
}

impl Default for PresentationTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl PresentationTimer {
    pub fn new(target: Duration) -> Self {
        Self {
            running: false,
            started: None,
            target,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Restart the countdown from the full target duration.
    pub fn start_at(&mut self, now: Instant) {
        debug!(target_secs = self.target.as_secs(), "timer started");
        self.started = Some(now);
        self.running = true;
    }

    pub fn stop(&mut self) {
        debug!("timer stopped");
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn toggle_at(&mut self, now: Instant) {
        if self.running {
            self.stop();
        } else {
            self.start_at(now);
        }
    }

    /// Whole seconds since start, or `None` if never started.
    pub fn elapsed_at(&self, now: Instant) -> Option<Duration> {
        let started = self.started?;
        let secs = now.saturating_duration_since(started).as_secs();
        Some(Duration::from_secs(secs))
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.elapsed_at(now)
            .map(|elapsed| self.target.saturating_sub(elapsed))
    }

    /// One iteration of the refresh loop. Returns `None` once the timer is
    /// stopped, which ends the loop.
    pub fn tick_at(&self, now: Instant) -> Option<TimerDisplay> {
        if !self.running {
            return None;
        }
        let remaining = self.remaining_at(now)?;
        Some(TimerDisplay {
            text: format_mm_ss(remaining),
            remaining,
            urgency: Urgency::for_remaining(remaining),
        })
    }

    pub fn tick(&self) -> Option<TimerDisplay> {
        self.tick_at(Instant::now())
    }
}

pub fn format_mm_ss(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Opacity for the alert pulse: 1.0 down to 0.7 and back once per second.
pub fn pulse_opacity(elapsed_secs: f32) -> f32 {
    let phase = (elapsed_secs % PULSE_PERIOD) / PULSE_PERIOD;
    let dip = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
    1.0 - 0.3 * dip
}
