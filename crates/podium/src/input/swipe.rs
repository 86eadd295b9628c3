use super::{Command, InputEvent, InputHandler, Point};

/// Minimum horizontal travel, in logical points, for a touch to count as a swipe.
pub const DEFAULT_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved right: go back.
    Right,
    /// Finger moved left: go forward.
    Left,
}

/// Classify a gesture by its displacement. Only mostly-horizontal moves
/// longer than `threshold` count.
pub fn classify(start: Point, end: Point, threshold: f32) -> Option<Swipe> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() > dy.abs() && dx.abs() > threshold {
        Some(if dx > 0.0 { Swipe::Right } else { Swipe::Left })
    } else {
        None
    }
}

/// Tracks the first finger down from start to end. Other fingers touching
/// at the same time are ignored. Nothing survives past the end of a gesture.
pub struct SwipeAdapter {
    threshold: f32,
    start: Option<(u64, Point)>,
}

impl SwipeAdapter {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }
}

impl InputHandler for SwipeAdapter {
    fn name(&self) -> &'static str {
        "swipe"
    }

    fn handle(&mut self, event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::TouchStart { id, pos } => {
                if self.start.is_none() {
                    self.start = Some((id, pos));
                }
                None
            }
            InputEvent::TouchEnd { id, pos } => {
                let (start_id, start) = self.start?;
                if start_id != id {
                    return None;
                }
                self.start = None;
                match classify(start, pos, self.threshold)? {
                    Swipe::Right => Some(Command::Previous),
                    Swipe::Left => Some(Command::Next),
                }
            }
            InputEvent::TouchCancel { id } => {
                if self.start.is_some_and(|(start_id, _)| start_id == id) {
                    self.start = None;
                }
                None
            }
            _ => None,
        }
    }
}
