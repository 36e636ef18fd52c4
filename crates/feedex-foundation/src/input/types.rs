use feedex_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw pointer sample, immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub phase: MotionPhase,
    pub position: Point,
    pub time_ms: u64,
}

impl MotionSample {
    pub fn new(phase: MotionPhase, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(MotionPhase::Down, x, y, time_ms)
    }

    pub fn move_to(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(MotionPhase::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(MotionPhase::Up, x, y, time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(MotionPhase::Cancel, x, y, time_ms)
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Ends a touch sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, MotionPhase::Up | MotionPhase::Cancel)
    }
}
