/// Animation clock shared between the frame driver and the render function

/// Milliseconds to seconds.
const MS_TO_SECONDS: f64 = 0.001;

/// Last-seen animation time. The frame driver is the only writer;
/// rendering only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    t: f64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State frozen at `seconds`
    pub fn at(seconds: f64) -> Self {
        Self { t: seconds }
    }

    /// Record a frame timestamp given in milliseconds since the clock origin.
    pub fn advance(&mut self, timestamp_ms: f64) {
        self.t = timestamp_ms * MS_TO_SECONDS;
    }

    /// Stored time in seconds
    pub fn seconds(&self) -> f64 {
        self.t
    }
}

/// Rotation angle in radians for the object at `index`, applied to both
/// the X and Y axes: `t * (1 + index * speed_step)`.
pub fn rotation_angle(t: f64, index: usize, speed_step: f64) -> f32 {
    let speed = 1.0 + index as f64 * speed_step;
    (t * speed) as f32
}
