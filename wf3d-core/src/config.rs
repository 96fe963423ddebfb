/// Tunables for projection, tick pacing and the render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Simulation rate; one tick lasts `ceil(1000 / target_fps)` time units.
    pub target_fps: u32,
    /// Elapsed ticks beyond this are dropped instead of caught up.
    pub max_ticks_per_frame: u32,
    /// Overwrite the head of the buffer with the pointer/tick pattern.
    pub diagnostic_fill: bool,
    /// Reject mesh resources with bytes past the last triangle record.
    pub strict_decode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
            target_fps: 100,
            max_ticks_per_frame: 4,
            diagnostic_fill: true,
            strict_decode: false,
        }
    }
}
