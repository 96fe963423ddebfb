/// Engine state: mesh, pixel buffer, clock and pointer under one owner
use log::info;
use nalgebra::Matrix4;

use crate::config::EngineConfig;
use crate::error::MeshError;
use crate::geometry::Mesh;
use crate::mesh::{decode_mesh, decode_mesh_strict};
use crate::pointer::{PointerInput, PointerState};
use crate::projection::{project, Camera};
use crate::raster::{PixelBuffer, CHANNELS, HEIGHT, WIDTH};
use crate::timing::{Tick, TickScheduler};

/// Mesh resource compiled into the crate.
pub static EMBEDDED_MESH: &[u8] = include_bytes!("../assets/cube.wf3d");

/// Per-step game logic, run once for every batch of elapsed ticks.
pub trait Simulation {
    fn update(&mut self, tick: Tick);
}

/// Simulation that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Simulation for Idle {
    fn update(&mut self, _tick: Tick) {}
}

/// Everything a host needs to drive frames and read back pixels.
pub struct Engine<S = Idle> {
    config: EngineConfig,
    mesh: Mesh,
    resource_len: usize,
    projection: Matrix4<f32>,
    pixels: PixelBuffer,
    scheduler: TickScheduler,
    pointer: PointerState,
    simulation: S,
}

impl Engine<Idle> {
    /// Decode `resource` and build an engine with no simulation logic.
    pub fn initialize(config: EngineConfig, resource: &[u8]) -> Result<Self, MeshError> {
        Self::with_simulation(config, resource, Idle)
    }

    /// Build an engine around [`EMBEDDED_MESH`].
    pub fn with_embedded(config: EngineConfig) -> Result<Self, MeshError> {
        Self::initialize(config, EMBEDDED_MESH)
    }
}

impl<S: Simulation> Engine<S> {
    pub fn with_simulation(
        config: EngineConfig,
        resource: &[u8],
        simulation: S,
    ) -> Result<Self, MeshError> {
        let mesh = if config.strict_decode {
            decode_mesh_strict(resource)?
        } else {
            decode_mesh(resource)?
        };
        let projection = Camera::from_config(&config, WIDTH as u32, HEIGHT as u32).projection_matrix();

        info!(
            "engine initialized: {} triangles, {}x{} buffer, {} fps",
            mesh.len(),
            WIDTH,
            HEIGHT,
            config.target_fps
        );

        Ok(Self {
            scheduler: TickScheduler::from_config(&config),
            config,
            mesh,
            resource_len: resource.len(),
            projection,
            pixels: PixelBuffer::new(WIDTH, HEIGHT),
            pointer: PointerState::new(),
            simulation,
        })
    }

    /// Feed one host frame.
    ///
    /// Updates the pointer, then runs the simulation and a single render
    /// pass if at least one tick has elapsed. Returns whether the pixel
    /// buffer was redrawn.
    pub fn frame(&mut self, timestamp: i32, input: PointerInput) -> bool {
        self.pointer.update(input);

        let Some(tick) = self.scheduler.advance(timestamp) else {
            return false;
        };
        self.simulation.update(tick);
        self.render();
        true
    }

    /// Clear the buffer and draw every triangle's edges.
    pub fn render(&mut self) {
        self.pixels.clear();

        for triangle in self.mesh.triangles() {
            for (a, b) in triangle.edges() {
                let a = project(&a, &self.projection);
                let b = project(&b, &self.projection);
                self.pixels
                    .draw_line(a.x as i16, a.y as i16, b.x as i16, b.y as i16);
            }
        }

        if self.config.diagnostic_fill {
            self.diagnostic_fill();
        }
    }

    /// Paint the first pixels with a pattern driven by the pointer and tick
    /// counter, one pixel per byte of the mesh resource.
    fn diagnostic_fill(&mut self) {
        let (px, py) = self.pointer.pixel();
        let (px, py) = (u32::from(px), u32::from(py));
        let tick = self.scheduler.tick_number();
        let red = if self.pointer.button_up() { 0 } else { 0xFF };
        let alpha = if self.pointer.button_down() { 0 } else { 0xFF };

        let bytes = self.pixels.as_bytes_mut();
        let count = self.resource_len.min(bytes.len() / CHANNELS);
        for (i, pixel) in bytes.chunks_exact_mut(CHANNELS).take(count).enumerate() {
            let i = i as u32;
            let green = (i.wrapping_sub(px) & 0x7F).wrapping_add(tick.wrapping_mul(8));
            let blue = (i.wrapping_sub(py) & 0x7F).wrapping_add(tick.wrapping_mul(4));
            pixel.copy_from_slice(&[red, green as u8, blue as u8, alpha]);
        }
    }

    /// RGBA8 bytes of the last render pass, `WIDTH * HEIGHT * 4` long.
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    pub fn pixel_buffer(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::WHITE;

    // Projects to (10, 10), (50, 10), (10, 50).
    const TRIANGLE: [u8; 16] = [0, 3, 0, 1, 21, 21, 2, 101, 21, 2, 21, 101, 2, 0, 1, 2];

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Tick>,
    }

    impl Simulation for Recorder {
        fn update(&mut self, tick: Tick) {
            self.calls.push(tick);
        }
    }

    fn wireframe_only() -> EngineConfig {
        EngineConfig {
            diagnostic_fill: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_embedded_mesh_renders() {
        let mut engine = Engine::with_embedded(wireframe_only()).unwrap();
        assert_eq!(engine.mesh().len(), 12);
        assert!(engine.frame(0, PointerInput::default()));
        assert_eq!(engine.pixels().len(), WIDTH * HEIGHT * 4);
        assert!(engine.pixels().chunks_exact(4).any(|p| p == WHITE));
    }

    #[test]
    fn test_triangle_edges_are_drawn() {
        let mut engine = Engine::initialize(wireframe_only(), &TRIANGLE).unwrap();
        engine.frame(0, PointerInput::default());

        let buffer = engine.pixel_buffer();
        assert_eq!(buffer.pixel(30, 10), Some(WHITE));
        assert_eq!(buffer.pixel(10, 30), Some(WHITE));
        assert_eq!(buffer.pixel(30, 30), Some(WHITE));
        assert_eq!(buffer.pixel(20, 20), Some([0; 4]));
        assert_eq!(buffer.pixel(100, 100), Some([0; 4]));
    }

    #[test]
    fn test_bad_resource_is_rejected() {
        let mut data = TRIANGLE.to_vec();
        data[15] = 9;
        assert!(matches!(
            Engine::initialize(EngineConfig::default(), &data),
            Err(MeshError::IndexOutOfRange { .. })
        ));

        data[15] = 2;
        data.push(0);
        let strict = EngineConfig {
            strict_decode: true,
            ..Default::default()
        };
        assert!(Engine::initialize(EngineConfig::default(), &data).is_ok());
        assert_eq!(
            Engine::initialize(strict, &data).err(),
            Some(MeshError::TrailingBytes { extra: 1 })
        );
    }

    #[test]
    fn test_simulation_runs_once_per_batch() {
        let mut engine =
            Engine::with_simulation(wireframe_only(), &TRIANGLE, Recorder::default()).unwrap();

        assert!(engine.frame(0, PointerInput::default()));
        assert!(!engine.frame(5, PointerInput::default()));
        assert!(engine.frame(35, PointerInput::default()));

        let calls = &engine.simulation().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].ticks.get(), 4);
        assert_eq!(calls[1].ticks.get(), 3);
        assert_eq!(calls[1].tick_number, 7);
    }

    #[test]
    fn test_skipped_frame_keeps_previous_pixels() {
        let mut engine = Engine::initialize(wireframe_only(), &TRIANGLE).unwrap();
        engine.frame(0, PointerInput::default());
        let before = engine.pixels().to_vec();
        assert!(!engine.frame(-100, PointerInput::default()));
        assert_eq!(engine.pixels(), &before[..]);
    }

    #[test]
    fn test_diagnostic_fill_pattern() {
        let mut engine = Engine::initialize(EngineConfig::default(), &TRIANGLE).unwrap();
        engine.frame(0, PointerInput::default());

        // pointer at (0, 0), tick number 4
        let buffer = engine.pixel_buffer();
        assert_eq!(buffer.pixel(0, 0), Some([255, 32, 16, 255]));
        assert_eq!(buffer.pixel(3, 0), Some([255, 35, 19, 255]));
        assert_eq!(buffer.pixel(15, 0), Some([255, 47, 31, 255]));
        assert_eq!(buffer.pixel(16, 0), Some([0; 4]));

        let pressed = PointerInput {
            abs_x: 2.0,
            button_down: true,
            button_up: true,
            ..Default::default()
        };
        engine.frame(10, pressed);
        let buffer = engine.pixel_buffer();
        // pixel 0 sits two to the left of the pointer: (0 - 2) & 0x7F = 126
        assert_eq!(buffer.pixel(0, 0), Some([0, 126u8.wrapping_add(40), 20, 0]));
    }
}
