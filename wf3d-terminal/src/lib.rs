/// Terminal host driving the wireframe engine
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{Engine, PointerInput, HEIGHT, WIDTH};

pub mod config;
pub mod logging;
pub mod renderer;

pub use config::TerminalConfig;
pub use logging::{init_logging, LoggingConfig};
pub use renderer::HalfBlockRenderer;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    engine: Engine,
    renderer: HalfBlockRenderer,
    input: PointerInput,
    running: bool,
    started: Instant,
    frame_interval: Duration,
    last_report: Instant,
    renders: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(engine: Engine, frame_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            engine,
            renderer: HalfBlockRenderer::new(WIDTH, HEIGHT),
            input: PointerInput::default(),
            running: true,
            started: now,
            frame_interval,
            last_report: now,
            renders: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }

            let timestamp = self.timestamp();
            if self.engine.frame(timestamp, self.input) {
                self.renders += 1;
                self.render()?;
            }
            // Button flags are edges, consumed by the frame that saw them.
            self.input.button_down = false;
            self.input.button_up = false;

            let now = Instant::now();
            if (now - self.last_report).as_secs() >= 1 {
                self.fps = self.renders as f32 / (now - self.last_report).as_secs_f32();
                self.renders = 0;
                self.last_report = now;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            }
        }

        info!("stopped after {} ticks", self.engine.scheduler().tick_number());
        Ok(())
    }

    /// Milliseconds since start, saturating at `i32::MAX`.
    fn timestamp(&self) -> i32 {
        i32::try_from(self.started.elapsed().as_millis()).unwrap_or(i32::MAX)
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }) => {
                self.running = false;
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // One cell is one pixel wide and two pixels tall
        self.input.abs_x = f32::from(mouse.column);
        self.input.abs_y = f32::from(mouse.row) * 2.0;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.input.button_down = true,
            MouseEventKind::Up(MouseButton::Left) => self.input.button_up = true,
            _ => {}
        }
    }

    fn render(&mut self) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(self.engine.pixels(), &mut stdout)?;

        // Status line below the picture
        let (px, py) = self.engine.pointer().pixel();
        queue!(
            stdout,
            cursor::MoveTo(0, self.renderer.rows() as u16),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | {:.1} fps | tick {} | pointer {},{} | Q=Quit",
                self.fps,
                self.engine.scheduler().tick_number(),
                px,
                py
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
