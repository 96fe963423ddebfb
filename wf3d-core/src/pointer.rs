/// Pointer tracking for the diagnostic pattern
use crate::raster::{HEIGHT, WIDTH};

/// Raw pointer sample supplied by the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub locked: bool,
    pub abs_x: f32,
    pub abs_y: f32,
    pub delta_x: f32,
    pub delta_y: f32,
    /// Host pixels per buffer pixel.
    pub scale: f32,
    pub button_down: bool,
    pub button_up: bool,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            locked: false,
            abs_x: 0.0,
            abs_y: 0.0,
            delta_x: 0.0,
            delta_y: 0.0,
            scale: 1.0,
            button_down: false,
            button_up: false,
        }
    }
}

/// Smoothed pointer position in buffer coordinates.
///
/// Unlocked, the pointer follows the absolute host position. Locked, it
/// accumulates relative motion starting from wherever it was when the lock
/// engaged.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    locked: bool,
    x: f32,
    y: f32,
    rounded_x: u16,
    rounded_y: u16,
    button_down: bool,
    button_up: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            locked: false,
            x: (WIDTH / 2) as f32,
            y: (HEIGHT / 2) as f32,
            rounded_x: (WIDTH / 2) as u16,
            rounded_y: (HEIGHT / 2) as u16,
            button_down: false,
            button_up: false,
        }
    }

    pub fn update(&mut self, input: PointerInput) {
        let scale = if input.scale.is_finite() && input.scale > 0.0 {
            input.scale
        } else {
            1.0
        };

        if !self.locked || !input.locked {
            self.x = input.abs_x / scale;
            self.y = input.abs_y / scale;
        }
        self.locked = input.locked;
        if self.locked {
            self.x += input.delta_x / scale;
            self.y += input.delta_y / scale;
        }

        self.x = clamp_axis(self.x, WIDTH);
        self.y = clamp_axis(self.y, HEIGHT);
        self.rounded_x = round_axis(self.x, WIDTH);
        self.rounded_y = round_axis(self.y, HEIGHT);

        self.button_down = input.button_down;
        self.button_up = input.button_up;
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Position rounded to the nearest pixel inside the buffer.
    pub fn pixel(&self) -> (u16, u16) {
        (self.rounded_x, self.rounded_y)
    }

    pub fn button_down(&self) -> bool {
        self.button_down
    }

    pub fn button_up(&self) -> bool {
        self.button_up
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_axis(value: f32, dim: usize) -> f32 {
    // NaN collapses to 0
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, dim as f32)
}

fn round_axis(value: f32, dim: usize) -> u16 {
    let rounded = (value + 0.5) as usize;
    rounded.min(dim - 1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(x: f32, y: f32, scale: f32) -> PointerInput {
        PointerInput {
            abs_x: x,
            abs_y: y,
            scale,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_centered() {
        let state = PointerState::new();
        assert_eq!(state.pixel(), (64, 64));
    }

    #[test]
    fn test_absolute_position_is_scaled_and_rounded() {
        let mut state = PointerState::new();
        state.update(absolute(41.0, 20.0, 4.0));
        assert_eq!(state.position(), (10.25, 5.0));
        assert_eq!(state.pixel(), (10, 5));

        state.update(absolute(42.0, 22.0, 4.0));
        assert_eq!(state.pixel(), (11, 6));
    }

    #[test]
    fn test_clamped_to_buffer() {
        let mut state = PointerState::new();
        state.update(absolute(-50.0, 5000.0, 1.0));
        assert_eq!(state.position(), (0.0, HEIGHT as f32));
        assert_eq!(state.pixel(), (0, (HEIGHT - 1) as u16));
    }

    #[test]
    fn test_locked_accumulates_deltas() {
        let mut state = PointerState::new();
        state.update(absolute(20.0, 20.0, 2.0));
        assert_eq!(state.position(), (10.0, 10.0));

        // Engaging the lock takes the absolute position once, then the delta.
        let locked = PointerInput {
            locked: true,
            abs_x: 100.0,
            abs_y: 100.0,
            delta_x: 4.0,
            delta_y: -2.0,
            scale: 2.0,
            ..Default::default()
        };
        state.update(locked);
        assert_eq!(state.position(), (52.0, 49.0));

        // While locked the absolute position is ignored.
        state.update(PointerInput {
            abs_x: 0.0,
            abs_y: 0.0,
            ..locked
        });
        assert_eq!(state.position(), (54.0, 48.0));
        assert!(state.locked());

        state.update(absolute(8.0, 8.0, 2.0));
        assert_eq!(state.position(), (4.0, 4.0));
        assert!(!state.locked());
    }

    #[test]
    fn test_buttons_are_edges() {
        let mut state = PointerState::new();
        state.update(PointerInput {
            button_down: true,
            ..Default::default()
        });
        assert!(state.button_down());
        assert!(!state.button_up());

        state.update(PointerInput::default());
        assert!(!state.button_down());
    }

    #[test]
    fn test_bad_scale_falls_back_to_one() {
        let mut state = PointerState::new();
        state.update(absolute(7.0, 9.0, 0.0));
        assert_eq!(state.position(), (7.0, 9.0));
    }
}
