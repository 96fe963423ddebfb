/// WF3D Web - WASM host for the wireframe engine
///
/// The page calls `initialize` once, then `frame` from its animation loop,
/// and blits either a view over `pixels_ptr`/`pixels_len` in the module's
/// memory or the copy returned by `image_data`.

use log::warn;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::ImageData;
use wf3d_core::{Engine, EngineConfig, PointerInput, HEIGHT, WIDTH};

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

fn install(resource: &[u8]) -> Result<(), String> {
    let engine = Engine::initialize(EngineConfig::default(), resource).map_err(|e| e.to_string())?;
    ENGINE.with(|cell| {
        if cell.replace(Some(engine)).is_some() {
            warn!("engine re-initialized");
        }
    });
    Ok(())
}

/// Decode the embedded mesh. Must run before the first `frame`.
#[wasm_bindgen]
pub fn initialize() -> Result<(), JsValue> {
    install(wf3d_core::EMBEDDED_MESH).map_err(|e| JsValue::from_str(&e))
}

/// Decode a mesh resource supplied by the page instead of the embedded one.
#[wasm_bindgen]
pub fn initialize_with(resource: &[u8]) -> Result<(), JsValue> {
    install(resource).map_err(|e| JsValue::from_str(&e))
}

/// Feed one animation frame. Returns whether the pixels were redrawn.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn frame(
    timestamp: i32,
    locked: bool,
    abs_x: f32,
    abs_y: f32,
    delta_x: f32,
    delta_y: f32,
    scale: f32,
    button_down: bool,
    button_up: bool,
) -> bool {
    let input = PointerInput {
        locked,
        abs_x,
        abs_y,
        delta_x,
        delta_y,
        scale,
        button_down,
        button_up,
    };
    ENGINE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(engine) => engine.frame(timestamp, input),
        None => false,
    })
}

/// Address of the RGBA8 buffer in linear memory, or null before `initialize`.
///
/// The buffer is allocated once, so the address stays valid for the life of
/// the module.
#[wasm_bindgen]
pub fn pixels_ptr() -> *const u8 {
    ENGINE.with(|cell| match cell.borrow().as_ref() {
        Some(engine) => engine.pixels().as_ptr(),
        None => std::ptr::null(),
    })
}

#[wasm_bindgen]
pub fn pixels_len() -> usize {
    WIDTH * HEIGHT * 4
}

#[wasm_bindgen]
pub fn width() -> u32 {
    WIDTH as u32
}

#[wasm_bindgen]
pub fn height() -> u32 {
    HEIGHT as u32
}

/// Copy the current buffer into an `ImageData` ready for `putImageData`.
#[wasm_bindgen]
pub fn image_data() -> Result<ImageData, JsValue> {
    ENGINE.with(|cell| {
        let engine = cell.borrow();
        let engine = engine
            .as_ref()
            .ok_or_else(|| JsValue::from_str("engine not initialized"))?;
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(engine.pixels()), width(), height())
    })
}
