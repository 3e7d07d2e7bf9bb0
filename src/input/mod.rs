use std::time::Duration;

use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::ui::{grid_area_width, Button, Command, CELL_SIZE};

/// Turns a held pointer into toggle requests: the pressed cell flips once,
/// then every newly entered cell flips once while the button stays down.
#[derive(Debug, Default)]
pub struct DragToggle {
    last: Option<(isize, isize)>,
}

impl DragToggle {
    /// Feed one frame of pointer state; returns the cell to toggle, if any
    pub fn update(&mut self, held: bool, cell: (isize, isize)) -> Option<(isize, isize)> {
        if !held {
            self.last = None;
            return None;
        }
        if self.last == Some(cell) {
            return None;
        }
        self.last = Some(cell);
        Some(cell)
    }
}

/// Middle-drag panning state
#[derive(Debug, Default)]
pub struct PanDrag {
    last: Option<(f32, f32)>,
}

impl PanDrag {
    pub fn update(&mut self, camera: &mut Camera, mouse_pos: (f32, f32)) {
        if !is_mouse_button_down(MouseButton::Middle) {
            self.last = None;
            return;
        }
        if let Some(last) = self.last {
            camera.pan(mouse_pos.0 - last.0, mouse_pos.1 - last.1);
        }
        self.last = Some(mouse_pos);
    }
}

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Translate the left button into cell toggles on the grid area
pub fn handle_mouse_toggle(state: &mut GameState, drag: &mut DragToggle, camera: &Camera, mouse_pos: (f32, f32)) {
    let held = is_mouse_button_down(MouseButton::Left) && mouse_pos.0 < grid_area_width();
    let cell = camera.screen_to_cell(mouse_pos.0, mouse_pos.1, CELL_SIZE);
    if let Some((row, col)) = drag.update(held, cell) {
        state.toggle(row, col);
    }
}

/// Apply a panel or keyboard command
pub fn apply(state: GameState, command: Command) -> GameState {
    match command {
        Command::ToggleRun => state.toggle_run(),
        Command::Step => state.step(),
        Command::Clear => state.clear(),
        Command::Seed => state.seed_random(),
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(state: GameState, camera: &mut Camera) -> GameState {
    type KeyAction = (KeyCode, fn(GameState) -> GameState);

    let actions: [KeyAction; 7] = [
        (KeyCode::Space, GameState::toggle_run),
        (KeyCode::N, GameState::step),
        (KeyCode::C, GameState::clear),
        (KeyCode::R, GameState::seed_random),
        (KeyCode::E, GameState::cycle_evaluation),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    let new_state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }

    new_state
}

/// Process button clicks functionally
pub fn process_button_clicks(state: GameState, buttons: &[Button], mouse_pos: (f32, f32)) -> GameState {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .fold(state, |s, btn| apply(s, btn.command()))
}

/// Frame time as a duration, ignoring the odd negative reading
pub fn frame_duration() -> Duration {
    Duration::from_secs_f32(get_frame_time().max(0.0))
}
