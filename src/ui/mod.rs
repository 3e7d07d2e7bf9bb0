mod button;

pub use button::Button;

use macroquad::prelude::{screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
pub const CELL_SIZE: f32 = 10.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Grid size presets cycled with the `G` key
pub const GRID_SIZES: &[(usize, &str)] = &[
    (40, "40×40"),
    (100, "100×100"),
    (200, "200×200"),
    (500, "500×500"),
    (1000, "1000×1000"),
];

/// What a panel button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    Step,
    Clear,
    Seed,
}

/// Create UI buttons with standard layout
pub fn create_buttons(running: bool) -> Vec<Button> {
    let px = panel_x();
    let run_label = if running { "Stop" } else { "Run" };
    vec![
        Button::new(px, 20.0, PANEL_WIDTH, BUTTON_HEIGHT, run_label, Command::ToggleRun),
        Button::new(px, 70.0, PANEL_WIDTH, BUTTON_HEIGHT, "Step", Command::Step),
        Button::new(px, 120.0, PANEL_WIDTH, BUTTON_HEIGHT, "Clear", Command::Clear),
        Button::new(px, 170.0, PANEL_WIDTH, BUTTON_HEIGHT, "Random", Command::Seed),
    ]
}
