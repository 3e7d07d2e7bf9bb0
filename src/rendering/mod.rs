use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::domain::{Grid, Pattern};
use crate::ui::{grid_area_height, grid_area_width, panel_x, Button, CELL_SIZE, PANEL_WIDTH};

const ALIVE_COLOR: Color = Color::new(0.45, 0.45, 1.0, 1.0);
const DEAD_COLOR: Color = Color::new(0.06, 0.06, 0.06, 1.0);
const GRID_LINE_COLOR: Color = Color::new(0.16, 0.16, 0.16, 1.0);
const LABEL_COLOR: Color = Color::new(0.7, 0.7, 0.7, 1.0);

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Draw the visible part of the grid
pub fn draw_grid(grid: &Grid, camera: &Camera) {
    let cell_size = CELL_SIZE * camera.zoom;
    let (width, height) = grid.dimensions();
    let (min_row, min_col, max_row, max_col) =
        camera.visible_bounds(grid_area_width(), grid_area_height(), CELL_SIZE);

    let start_row = min_row.max(0) as usize;
    let start_col = min_col.max(0) as usize;
    let end_row = (max_row + 1).clamp(0, height as isize) as usize;
    let end_col = (max_col + 1).clamp(0, width as isize) as usize;

    let draw_lines = cell_size >= 4.0;

    for row in start_row..end_row {
        for col in start_col..end_col {
            let (x, y) = camera.cell_to_screen(row, col, CELL_SIZE);
            if grid.get(row as isize, col as isize).is_alive() {
                draw_rectangle(x, y, cell_size, cell_size, ALIVE_COLOR);
            } else if draw_lines {
                draw_rectangle(x, y, cell_size, cell_size, DEAD_COLOR);
            }
            if draw_lines {
                draw_rectangle_lines(x, y, cell_size, cell_size, 1.0, GRID_LINE_COLOR);
            }
        }
    }
}

/// Ghost of the pattern a right click would stamp, centred on the cursor
pub fn draw_pattern_preview(pattern: &Pattern, camera: &Camera, mouse_pos: (f32, f32)) {
    let cell_size = CELL_SIZE * camera.zoom;
    let (row, col) = camera.screen_to_cell(mouse_pos.0, mouse_pos.1, CELL_SIZE);
    let top = row.saturating_sub((pattern.height / 2) as isize);
    let left = col.saturating_sub((pattern.width / 2) as isize);

    for (r, c) in pattern.cells_at(top, left) {
        if r < 0 || c < 0 {
            continue;
        }
        let (x, y) = camera.cell_to_screen(r as usize, c as usize, CELL_SIZE);
        draw_rectangle(x, y, cell_size, cell_size, Color::new(0.45, 0.45, 1.0, 0.45));
    }
}

/// Draw the control panel with buttons and counters
pub fn draw_controls(state: &GameState, pattern: &Pattern, buttons: &[Button], mouse_pos: (f32, f32)) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::new(0.12, 0.12, 0.12, 1.0));
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let sim = state.simulation();
    let (width, height) = sim.dimensions();
    let running = state.is_running();
    let status_color = if running { GREEN } else { ORANGE };

    let labels: [(String, f32, f32, Color); 11] = [
        ("Generation:".into(), 240.0, 16.0, WHITE),
        (sim.generation().to_string(), 260.0, 20.0, ALIVE_COLOR),
        ("Live cells:".into(), 290.0, 16.0, WHITE),
        (format_number(sim.live_cells()), 310.0, 20.0, ALIVE_COLOR),
        ((if running { "Running" } else { "Stopped" }).into(), 340.0, 16.0, status_color),
        (format!("{:.0} gen/s", state.generations_per_second()), 360.0, 14.0, LABEL_COLOR),
        (format!("Grid: {width}×{height} ({})", sim.evaluation().name()), 390.0, 12.0, LABEL_COLOR),
        (format!("Advance: {:.2}ms", state.last_advance_time_ms), 405.0, 12.0, LABEL_COLOR),
        (format!("Render: {:.2}ms | FPS {}", state.last_render_time_ms, get_fps()), 420.0, 12.0, LABEL_COLOR),
        (format!("Pattern: {}", pattern.name), 450.0, 14.0, WHITE),
        (pattern.description.to_string(), 465.0, 11.0, LABEL_COLOR),
    ];
    for (text, y, size, color) in &labels {
        draw_text(text, px, *y, *size, *color);
    }

    let help = [
        "LMB/drag: Toggle",
        "RMB: Stamp pattern",
        "P: Next pattern",
        "Space: Run  N: Step",
        "C: Clear  R: Random",
        "Up/Down: Speed",
        "G: Grid size  E: Eval",
        "Wheel: Zoom  H: Home",
    ];
    for (i, text) in help.iter().enumerate() {
        draw_text(text, px, 490.0 + i as f32 * 14.0, 12.0, GRAY);
    }
}
