use std::sync::mpsc::Receiver;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conway_life::{
    input::{self, DragToggle, PanDrag},
    presets, rendering,
    ui::{self, CELL_SIZE, GRID_SIZES},
    Camera, GameState, GenerationAdvanced, LifeConfig,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// Subscribe to a freshly built state's advances
fn with_events(mut state: GameState) -> (GameState, Receiver<GenerationAdvanced>) {
    let events = state.simulation_mut().subscribe();
    (state, events)
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut size_index = 0;
    let size = GRID_SIZES[size_index].0;
    let (mut state, mut events) = match GameState::new_or_default(&LifeConfig::new(size, size)) {
        Ok(built) => with_events(built),
        Err(err) => {
            error!(%err, "could not build simulation");
            return;
        }
    };
    let mut camera = Camera::new();
    let mut drag = DragToggle::default();
    let mut pan = PanDrag::default();

    let patterns = presets::all_patterns();
    let mut pattern_index = 0;
    let mut changed_last_advance = 0;

    info!(width = state.simulation().dimensions().0, "starting");

    loop {
        let mouse_pos = mouse_position();
        let buttons = ui::create_buttons(state.is_running());

        if is_key_pressed(KeyCode::G) {
            size_index = (size_index + 1) % GRID_SIZES.len();
            let size = GRID_SIZES[size_index].0;
            match GameState::new(&LifeConfig::new(size, size)) {
                Ok(built) => {
                    (state, events) = with_events(built);
                    camera.reset();
                    info!(size = GRID_SIZES[size_index].1, "resized grid");
                }
                Err(err) => error!(%err, "keeping current grid"),
            }
        }
        if is_key_pressed(KeyCode::P) {
            pattern_index = (pattern_index + 1) % patterns.len();
        }

        let pattern = &patterns[pattern_index];
        if is_mouse_button_pressed(MouseButton::Right) && mouse_pos.0 < ui::grid_area_width() {
            let (row, col) = camera.screen_to_cell(mouse_pos.0, mouse_pos.1, CELL_SIZE);
            state.place_pattern(pattern, row, col);
        }

        state = input::process_button_clicks(state, &buttons, mouse_pos);
        input::handle_zoom(&mut camera);
        pan.update(&mut camera, mouse_pos);
        input::handle_mouse_toggle(&mut state, &mut drag, &camera, mouse_pos);
        state = input::process_keyboard_input(state, &mut camera);

        state = state.tick(input::frame_duration());
        if let Some(event) = events.try_iter().last() {
            changed_last_advance = event.changes.len();
        }

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        rendering::draw_grid(state.simulation().grid(), &camera);
        if mouse_pos.0 < ui::grid_area_width() {
            rendering::draw_pattern_preview(pattern, &camera, mouse_pos);
        }
        rendering::draw_controls(&state, pattern, &buttons, mouse_pos);
        draw_text(
            &format!("Changed: {changed_last_advance}"),
            ui::panel_x(),
            435.0,
            12.0,
            GRAY,
        );
        state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
