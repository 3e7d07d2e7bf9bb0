use macroquad::prelude::*;

use super::Command;

/// Button UI component with hover and click detection
#[derive(Clone)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    text: String,
    command: Command,
}

impl Button {
    const COLOR: Color = Color::new(0.27, 0.51, 0.71, 1.0);
    const HOVER_COLOR: Color = Color::new(0.39, 0.58, 0.93, 1.0);

    pub fn new(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>, command: Command) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            command,
        }
    }

    pub const fn command(&self) -> Command {
        self.command
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        (self.x..=self.x + self.width).contains(&mouse_pos.0)
            && (self.y..=self.y + self.height).contains(&mouse_pos.1)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let color = if self.is_hovered(mouse_pos) { Self::HOVER_COLOR } else { Self::COLOR };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let text_size = measure_text(&self.text, None, 20, 1.0);
        draw_text(
            &self.text,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            20.0,
            WHITE,
        );
    }

    /// Check if button was clicked this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
