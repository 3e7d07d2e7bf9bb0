/// Camera maps between screen pixels and grid `(row, col)` coordinates
/// for the front-end. It never touches simulation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32, // 1.0 = normal, 2.0 = 2x zoomed in
}

impl Camera {
    const MIN_ZOOM: f32 = 0.5;
    const MAX_ZOOM: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Convert a screen point to the `(row, col)` under it. The result may
    /// be off-grid; the simulation ignores such coordinates.
    pub fn screen_to_cell(&self, screen_x: f32, screen_y: f32, cell_size: f32) -> (isize, isize) {
        let scaled = cell_size * self.zoom;
        let col = ((screen_x - self.offset_x) / scaled).floor() as isize;
        let row = ((screen_y - self.offset_y) / scaled).floor() as isize;
        (row, col)
    }

    /// Top-left screen position of a cell
    pub fn cell_to_screen(&self, row: usize, col: usize, cell_size: f32) -> (f32, f32) {
        let scaled = cell_size * self.zoom;
        (col as f32 * scaled + self.offset_x, row as f32 * scaled + self.offset_y)
    }

    /// Visible `(min_row, min_col, max_row, max_col)` for culling
    pub fn visible_bounds(&self, viewport_width: f32, viewport_height: f32, cell_size: f32) -> (isize, isize, isize, isize) {
        let (min_row, min_col) = self.screen_to_cell(0.0, 0.0, cell_size);
        let (max_row, max_col) = self.screen_to_cell(viewport_width, viewport_height, cell_size);
        (min_row, min_col, max_row, max_col)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
