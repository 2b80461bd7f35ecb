//! Drawing surface for game entities.
//!
//! All coordinates are canvas units; implementations map them onto whatever
//! resolution they actually render at.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);
    pub const RED: Rgba = Rgba::rgb(255, 68, 68);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composites `self` over an opaque `dst`
    fn over(self, dst: Rgba) -> Rgba {
        let mix = |s: u8, d: u8| -> u8 {
            (s as f32 * self.a + d as f32 * (1.0 - self.a)).round() as u8
        };
        Rgba::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// Text drawn onto the surface; kept apart from the pixel grid
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
    pub color: Rgba,
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);
    fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgba);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, color: Rgba);

    /// Blends translucent black over the whole surface, leaving motion trails.
    /// Text from earlier frames is dropped.
    fn fade(&mut self, alpha: f32);

    /// Paints the whole surface opaque black and drops all text.
    fn clear(&mut self);
}

/// Off-screen pixel grid the game draws into each tick.
///
/// The grid is `columns × pixel_rows`; the renderer packs two pixel rows into
/// one terminal cell.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    canvas_width: f32,
    canvas_height: f32,
    columns: u16,
    pixel_rows: u16,
    pixels: Vec<Rgba>,
    labels: Vec<Label>,
}

impl FrameBuffer {
    pub fn new(canvas_width: f32, canvas_height: f32, columns: u16, pixel_rows: u16) -> Self {
        Self {
            canvas_width,
            canvas_height,
            columns,
            pixel_rows,
            pixels: vec![Rgba::BLACK; columns as usize * pixel_rows as usize],
            labels: Vec::new(),
        }
    }

    /// Changes the pixel resolution. Contents are discarded.
    pub fn resize(&mut self, columns: u16, pixel_rows: u16) {
        if columns == self.columns && pixel_rows == self.pixel_rows {
            return;
        }
        self.columns = columns;
        self.pixel_rows = pixel_rows;
        self.pixels = vec![Rgba::BLACK; columns as usize * pixel_rows as usize];
        self.labels.clear();
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn pixel_rows(&self) -> u16 {
        self.pixel_rows
    }

    pub fn pixel(&self, col: u16, row: u16) -> Option<Rgba> {
        if col >= self.columns || row >= self.pixel_rows {
            return None;
        }
        self.pixels
            .get(row as usize * self.columns as usize + col as usize)
            .copied()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Terminal cell (column, row) where a label's first character lands
    pub fn label_cell(&self, label: &Label) -> (u16, u16) {
        let col = (label.x * self.scale_x()).floor().max(0.0) as u16;
        let row = ((label.y * self.scale_y()) / 2.0).floor().max(0.0) as u16;
        let len = label.text.chars().count() as u16;
        match label.align {
            TextAlign::Left => (col, row),
            TextAlign::Right => (col.saturating_sub(len), row),
        }
    }

    fn scale_x(&self) -> f32 {
        self.columns as f32 / self.canvas_width
    }

    fn scale_y(&self) -> f32 {
        self.pixel_rows as f32 / self.canvas_height
    }

    /// Half-open pixel span covered by [start, end) in canvas units
    fn span(start: f32, end: f32, scale: f32, limit: u16) -> (u16, u16) {
        let lo = (start * scale).floor().max(0.0);
        let hi = (end * scale).ceil().min(limit as f32);
        if hi <= lo {
            return (0, 0);
        }
        (lo as u16, hi as u16)
    }

    fn blend(&mut self, col: u16, row: u16, color: Rgba) {
        let idx = row as usize * self.columns as usize + col as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color.over(*px);
        }
    }

    /// Canvas-space centre of a pixel
    fn pixel_centre(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) / self.scale_x(),
            (row as f32 + 0.5) / self.scale_y(),
        )
    }

    fn blend_at(&mut self, x: f32, y: f32, color: Rgba) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let col = (x * self.scale_x()).floor() as u16;
        let row = (y * self.scale_y()).floor() as u16;
        if col < self.columns && row < self.pixel_rows {
            self.blend(col, row, color);
        }
    }
}

fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

impl Surface for FrameBuffer {
    fn width(&self) -> f32 {
        self.canvas_width
    }

    fn height(&self) -> f32 {
        self.canvas_height
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let (c0, c1) = Self::span(x, x + width, self.scale_x(), self.columns);
        let (r0, r1) = Self::span(y, y + height, self.scale_y(), self.pixel_rows);
        for row in r0..r1 {
            for col in c0..c1 {
                self.blend(col, row, color);
            }
        }
    }

    fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgba) {
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        let (c0, c1) = Self::span(min_x, max_x, self.scale_x(), self.columns);
        let (r0, r1) = Self::span(min_y, max_y, self.scale_y(), self.pixel_rows);

        let area = edge(a, b, c);
        let mut covered = false;
        for row in r0..r1 {
            for col in c0..c1 {
                let p = self.pixel_centre(col, row);
                let (w0, w1, w2) = (edge(b, c, p), edge(c, a, p), edge(a, b, p));
                let inside = if area >= 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.blend(col, row, color);
                    covered = true;
                }
            }
        }

        // Shapes smaller than a pixel still leave a mark
        if !covered {
            self.blend_at((a.0 + b.0 + c.0) / 3.0, (a.1 + b.1 + c.1) / 3.0, color);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let (c0, c1) = Self::span(cx - radius, cx + radius, self.scale_x(), self.columns);
        let (r0, r1) = Self::span(cy - radius, cy + radius, self.scale_y(), self.pixel_rows);
        let mut covered = false;
        for row in r0..r1 {
            for col in c0..c1 {
                let (px, py) = self.pixel_centre(col, row);
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= radius * radius {
                    self.blend(col, row, color);
                    covered = true;
                }
            }
        }
        if !covered {
            self.blend_at(cx, cy, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, color: Rgba) {
        self.labels.push(Label {
            text: text.to_string(),
            x,
            y,
            align,
            color,
        });
    }

    fn fade(&mut self, alpha: f32) {
        self.labels.clear();
        let (w, h) = (self.canvas_width, self.canvas_height);
        self.fill_rect(0.0, 0.0, w, h, Rgba::BLACK.with_alpha(alpha));
    }

    fn clear(&mut self) {
        self.labels.clear();
        self.pixels.fill(Rgba::BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100×100 canvas at one pixel per 10 units
    fn small_buffer() -> FrameBuffer {
        FrameBuffer::new(100.0, 100.0, 10, 10)
    }

    #[test]
    fn test_fill_rect_covers_scaled_pixels() {
        let mut fb = small_buffer();
        fb.fill_rect(20.0, 30.0, 20.0, 10.0, Rgba::RED);
        assert_eq!(fb.pixel(2, 3), Some(Rgba::RED));
        assert_eq!(fb.pixel(3, 3), Some(Rgba::RED));
        assert_eq!(fb.pixel(4, 3), Some(Rgba::BLACK));
        assert_eq!(fb.pixel(2, 4), Some(Rgba::BLACK));
    }

    #[test]
    fn test_fill_rect_clips_offscreen() {
        let mut fb = small_buffer();
        fb.fill_rect(-40.0, -40.0, 50.0, 50.0, Rgba::CYAN);
        assert_eq!(fb.pixel(0, 0), Some(Rgba::CYAN));
        assert_eq!(fb.pixel(1, 1), Some(Rgba::BLACK));

        // Entirely above the canvas: nothing drawn
        fb.fill_rect(50.0, -40.0, 40.0, 40.0, Rgba::CYAN);
        assert_eq!(fb.pixel(5, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_fade_blends_toward_black() {
        let mut fb = small_buffer();
        fb.fill_rect(0.0, 0.0, 100.0, 100.0, Rgba::rgb(200, 100, 0));
        fb.fade(0.5);
        assert_eq!(fb.pixel(5, 5), Some(Rgba::rgb(100, 50, 0)));
    }

    #[test]
    fn test_fade_drops_labels() {
        let mut fb = small_buffer();
        fb.fill_text("Lives", 90.0, 20.0, TextAlign::Right, Rgba::CYAN);
        assert_eq!(fb.labels().len(), 1);
        fb.fade(0.3);
        assert!(fb.labels().is_empty());
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut fb = small_buffer();
        fb.fill_circle(50.0, 50.0, 20.0, Rgba::YELLOW);
        fb.fill_text("Score: 3", 10.0, 20.0, TextAlign::Left, Rgba::CYAN);
        let surface: &mut dyn Surface = &mut fb;
        surface.clear();
        assert!(fb.labels().is_empty());
        for row in 0..10 {
            for col in 0..10 {
                assert_eq!(fb.pixel(col, row), Some(Rgba::BLACK));
            }
        }
    }

    #[test]
    fn test_tiny_circle_still_visible() {
        let mut fb = small_buffer();
        fb.fill_circle(55.0, 55.0, 1.0, Rgba::YELLOW);
        assert_eq!(fb.pixel(5, 5), Some(Rgba::YELLOW));
    }

    #[test]
    fn test_triangle_apex_and_base() {
        let mut fb = small_buffer();
        fb.fill_triangle((50.0, 0.0), (0.0, 100.0), (100.0, 100.0), Rgba::CYAN);
        // Bottom row is fully inside the base
        assert_eq!(fb.pixel(5, 9), Some(Rgba::CYAN));
        assert_eq!(fb.pixel(1, 9), Some(Rgba::CYAN));
        // Top corners lie outside the slopes
        assert_eq!(fb.pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(fb.pixel(9, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_label_cell_alignment() {
        let fb = FrameBuffer::new(100.0, 100.0, 10, 20);
        let label = Label {
            text: "abc".to_string(),
            x: 90.0,
            y: 50.0,
            align: TextAlign::Right,
            color: Rgba::CYAN,
        };
        assert_eq!(fb.label_cell(&label), (6, 5));
    }

    #[test]
    fn test_zero_sized_buffer_is_inert() {
        let mut fb = FrameBuffer::new(100.0, 100.0, 0, 0);
        fb.fill_rect(0.0, 0.0, 100.0, 100.0, Rgba::RED);
        fb.fill_circle(50.0, 50.0, 10.0, Rgba::RED);
        fb.fade(0.3);
        assert_eq!(fb.pixel(0, 0), None);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut fb = small_buffer();
        fb.fill_rect(0.0, 0.0, 100.0, 100.0, Rgba::RED);
        fb.resize(20, 20);
        assert_eq!(fb.columns(), 20);
        assert_eq!(fb.pixel_rows(), 20);
        assert_eq!(fb.pixel(19, 19), Some(Rgba::BLACK));
    }
}
