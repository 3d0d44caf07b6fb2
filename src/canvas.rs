use super::{
    clock::Painter,
    geometry::{Point, Polygon, Rect, Rotation},
    hand::HandKind,
    theme::{Bgra, Theme},
};

/// BGRA pixel buffer the clock is rendered into before it is attached to the
/// surface.
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    theme: Theme,
    pixel_data: Vec<u8>,
    face_cache: Vec<u8>,
    face_bounds: Option<Rect>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, theme: Theme) -> Self {
        Self {
            width,
            height,
            theme,
            pixel_data: vec![0u8; Self::buffer_len(width, height)],
            face_cache: Vec::new(),
            face_bounds: None,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixel_data = vec![0u8; Self::buffer_len(width, height)];
        self.face_cache.clear();
        self.face_bounds = None;
    }

    pub fn get_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn stride(&self) -> i32 {
        self.width as i32 * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = Self::pixel_idx(self.width, x, y);
        self.pixel_data[idx..idx + 4].try_into().ok()
    }

    fn draw_face_into(&mut self, bounds: Rect) {
        self.pixel_data.fill(0);

        let center = Point::new(
            bounds.left as f32 + bounds.width() as f32 / 2.0,
            bounds.top as f32 + bounds.height() as f32 / 2.0,
        );
        let radius = bounds.width().min(bounds.height()) as f32 / 2.0;
        let radius_sq = radius * radius;
        let frame_width = (radius / 50.0).max(2.0);
        let bg_radius_sq = (radius - frame_width).max(0.0).powi(2);

        for y in bounds.top..bounds.bottom.min(self.height) {
            for x in bounds.left..bounds.right.min(self.width) {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let center_dist_sq = dx * dx + dy * dy;

                // Background
                let color = if center_dist_sq <= bg_radius_sq {
                    self.theme.background
                // Frame
                } else if center_dist_sq <= radius_sq {
                    self.theme.frame
                } else {
                    continue; // Outside circle
                };

                self.set_pixel(x, y, color);
            }
        }

        self.draw_hour_marks(center, radius - frame_width);
    }

    fn draw_hour_marks(&mut self, center: Point, radius: f32) {
        let mark_half_width = (radius / 80.0).max(1.0);
        let mark_length = radius / 10.0;
        if mark_length < 1.0 {
            return;
        }

        let inset = radius / 20.0;
        let mark = Polygon {
            points: [
                Point::new(center.x - mark_half_width, center.y - radius + inset),
                Point::new(center.x + mark_half_width, center.y - radius + inset),
                Point::new(
                    center.x + mark_half_width,
                    center.y - radius + inset + mark_length,
                ),
                Point::new(
                    center.x - mark_half_width,
                    center.y - radius + inset + mark_length,
                ),
            ],
        };

        for hour in 0..12 {
            let rotation = Rotation::new(hour as f32 * 30.0, center);
            let color = self.theme.frame;
            self.fill(&mark.rotated(&rotation), color);
        }
    }

    /// Fills `polygon`, fading its edges by how much of each pixel they cover.
    fn fill(&mut self, polygon: &Polygon, color: Bgra) {
        if polygon.is_degenerate() || self.width == 0 || self.height == 0 {
            return;
        }

        // One extra pixel on each side catches the partially covered ring
        let (min, max) = polygon.bounds();
        let x0 = (min.x.floor() - 1.0).max(0.0) as u32;
        let y0 = (min.y.floor() - 1.0).max(0.0) as u32;
        let x1 = ((max.x.ceil() + 1.0).max(0.0) as u32).min(self.width);
        let y1 = ((max.y.ceil() + 1.0).max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (polygon.edge_distance(center) + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                // Fade out at the edges
                let alpha = (color.a() as f32 * coverage).round() as u8;
                Self::alpha_blending(
                    &mut self.pixel_data,
                    Self::pixel_idx(self.width, x, y),
                    color,
                    alpha,
                );
            }
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Bgra) {
        let index = Self::pixel_idx(self.width, x, y);
        if index + 3 < self.pixel_data.len() {
            self.pixel_data[index..index + 4].copy_from_slice(color.as_ref());
        }
    }

    #[inline]
    fn buffer_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    #[inline]
    fn pixel_idx(width: u32, x: u32, y: u32) -> usize {
        (y as usize * width as usize + x as usize) * 4
    }

    fn alpha_blending(pxl_data: &mut [u8], idx: usize, color: Bgra, alpha: u8) {
        if idx + 3 >= pxl_data.len() {
            return;
        }

        let inv_alpha = 255 - alpha;

        pxl_data[idx] = Self::blend_color(color.b(), alpha, pxl_data[idx], inv_alpha);
        pxl_data[idx + 1] = Self::blend_color(color.g(), alpha, pxl_data[idx + 1], inv_alpha);
        pxl_data[idx + 2] = Self::blend_color(color.r(), alpha, pxl_data[idx + 2], inv_alpha);
        pxl_data[idx + 3] = pxl_data[idx + 3].max(alpha);
    }

    #[inline]
    fn blend_color(src: u8, alpha: u8, dst: u8, inv_alpha: u8) -> u8 {
        ((src as u16 * alpha as u16 + dst as u16 * inv_alpha as u16) / 255) as u8
    }
}

impl Painter for Canvas {
    fn draw_face(&mut self, bounds: Rect) {
        if self.face_bounds == Some(bounds) {
            self.pixel_data.copy_from_slice(&self.face_cache);
            return;
        }

        self.draw_face_into(bounds);
        self.face_cache = self.pixel_data.clone();
        self.face_bounds = Some(bounds);
    }

    fn fill_polygon(&mut self, kind: HandKind, polygon: &Polygon) {
        let color = self.theme.hand(kind);
        self.fill(polygon, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::{Clock, Padding},
        time_state::TimeState,
    };

    fn square(x: f32, y: f32, side: f32) -> Polygon {
        Polygon {
            points: [
                Point::new(x, y),
                Point::new(x + side, y),
                Point::new(x + side, y + side),
                Point::new(x, y + side),
            ],
        }
    }

    #[test]
    fn fills_inside_only() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(16, 16, theme);
        canvas.fill_polygon(HandKind::Hour, &square(4.0, 4.0, 4.0));

        let hour = theme.hand(HandKind::Hour);
        assert_eq!(canvas.pixel(5, 5), Some([hour.b(), hour.g(), hour.r(), 255]));
        assert_eq!(canvas.pixel(9, 5), Some([0; 4]));
        assert_eq!(canvas.pixel(3, 3), Some([0; 4]));
    }

    #[test]
    fn edge_pixels_are_partially_covered() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(16, 16, theme);
        canvas.fill_polygon(HandKind::Hour, &square(4.25, 4.0, 4.0));

        // Left edge crosses pixel 4 a quarter of the way in
        let edge = canvas.pixel(4, 5).map(|p| p[3]);
        assert_eq!(edge, Some(191));
        assert_eq!(canvas.pixel(6, 5).map(|p| p[3]), Some(255));
        // Right edge at 8.25 leaves pixel 8 a quarter covered
        assert_eq!(canvas.pixel(8, 5).map(|p| p[3]), Some(64));
        assert_eq!(canvas.pixel(9, 5), Some([0; 4]));
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut canvas = Canvas::new(8, 8, Theme::default());
        canvas.fill_polygon(HandKind::Second, &Polygon::default());
        assert!(canvas.get_data().iter().all(|&b| b == 0));
    }

    #[test]
    fn polygon_outside_canvas_is_clipped() {
        let mut canvas = Canvas::new(8, 8, Theme::default());
        canvas.fill_polygon(HandKind::Minute, &square(-20.0, -20.0, 24.0));
        assert_ne!(canvas.pixel(0, 0), Some([0; 4]));
        assert_eq!(canvas.pixel(5, 5), Some([0; 4]));
    }

    #[test]
    fn face_is_cached_per_bounds() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(64, 64, theme);
        let bounds = Rect::from_size(64, 64);

        canvas.draw_face(bounds);
        let first = canvas.get_data().to_vec();
        canvas.fill_polygon(HandKind::Hour, &square(30.0, 30.0, 4.0));
        canvas.draw_face(bounds);

        assert_eq!(canvas.get_data(), first.as_slice());
        // Corners stay transparent, the middle is background
        assert_eq!(canvas.pixel(0, 0), Some([0; 4]));
        let bg = theme.background;
        assert_eq!(canvas.pixel(32, 40), Some([bg.b(), bg.g(), bg.r(), bg.a()]));
    }

    #[test]
    fn renders_clock_and_zero_sized_clock() {
        let mut clock = Clock::new(TimeState::new(0));
        let mut canvas = Canvas::new(0, 0, Theme::default());
        clock.render(&mut canvas);

        clock.on_resize(200, 200, Padding::default());
        canvas.resize(200, 200);
        clock.render(&mut canvas);

        // Second hand points straight up from the center
        let second = Theme::default().hand(HandKind::Second);
        assert_eq!(
            canvas.pixel(100, 20).map(|p| [p[0], p[1], p[2]]),
            Some([second.b(), second.g(), second.r()])
        );
    }
}
