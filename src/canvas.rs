use crate::config::Rgb;
use std::io::{BufWriter, Stdout, Write};

/// Persistent RGB framebuffer, one pixel per terminal half-cell (two pixel
/// rows per character row). Nothing clears it between frames; the fade pass
/// is what erases old light, which is what produces the afterimage trails.
pub struct Canvas {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<[f32; 3]>,
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        let bg = [
            background.0 as f32,
            background.1 as f32,
            background.2 as f32,
        ];
        Self {
            width,
            height,
            background,
            pixels: vec![bg; width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Blend every pixel toward the background by `alpha`. Equivalent to
    /// filling the whole surface with a translucent background-colored rect.
    pub fn fade(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let keep = 1.0 - alpha;
        let bg = [
            self.background.0 as f32,
            self.background.1 as f32,
            self.background.2 as f32,
        ];
        for pixel in &mut self.pixels {
            for ch in 0..3 {
                pixel[ch] = pixel[ch] * keep + bg[ch] * alpha;
            }
        }
    }

    /// Source-over blend of a single pixel. Out-of-bounds plots are dropped
    /// and alpha is clamped to [0, 1].
    fn plot(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let src = [color.0 as f32, color.1 as f32, color.2 as f32];
        let dst = &mut self.pixels[idx];
        for ch in 0..3 {
            dst[ch] = dst[ch] * (1.0 - alpha) + src[ch] * alpha;
        }
    }

    /// Filled disc with soft edge coverage.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let x_min = (cx - radius).floor() as i32;
        let x_max = (cx + radius).ceil() as i32;
        let y_min = (cy - radius).floor() as i32;
        let y_max = (cy + radius).ceil() as i32;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.plot(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Stroke a line segment by walking its major axis, stamping a span of
    /// `width` pixels perpendicular to it. Each cell is plotted at most once
    /// per step so repeated blending does not over-brighten the stroke.
    pub fn stroke_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgb,
        alpha: f32,
        width: f32,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let w = width.max(1.0).round() as i32;
        let span_lo = -((w - 1) / 2);
        let span_hi = w / 2;
        let steep = dy.abs() > dx.abs();

        let mut last_cell = (i32::MIN, i32::MIN);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (x0 + dx * t).round() as i32;
            let y = (y0 + dy * t).round() as i32;
            if (x, y) == last_cell {
                continue;
            }
            last_cell = (x, y);
            for offset in span_lo..=span_hi {
                if steep {
                    self.plot(x + offset, y, color, alpha);
                } else {
                    self.plot(x, y + offset, color, alpha);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.width + x]
    }

    /// Emit the buffer as truecolor half-blocks: each character cell shows
    /// two pixel rows, background = top, foreground = bottom.
    pub fn present(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Rgb = (255, 255, 255);
        let mut prev_bot: Rgb = (255, 255, 255);

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top = quantize(self.pixels[top_idx]);
                let bot = quantize(self.pixels[bot_idx]);

                if top != prev_top {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = top;
                }
                if bot != prev_bot {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = bot;
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = (255, 255, 255);
            prev_bot = (255, 255, 255);
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        stdout.write_all(&self.output_buf)?;
        stdout.flush()?;
        Ok(())
    }
}

fn quantize(pixel: [f32; 3]) -> Rgb {
    (
        pixel[0].clamp(0.0, 255.0) as u8,
        pixel[1].clamp(0.0, 255.0) as u8,
        pixel[2].clamp(0.0, 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_background() {
        let canvas = Canvas::new(4, 4, (10, 10, 10));
        assert_eq!(canvas.pixel(0, 0), [10.0, 10.0, 10.0]);
        assert_eq!(canvas.pixel(3, 3), [10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_fade_blends_toward_background() {
        let mut canvas = Canvas::new(2, 2, (10, 10, 10));
        canvas.plot(0, 0, (255, 255, 255), 1.0);
        canvas.fade(0.1);
        let expected = 255.0 * 0.9 + 10.0 * 0.1;
        assert!((canvas.pixel(0, 0)[0] - expected).abs() < 1e-3);
        // repeated fades converge on the background
        for _ in 0..500 {
            canvas.fade(0.1);
        }
        assert!((canvas.pixel(0, 0)[0] - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_plot_alpha_clamped() {
        let mut canvas = Canvas::new(2, 2, (0, 0, 0));
        canvas.plot(0, 0, (200, 100, 50), 5.0);
        assert_eq!(canvas.pixel(0, 0), [200.0, 100.0, 50.0]);
    }

    #[test]
    fn test_plot_out_of_bounds_ignored() {
        let mut canvas = Canvas::new(2, 2, (0, 0, 0));
        canvas.plot(-1, 0, (255, 255, 255), 1.0);
        canvas.plot(0, 99, (255, 255, 255), 1.0);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(canvas.pixel(x, y), [0.0, 0.0, 0.0]);
            }
        }
    }

    #[test]
    fn test_fill_circle_covers_center() {
        let mut canvas = Canvas::new(10, 10, (0, 0, 0));
        canvas.fill_circle(5.0, 5.0, 2.0, (255, 0, 0), 1.0);
        assert!(canvas.pixel(5, 5)[0] > 200.0);
        assert_eq!(canvas.pixel(0, 0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_radius_circle_draws_nothing() {
        let mut canvas = Canvas::new(4, 4, (0, 0, 0));
        canvas.fill_circle(2.0, 2.0, 0.0, (255, 255, 255), 1.0);
        assert_eq!(canvas.pixel(2, 2), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stroke_line_touches_endpoints() {
        let mut canvas = Canvas::new(10, 10, (0, 0, 0));
        canvas.stroke_line(1.0, 2.0, 7.0, 2.0, (0, 255, 0), 1.0, 1.0);
        assert!(canvas.pixel(1, 2)[1] > 200.0);
        assert!(canvas.pixel(7, 2)[1] > 200.0);
        assert!(canvas.pixel(4, 2)[1] > 200.0);
        assert_eq!(canvas.pixel(4, 5), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stroke_line_single_point() {
        let mut canvas = Canvas::new(4, 4, (0, 0, 0));
        canvas.stroke_line(1.0, 1.0, 1.0, 1.0, (255, 255, 255), 0.5, 1.0);
        assert!(canvas.pixel(1, 1)[0] > 100.0);
    }
}
