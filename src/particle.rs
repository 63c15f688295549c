use crate::canvas::Canvas;
use crate::config::{Config, Rgb};

// Isotropic air resistance per tick, not configurable.
const DRAG: f32 = 0.99;
const MAX_TRAIL: usize = 10;
const MIN_RENDER_SIZE: f32 = 0.2;
const SPARKLE_CHANCE: f32 = 0.08;

struct TrailPoint {
    x: f32,
    y: f32,
    #[allow(dead_code)]
    life: f32,
}

/// Short-lived explosion debris. Physical constants are frozen from the
/// `Config` active at explosion time; later settings edits never reach an
/// existing particle.
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub life: f32,
    pub max_life: f32,
    pub gravity: f32,
    brightness: f32,
    fade_speed: f32,
    sparkle: bool,
    size: f32,
    pub has_trail: bool,
    trail: Vec<TrailPoint>,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, color: Rgb, config: &Config) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            color,
            life: config.particle_lifetime,
            max_life: config.particle_lifetime,
            gravity: config.gravity,
            brightness: config.brightness,
            fade_speed: config.fade_speed,
            sparkle: config.sparkle_effect,
            size: 1.0 + fastrand::f32() * 2.5,
            has_trail: false,
            trail: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[cfg(test)]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn update(&mut self) {
        if self.life <= 0.0 {
            return;
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vy += self.gravity;
        self.life -= self.fade_speed;

        self.vx *= DRAG;
        self.vy *= DRAG;

        if self.has_trail {
            self.trail.push(TrailPoint {
                x: self.x,
                y: self.y,
                life: self.life,
            });
            if self.trail.len() > MAX_TRAIL {
                self.trail.remove(0);
            }
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        let life_ratio = (self.life / self.max_life).max(0.0);
        if life_ratio <= 0.0 {
            return;
        }

        let base_alpha = life_ratio * self.brightness;
        let mut render_size = self.size * life_ratio;

        if self.has_trail && self.trail.len() > 1 {
            self.draw_trail(canvas, base_alpha * 0.35, render_size);
        }

        let sparkling = self.sparkle && fastrand::f32() < SPARKLE_CHANCE;
        let mut alpha = base_alpha;
        if sparkling {
            alpha *= 1.4;
            render_size *= 1.3;
        }
        let alpha = alpha.min(1.0);

        if render_size < MIN_RENDER_SIZE {
            return;
        }

        // Soft glow underneath, only when sparkle is on
        if self.sparkle {
            let glow_alpha = alpha * 0.25 * if sparkling { 1.3 } else { 1.0 };
            let glow_size = render_size * if sparkling { 2.0 } else { 1.5 };
            if glow_alpha > 0.02 && glow_size > 0.5 {
                canvas.fill_circle(self.x, self.y, glow_size, self.color, glow_alpha);
            }
        }

        canvas.fill_circle(self.x, self.y, render_size, self.color, alpha);
    }

    fn draw_trail(&self, canvas: &mut Canvas, alpha: f32, render_size: f32) {
        if alpha <= 0.01 {
            return;
        }
        let width = (render_size * 0.3).max(0.5);
        let mut last = &self.trail[0];
        for point in &self.trail[1..] {
            // Coalesce points that have barely moved to avoid degenerate
            // sub-pixel segments.
            if (point.x - last.x).abs() > 0.5 || (point.y - last.y).abs() > 0.5 {
                canvas.stroke_line(last.x, last.y, point.x, point.y, self.color, alpha, width);
                last = point;
            }
        }
    }
}
