use crate::canvas::Canvas;

/// Detonation distance from the target, in pixels.
pub const ARRIVAL_DISTANCE: f32 = 10.0;

const MAX_TRAIL: usize = 20;
// Slightly yellowish exhaust
const TRAIL_COLOR: (u8, u8, u8) = (255, 255, 225);
const HEAD_COLOR: (u8, u8, u8) = (255, 255, 255);
const HEAD_RADIUS: f32 = 3.0;

/// Ballistic launch entity. The velocity vector is fixed at creation from
/// the launch/target geometry; only the position and trail mutate.
pub struct Rocket {
    pub x: f32,
    pub y: f32,
    target_x: f32,
    target_y: f32,
    vx: f32,
    vy: f32,
    pub exploded: bool,
    trail: Vec<(f32, f32)>,
}

impl Rocket {
    pub fn new(start_x: f32, start_y: f32, target_x: f32, target_y: f32, speed: f32) -> Self {
        let dx = target_x - start_x;
        let dy = target_y - start_y;
        let distance = (dx * dx + dy * dy).sqrt();

        // Zero-length launch vector has no direction to normalize; treat it
        // as already arrived.
        let (vx, vy, exploded) = if distance < f32::EPSILON {
            (0.0, 0.0, true)
        } else {
            (dx / distance * speed, dy / distance * speed, false)
        };

        Self {
            x: start_x,
            y: start_y,
            target_x,
            target_y,
            vx,
            vy,
            exploded,
            trail: Vec::new(),
        }
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    #[cfg(test)]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Advance one tick. Detonates within `ARRIVAL_DISTANCE` of the target,
    /// or once the rocket has climbed to the target's altitude, so a shot
    /// that slips past the radius check still bursts at its apex.
    pub fn update(&mut self) {
        if self.exploded {
            return;
        }

        self.trail.push((self.x, self.y));
        if self.trail.len() > MAX_TRAIL {
            self.trail.remove(0);
        }

        self.x += self.vx;
        self.y += self.vy;

        let dx = self.target_x - self.x;
        let dy = self.target_y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < ARRIVAL_DISTANCE || self.y <= self.target_y {
            self.exploded = true;
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        if self.exploded {
            return;
        }

        // Trail segments fade from near-invisible at the oldest point up to
        // 0.8 at the newest; faint old segments are skipped entirely.
        let n = self.trail.len();
        for i in 0..n.saturating_sub(1) {
            let alpha = i as f32 / (n - 1) as f32 * 0.8;
            if alpha < 0.01 && i + 2 < n {
                continue;
            }
            let (ax, ay) = self.trail[i];
            let (bx, by) = self.trail[i + 1];
            canvas.stroke_line(ax, ay, bx, by, TRAIL_COLOR, alpha, 2.0);
        }

        canvas.fill_circle(self.x, self.y, HEAD_RADIUS, HEAD_COLOR, 1.0);
    }
}
