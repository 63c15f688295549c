use crate::canvas::Canvas;
use crate::config::Config;
use crate::explosion;
use crate::particle::Particle;
use crate::rocket::Rocket;

// Per-tick translucent overlay toward the background; the afterimage knob.
const FADE_ALPHA: f32 = 0.1;

/// The whole show: active entity sets, the live settings, and the autofire
/// clock. One instance owns all simulation state; a tick is `update`
/// followed by `render`.
pub struct Simulation {
    width: f32,
    height: f32,
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,
    pub config: Config,
    auto_clock: f32,
}

impl Simulation {
    pub fn new(width: usize, height: usize, config: Config) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            rockets: Vec::new(),
            particles: Vec::new(),
            config,
            auto_clock: 0.0,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Launch one rocket from the bottom edge toward `(target_x, target_y)`,
    /// freezing the current launch velocity into it.
    pub fn launch(&mut self, target_x: f32, target_y: f32) {
        log::debug!("launch toward ({target_x:.0}, {target_y:.0})");
        self.rockets.push(Rocket::new(
            target_x,
            self.height,
            target_x,
            target_y,
            self.config.launch_velocity,
        ));
    }

    /// One autofire volley: `rockets_per_launch` rockets at random positions,
    /// aimed into the upper band of the sky.
    fn auto_volley(&mut self) {
        for _ in 0..self.config.rockets_per_launch {
            let x = fastrand::f32() * self.width;
            let y = fastrand::f32() * (self.height * 0.4) + self.height * 0.1;
            self.launch(x, y);
        }
    }

    /// Advance one tick. `dt` (seconds) only drives the autofire interval;
    /// entity physics are per-tick.
    pub fn update(&mut self, dt: f32) {
        if self.config.auto_fire {
            self.auto_clock += dt;
            while self.auto_clock >= self.config.launch_frequency {
                self.auto_clock -= self.config.launch_frequency;
                self.auto_volley();
            }
        } else {
            self.auto_clock = 0.0;
        }

        // Exploded rockets hand off to the generator and leave the active
        // set in the same tick.
        let mut bursts = Vec::new();
        self.rockets.retain_mut(|rocket| {
            rocket.update();
            if rocket.exploded {
                bursts.push((rocket.x, rocket.y));
                false
            } else {
                true
            }
        });
        for (x, y) in bursts {
            let batch = explosion::explode(x, y, &self.config);
            log::debug!("burst at ({x:.0}, {y:.0}): {} particles", batch.len());
            self.particles.extend(batch);
        }

        self.particles.retain_mut(|particle| {
            particle.update();
            particle.life > 0.0
        });
    }

    /// Paint the frame: fade overlay first, then every live entity. Exploded
    /// rockets and dead particles draw nothing, so painting after the update
    /// pass shows exactly the survivors.
    pub fn render(&self, canvas: &mut Canvas) {
        canvas.fade(FADE_ALPHA);
        for rocket in &self.rockets {
            rocket.draw(canvas);
        }
        for particle in &self.particles {
            particle.draw(canvas);
        }
    }
}
