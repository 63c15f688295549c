use crate::config::{Config, Pattern, Rgb, spoke_angle};
use crate::particle::Particle;

/// Synthesize the particle batch for a burst at `(x, y)`.
///
/// Resolves the configured type and color selectors once (so `Random`
/// re-rolls per explosion) and hands off to one of the six generators.
pub fn explode(x: f32, y: f32, config: &Config) -> Vec<Particle> {
    let pattern = config.firework_type.resolve();
    let color = config.color.resolve();
    generate(pattern, x, y, color, config)
}

/// Pure generator dispatch over a concrete pattern kind.
pub fn generate(pattern: Pattern, x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    match pattern {
        Pattern::Burst => burst(x, y, color, config),
        Pattern::Ring => ring(x, y, color, config),
        Pattern::Heart => heart(x, y, color, config),
        Pattern::Willow => willow(x, y, color, config),
        Pattern::Palm => palm(x, y, color, config),
        Pattern::Chrysanthemum => chrysanthemum(x, y, color, config),
    }
}

fn radius_scale(config: &Config) -> f32 {
    config.explosion_radius / 200.0
}

/// Classic spherical break: evenly spaced spokes, randomized speed.
fn burst(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = config.particle_count;
    let scale = radius_scale(config);
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spoke_angle(i, count);
        let speed = (2.0 + fastrand::f32() * 5.0) * scale;
        particles.push(Particle::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed,
            color,
            config,
        ));
    }
    particles
}

/// Tight circle: fewer particles, one fixed expansion speed.
fn ring(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = (config.particle_count as f32 * 0.8) as usize;
    let speed = 4.0 * radius_scale(config);
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spoke_angle(i, count);
        particles.push(Particle::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed,
            color,
            config,
        ));
    }
    particles
}

/// Velocity field traced along the parametric heart curve, cusp at t = 0.
fn heart(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = config.particle_count;
    let scale = radius_scale(config) * 0.3;
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let t = spoke_angle(i, count);
        let heart_x = 16.0 * t.sin().powi(3);
        let heart_y =
            -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
        particles.push(Particle::new(
            x,
            y,
            heart_x * scale * 0.1,
            heart_y * scale * 0.1,
            color,
            config,
        ));
    }
    particles
}

/// Drooping branches: jittered spokes, a small upward kick, and half again
/// as much gravity so the arcs bend over and fall.
fn willow(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = config.particle_count;
    let scale = radius_scale(config);
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spoke_angle(i, count) + fastrand::f32() * 0.5 - 0.25;
        let speed = (1.0 + fastrand::f32() * 3.0) * scale;
        let mut particle = Particle::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed - fastrand::f32() * 2.0,
            color,
            config,
        );
        particle.gravity = config.gravity * 1.5;
        particles.push(particle);
    }
    particles
}

/// Frond arcs: the vertical component is trimmed most near the horizontal
/// extremes, curving the spread upward like palm leaves.
fn palm(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = config.particle_count;
    let scale = radius_scale(config);
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spoke_angle(i, count);
        let speed = (2.0 + fastrand::f32() * 4.0) * scale;
        particles.push(Particle::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed - angle.cos().abs() * 2.0,
            color,
            config,
        ));
    }
    particles
}

/// Dense break with trailing particles; the only pattern that trails.
fn chrysanthemum(x: f32, y: f32, color: Rgb, config: &Config) -> Vec<Particle> {
    let count = (config.particle_count as f32 * 1.2) as usize;
    let scale = radius_scale(config);
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spoke_angle(i, count) + fastrand::f32() * 0.3 - 0.15;
        let speed = (1.0 + fastrand::f32() * 6.0) * scale;
        let mut particle = Particle::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed,
            color,
            config,
        );
        particle.has_trail = true;
        particles.push(particle);
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorName;
    use std::f32::consts::TAU;

    const RED: Rgb = (255, 50, 50);

    fn test_config(count: usize, radius: f32) -> Config {
        Config {
            particle_count: count,
            explosion_radius: radius,
            color: ColorName::Red,
            ..Config::default()
        }
    }

    fn speed_of(p: &Particle) -> f32 {
        (p.vx * p.vx + p.vy * p.vy).sqrt()
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        let mut d = (a - b) % TAU;
        if d > TAU / 2.0 {
            d -= TAU;
        }
        if d < -TAU / 2.0 {
            d += TAU;
        }
        d.abs()
    }

    #[test]
    fn test_burst_count_angles_and_speed_range() {
        fastrand::seed(11);
        let config = test_config(12, 200.0);
        let particles = generate(Pattern::Burst, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 12);
        for (i, p) in particles.iter().enumerate() {
            let expected = TAU * i as f32 / 12.0;
            assert!(angle_diff(p.vy.atan2(p.vx), expected) < 1e-3);
            let speed = speed_of(p);
            assert!(speed >= 2.0 - 1e-4 && speed <= 7.0 + 1e-4);
        }
    }

    #[test]
    fn test_burst_speed_scales_with_radius() {
        fastrand::seed(11);
        let config = test_config(20, 100.0);
        for p in generate(Pattern::Burst, 0.0, 0.0, RED, &config) {
            let speed = speed_of(&p);
            assert!(speed >= 1.0 - 1e-4 && speed <= 3.5 + 1e-4);
        }
    }

    #[test]
    fn test_ring_count_and_uniform_speed() {
        let config = test_config(10, 200.0);
        let particles = generate(Pattern::Ring, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 8); // floor(10 * 0.8)
        for p in &particles {
            assert!((speed_of(p) - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_heart_traces_parametric_curve() {
        let config = test_config(100, 200.0);
        let particles = generate(Pattern::Heart, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 100);
        // cusp at t = 0: straight up on screen, no lateral motion
        assert!(particles[0].vx.abs() < 1e-6);
        assert!((particles[0].vy - (-0.15)).abs() < 1e-4);
        // the outline is bounded by the curve's extents
        for p in &particles {
            assert!(p.vx.abs() <= 16.0 * 0.03 + 1e-4);
        }
        // lobes reach above the cusp (screen-up is negative y)
        let min_vy = particles.iter().map(|p| p.vy).fold(f32::MAX, f32::min);
        let max_vy = particles.iter().map(|p| p.vy).fold(f32::MIN, f32::max);
        assert!(min_vy < -0.15);
        assert!(max_vy > 0.0);
    }

    #[test]
    fn test_willow_boosts_gravity_and_stays_trailless() {
        fastrand::seed(11);
        let config = test_config(40, 200.0);
        let particles = generate(Pattern::Willow, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 40);
        for p in &particles {
            assert!((p.gravity - config.gravity * 1.5).abs() < 1e-6);
            assert!(!p.has_trail);
            // speed in [1, 4] plus at most a 2.0 upward kick
            assert!(speed_of(p) <= 6.0 + 1e-4);
        }
    }

    #[test]
    fn test_palm_trims_vertical_by_cos() {
        fastrand::seed(11);
        let config = test_config(24, 200.0);
        let particles = generate(Pattern::Palm, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 24);
        for (i, p) in particles.iter().enumerate() {
            let angle = TAU * i as f32 / 24.0;
            if angle.cos().abs() < 1e-3 {
                continue;
            }
            let speed = p.vx / angle.cos();
            assert!(speed >= 2.0 - 1e-3 && speed <= 6.0 + 1e-3);
            let expected_vy = angle.sin() * speed - angle.cos().abs() * 2.0;
            assert!((p.vy - expected_vy).abs() < 1e-3);
        }
    }

    #[test]
    fn test_chrysanthemum_count_and_trails() {
        fastrand::seed(11);
        let config = test_config(10, 200.0);
        let particles = generate(Pattern::Chrysanthemum, 0.0, 0.0, RED, &config);
        assert_eq!(particles.len(), 12); // floor(10 * 1.2)
        for p in &particles {
            assert!(p.has_trail);
            let speed = speed_of(p);
            assert!(speed >= 1.0 - 1e-4 && speed <= 7.0 + 1e-4);
        }
    }

    #[test]
    fn test_explode_uses_configured_color() {
        let mut config = test_config(5, 200.0);
        config.firework_type = crate::config::FireworkType::Burst;
        let particles = explode(100.0, 100.0, &config);
        assert_eq!(particles.len(), 5);
        for p in &particles {
            assert_eq!(p.color, RED);
            assert_eq!((p.x, p.y), (100.0, 100.0));
        }
    }
}
