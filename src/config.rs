use std::f32::consts::TAU;

/// RGB color as emitted by the terminal renderer.
pub type Rgb = (u8, u8, u8);

// Firework colors and the chemical compounds that produce them
const COLOR_TABLE: [(ColorName, Rgb); 8] = [
    (ColorName::Red, (255, 50, 50)),      // Strontium
    (ColorName::Green, (50, 255, 50)),    // Barium
    (ColorName::Blue, (50, 150, 255)),    // Copper
    (ColorName::Gold, (255, 215, 0)),     // Iron
    (ColorName::Silver, (220, 220, 255)), // Magnesium
    (ColorName::Purple, (150, 50, 255)),  // Strontium + Copper
    (ColorName::White, (255, 255, 255)),  // Magnesium
    (ColorName::Orange, (255, 165, 0)),   // Calcium
];

/// User-facing firework type selector. `Random` re-rolls per explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireworkType {
    Burst,
    Chrysanthemum,
    Peony,
    Willow,
    Palm,
    Ring,
    Heart,
    Random,
}

/// Concrete pattern generator kind, resolved from a `FireworkType` once per
/// explosion. Never `Random`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Burst,
    Ring,
    Heart,
    Willow,
    Palm,
    Chrysanthemum,
}

impl FireworkType {
    pub const ALL: [FireworkType; 8] = [
        FireworkType::Burst,
        FireworkType::Chrysanthemum,
        FireworkType::Peony,
        FireworkType::Willow,
        FireworkType::Palm,
        FireworkType::Ring,
        FireworkType::Heart,
        FireworkType::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FireworkType::Burst => "burst",
            FireworkType::Chrysanthemum => "chrysanthemum",
            FireworkType::Peony => "peony",
            FireworkType::Willow => "willow",
            FireworkType::Palm => "palm",
            FireworkType::Ring => "ring",
            FireworkType::Heart => "heart",
            FireworkType::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.to_lowercase())
    }

    /// Cycle to the next selector, wrapping after `Random`.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Resolve the selector to a concrete pattern kind. `Random` draws
    /// uniformly among the six generators; Peony has no generator of its
    /// own and falls through to Burst.
    pub fn resolve(self) -> Pattern {
        match self {
            FireworkType::Chrysanthemum => Pattern::Chrysanthemum,
            FireworkType::Willow => Pattern::Willow,
            FireworkType::Palm => Pattern::Palm,
            FireworkType::Ring => Pattern::Ring,
            FireworkType::Heart => Pattern::Heart,
            FireworkType::Random => Pattern::random(),
            FireworkType::Burst | FireworkType::Peony => Pattern::Burst,
        }
    }
}

impl Pattern {
    pub fn random() -> Self {
        match fastrand::usize(0..6) {
            0 => Pattern::Burst,
            1 => Pattern::Ring,
            2 => Pattern::Heart,
            3 => Pattern::Willow,
            4 => Pattern::Palm,
            _ => Pattern::Chrysanthemum,
        }
    }
}

/// User-facing color selector. `Random` re-rolls per explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Gold,
    Silver,
    Purple,
    White,
    Orange,
    Random,
}

impl ColorName {
    pub const ALL: [ColorName; 9] = [
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Gold,
        ColorName::Silver,
        ColorName::Purple,
        ColorName::White,
        ColorName::Orange,
        ColorName::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Gold => "gold",
            ColorName::Silver => "silver",
            ColorName::Purple => "purple",
            ColorName::White => "white",
            ColorName::Orange => "orange",
            ColorName::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_lowercase())
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Resolve the selector to an RGB triple, rolling `Random` once.
    pub fn resolve(self) -> Rgb {
        if self == ColorName::Random {
            COLOR_TABLE[fastrand::usize(0..COLOR_TABLE.len())].1
        } else {
            COLOR_TABLE
                .iter()
                .find(|(name, _)| *name == self)
                .map(|(_, rgb)| *rgb)
                .unwrap_or((255, 255, 255))
        }
    }
}

/// Tunable simulation parameters. Entities copy the fields they need at
/// creation time, so edits here only affect future launches and bursts.
#[derive(Clone, Debug)]
pub struct Config {
    pub firework_type: FireworkType,
    pub color: ColorName,
    pub particle_count: usize,
    pub explosion_radius: f32,
    pub gravity: f32,
    pub launch_velocity: f32,
    pub particle_lifetime: f32,
    pub brightness: f32,
    pub fade_speed: f32,
    pub sparkle_effect: bool,
    pub auto_fire: bool,
    pub launch_frequency: f32,
    pub rockets_per_launch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firework_type: FireworkType::Random,
            color: ColorName::Random,
            particle_count: 100,
            explosion_radius: 200.0,
            gravity: 0.3,
            launch_velocity: 18.0,
            particle_lifetime: 1.5,
            brightness: 0.8,
            fade_speed: 0.02,
            sparkle_effect: true,
            auto_fire: false,
            launch_frequency: 2.0,
            rockets_per_launch: 1,
        }
    }
}

/// Named parameter bundles matching the original display presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Spectacular,
    Gentle,
    RapidFire,
    GiantBursts,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Spectacular => "spectacular",
            Preset::Gentle => "gentle",
            Preset::RapidFire => "rapid-fire",
            Preset::GiantBursts => "giant-bursts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spectacular" => Some(Preset::Spectacular),
            "gentle" => Some(Preset::Gentle),
            "rapid-fire" | "rapidfire" => Some(Preset::RapidFire),
            "giant-bursts" | "giantbursts" => Some(Preset::GiantBursts),
            _ => None,
        }
    }

    /// Overlay this preset's parameters on `config`. Fields the preset does
    /// not name (type, color, fade speed, sparkle) are left alone.
    pub fn apply(self, config: &mut Config) {
        let (count, radius, gravity, velocity, brightness, auto, freq) = match self {
            Preset::Spectacular => (150, 250.0, 0.3, 20.0, 1.0, true, 1.5),
            Preset::Gentle => (80, 150.0, 0.2, 15.0, 0.7, true, 3.0),
            Preset::RapidFire => (100, 180.0, 0.4, 18.0, 0.9, true, 0.8),
            Preset::GiantBursts => (200, 300.0, 0.25, 25.0, 1.0, false, 4.0),
        };
        config.particle_count = count;
        config.explosion_radius = radius;
        config.gravity = gravity;
        config.launch_velocity = velocity;
        config.brightness = brightness;
        config.auto_fire = auto;
        config.launch_frequency = freq;
    }
}

/// Uniform angle for particle `i` of `count` around the full circle.
pub fn spoke_angle(i: usize, count: usize) -> f32 {
    TAU * i as f32 / count.max(1) as f32
}
