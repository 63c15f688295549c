use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, stdout};
use std::time::{Duration, Instant};

mod canvas;
mod config;
mod explosion;
mod particle;
mod rocket;
mod sim;

use canvas::Canvas;
use config::{ColorName, Config, FireworkType, Preset, Rgb};
use sim::Simulation;

const DEFAULT_BG: Rgb = (10, 10, 10);
const FRAME: Duration = Duration::from_micros(16_667); // ~60 fps

fn print_usage() {
    eprintln!("termworks - interactive fireworks for your terminal");
    eprintln!();
    eprintln!("Usage: termworks [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --preset NAME      spectacular | gentle | rapid-fire | giant-bursts");
    eprintln!("  --type NAME        burst | chrysanthemum | peony | willow | palm |");
    eprintln!("                     ring | heart | random (default: random)");
    eprintln!("  --color NAME       red | green | blue | gold | silver | purple |");
    eprintln!("                     white | orange | random (default: random)");
    eprintln!("  --particles N      particles per explosion (default: 100)");
    eprintln!("  --radius R         explosion radius in pixels (default: 200)");
    eprintln!("  --gravity G        downward acceleration per tick (default: 0.3)");
    eprintln!("  --velocity V       rocket launch speed in pixels/tick (default: 18)");
    eprintln!("  --lifetime T       particle lifetime (default: 1.5)");
    eprintln!("  --brightness B     particle brightness, 0 to 1 (default: 0.8)");
    eprintln!("  --fade-speed F     life drained per tick (default: 0.02)");
    eprintln!("  --no-sparkle       disable sparkle and glow");
    eprintln!("  --auto             start with autofire enabled");
    eprintln!("  --frequency S      seconds between autofire volleys (default: 2.0)");
    eprintln!("  --rockets N        rockets per autofire volley (default: 1)");
    eprintln!("  --bg-color RRGGBB  background color as hex (e.g. --bg-color 1a1b26)");
    eprintln!();
    eprintln!("Controls:");
    eprintln!("  click      launch a rocket at the pointer");
    eprintln!("  a          toggle autofire");
    eprintln!("  t / c      cycle firework type / color");
    eprintln!("  1-4        apply preset (spectacular, gentle, rapid-fire, giant-bursts)");
    eprintln!("  q, ESC, or Ctrl+C to exit");
}

fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn bail(message: String) -> ! {
    eprintln!("{message}");
    eprintln!();
    print_usage();
    std::process::exit(1);
}

/// Parse the command line into a starting `Config` and background color.
fn parse_args(args: &[String]) -> (Config, Rgb) {
    let mut config = Config::default();
    let mut bg_color = DEFAULT_BG;

    let take_value = |i: &mut usize, flag: &str| -> String {
        if *i + 1 >= args.len() {
            bail(format!("{flag} requires a value"));
        }
        *i += 2;
        args[*i - 1].clone()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--preset" => {
                let value = take_value(&mut i, "--preset");
                match Preset::from_str(&value) {
                    Some(preset) => preset.apply(&mut config),
                    None => bail(format!("Unknown preset: {value}")),
                }
            }
            "--type" => {
                let value = take_value(&mut i, "--type");
                match FireworkType::from_str(&value) {
                    Some(t) => config.firework_type = t,
                    None => bail(format!("Unknown firework type: {value}")),
                }
            }
            "--color" => {
                let value = take_value(&mut i, "--color");
                match ColorName::from_str(&value) {
                    Some(c) => config.color = c,
                    None => bail(format!("Unknown color: {value}")),
                }
            }
            "--particles" => {
                let value = take_value(&mut i, "--particles");
                config.particle_count = value
                    .parse()
                    .unwrap_or_else(|_| bail(format!("Invalid particle count: {value}")));
            }
            "--rockets" => {
                let value = take_value(&mut i, "--rockets");
                config.rockets_per_launch = value
                    .parse()
                    .unwrap_or_else(|_| bail(format!("Invalid rocket count: {value}")));
            }
            "--radius" | "--gravity" | "--velocity" | "--lifetime" | "--brightness"
            | "--fade-speed" | "--frequency" => {
                let flag = args[i].clone();
                let value = take_value(&mut i, &flag);
                let parsed: f32 = value
                    .parse()
                    .unwrap_or_else(|_| bail(format!("Invalid value for {flag}: {value}")));
                match flag.as_str() {
                    "--radius" => config.explosion_radius = parsed,
                    "--gravity" => config.gravity = parsed,
                    "--velocity" => config.launch_velocity = parsed,
                    "--lifetime" => config.particle_lifetime = parsed,
                    "--brightness" => config.brightness = parsed,
                    "--fade-speed" => config.fade_speed = parsed,
                    _ => config.launch_frequency = parsed,
                }
            }
            "--no-sparkle" => {
                config.sparkle_effect = false;
                i += 1;
            }
            "--auto" => {
                config.auto_fire = true;
                i += 1;
            }
            "--bg-color" => {
                let value = take_value(&mut i, "--bg-color");
                match parse_hex_color(&value) {
                    Some(color) => bg_color = color,
                    None => bail(format!(
                        "Invalid hex color: {value}\nExpected format: RRGGBB (e.g., 1a1b26)"
                    )),
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            arg => bail(format!("Unknown option: {arg}")),
        }
    }

    (config, bg_color)
}

fn run(config: Config, bg_color: Rgb) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    )?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2, bg_color);
    let mut sim = Simulation::new(canvas.width(), canvas.height(), config);
    log::info!("started at {}x{} pixels", canvas.width(), canvas.height());

    let mut last_tick = Instant::now();

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c')
                        if key_event.modifiers.contains(event::KeyModifiers::CONTROL) =>
                    {
                        break;
                    }
                    KeyCode::Char('a') => {
                        sim.config.auto_fire = !sim.config.auto_fire;
                        log::debug!("autofire: {}", sim.config.auto_fire);
                    }
                    KeyCode::Char('t') => {
                        sim.config.firework_type = sim.config.firework_type.next();
                        log::debug!("type: {}", sim.config.firework_type.as_str());
                    }
                    KeyCode::Char('c') => {
                        sim.config.color = sim.config.color.next();
                        log::debug!("color: {}", sim.config.color.as_str());
                    }
                    KeyCode::Char('1') => Preset::Spectacular.apply(&mut sim.config),
                    KeyCode::Char('2') => Preset::Gentle.apply(&mut sim.config),
                    KeyCode::Char('3') => Preset::RapidFire.apply(&mut sim.config),
                    KeyCode::Char('4') => Preset::GiantBursts.apply(&mut sim.config),
                    _ => {}
                },
                Event::Mouse(mouse_event) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                        sim.launch(mouse_event.column as f32, mouse_event.row as f32 * 2.0);
                    }
                }
                Event::Resize(cols, rows) => {
                    canvas = Canvas::new(cols as usize, rows as usize * 2, bg_color);
                    sim.resize(canvas.width(), canvas.height());
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_tick);
        if elapsed >= FRAME {
            last_tick = now;
            sim.update(elapsed.as_secs_f32());
            sim.render(&mut canvas);
            canvas.present(&mut stdout)?;
        }
    }

    execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;
    log::info!("stopped");

    Ok(())
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (config, bg_color) = parse_args(&args);

    run(config, bg_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("termworks")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("1a1b26"), Some((0x1a, 0x1b, 0x26)));
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_parse_args_defaults() {
        let (config, bg) = parse_args(&args(&[]));
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.firework_type, FireworkType::Random);
        assert_eq!(bg, DEFAULT_BG);
    }

    #[test]
    fn test_parse_args_overrides() {
        let (config, bg) = parse_args(&args(&[
            "--type",
            "heart",
            "--color",
            "gold",
            "--particles",
            "42",
            "--gravity",
            "0.5",
            "--no-sparkle",
            "--auto",
            "--bg-color",
            "000000",
        ]));
        assert_eq!(config.firework_type, FireworkType::Heart);
        assert_eq!(config.color, ColorName::Gold);
        assert_eq!(config.particle_count, 42);
        assert_eq!(config.gravity, 0.5);
        assert!(!config.sparkle_effect);
        assert!(config.auto_fire);
        assert_eq!(bg, (0, 0, 0));
    }

    #[test]
    fn test_parse_args_preset_then_override() {
        let (config, _) = parse_args(&args(&["--preset", "gentle", "--velocity", "30"]));
        assert_eq!(config.particle_count, 80);
        assert_eq!(config.launch_velocity, 30.0);
        assert!(config.auto_fire);
    }
}
