use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use glam::Vec2;
use halo_config::Config;
use halo_core::{Palette, RingKind, TimeFormat};
use halo_engine::ClockEngine;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use tracing::info;

mod logging;
mod render;

/// How far the camera drifts toward the pointer, in world units.
const PARALLAX_STRENGTH: f32 = 0.3;
/// Per-frame easing of the camera toward its parallax target.
const PARALLAX_EASE: f32 = 0.05;
/// How long status messages stay on screen.
const STATUS_DURATION: Duration = Duration::from_secs(2);
/// Push factor change per key press.
const PUSH_STEP: f32 = 0.01;

/// A radial clock whose numerals pulse, drift and wobble.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Show 12 numerals on the hours ring.
    #[arg(long, conflicts_with = "twenty_four_hour")]
    twelve_hour: bool,
    /// Show 24 numerals on the hours ring.
    #[arg(long)]
    twenty_four_hour: bool,
    /// Seed for the radius noise.
    #[arg(long)]
    seed: Option<u32>,
    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Write the effective configuration and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Load the config file and apply command line overrides.
    fn resolve_config(&self) -> color_eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if self.twelve_hour {
            config.time_format = TimeFormat::TwelveHour;
        }
        if self.twenty_four_hour {
            config.time_format = TimeFormat::TwentyFourHour;
        }
        if let Some(seed) = self.seed {
            config.noise_seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        Ok(config.sanitized())
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init();

    let config = cli.resolve_config()?;
    if cli.write_config {
        let path = match &cli.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save()?,
        };
        println!("wrote {}", path.display());
        return Ok(());
    }

    let app = App::new(config, cli.config)?;
    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Ring animation state.
    engine: ClockEngine,
    /// Current configuration snapshot.
    config: Config,
    /// Where `s` saves the configuration; the default location when unset.
    config_path: Option<PathBuf>,
    /// Current color palette; `None` while the configured colors match no
    /// palette.
    palette: Option<Palette>,
    /// Pointer position, normalized to [-1, 1] with y up.
    pointer: Vec2,
    /// Eased camera offset following the pointer.
    view: Vec2,
    /// Last known terminal size, for normalizing pointer positions.
    size: (u16, u16),
    /// Transient message shown in the help line.
    status: Option<(String, Instant)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> color_eyre::Result<Self> {
        let engine = ClockEngine::new(config.clone())?;
        let palette = palette_of(&config);
        info!(noise_seed = engine.noise_seed(), "starting clock");
        Ok(Self {
            running: false,
            engine,
            config,
            config_path,
            palette,
            pointer: Vec2::ZERO,
            view: Vec2::ZERO,
            size: (0, 0),
            status: None,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let start = Instant::now();
        let mut last = start;
        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last).as_secs_f32();
            let elapsed = frame_start.duration_since(start).as_secs_f64();
            last = frame_start;

            self.view = self
                .view
                .lerp(self.pointer * PARALLAX_STRENGTH, PARALLAX_EASE);
            self.engine.step(dt, elapsed, &Local::now());
            terminal.draw(|frame| self.render(frame))?;
            for ring in &mut self.engine.output_mut().rings {
                ring.curve.mark_uploaded();
            }

            let budget = self.frame_duration().saturating_sub(frame_start.elapsed());
            self.handle_crossterm_events(budget)?;
        }
        Ok(())
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.frame_rate.max(1) as f64)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.size = (area.width, area.height);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Clock face
            Constraint::Length(1), // Help text
        ])
        .split(area);

        render::render_clock(frame, chunks[0], self.engine.output(), self.view);

        let accent = self.config.highlight_color.color();
        let help = match &self.status {
            Some((message, shown)) if shown.elapsed() < STATUS_DURATION => {
                Line::from(message.clone().fg(accent)).centered()
            }
            _ => Line::from(vec![
                "q".bold().fg(accent),
                " quit  ".dark_gray(),
                "t".bold().fg(accent),
                " toggle 12/24h  ".dark_gray(),
                "c".bold().fg(accent),
                " cycle palette  ".dark_gray(),
                "+/-".bold().fg(accent),
                " push  ".dark_gray(),
                "s".bold().fg(accent),
                " save".dark_gray(),
            ])
            .centered(),
        };
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame starts on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.size = (width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_time_format()?,
            (_, KeyCode::Char('c')) => self.cycle_palette()?,
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.adjust_push(PUSH_STEP)?,
            (_, KeyCode::Char('-')) => self.adjust_push(-PUSH_STEP)?,
            (_, KeyCode::Char('s')) => self.save_config(),
            _ => {}
        }
        Ok(())
    }

    /// Track the pointer for the parallax effect.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.pointer = normalize_pointer(mouse.column, mouse.row, self.size);
        }
    }

    /// Send a new configuration snapshot to the engine.
    fn apply(&mut self, config: Config) -> color_eyre::Result<()> {
        self.engine.apply_config(config)?;
        self.config = self.engine.config().clone();
        Ok(())
    }

    /// Toggle between 12-hour and 24-hour hours ring.
    fn toggle_time_format(&mut self) -> color_eyre::Result<()> {
        let mut config = self.config.clone();
        config.time_format = config.time_format.toggle();
        self.apply(config)
    }

    /// Cycle through available color palettes, starting from the loaded
    /// colors. Custom colors are replaced by the first palette.
    fn cycle_palette(&mut self) -> color_eyre::Result<()> {
        let palette = self.palette.map_or(Palette::Classic, |palette| palette.next());
        self.palette = Some(palette);
        let config = self.config.with_palette(palette);
        self.apply(config)?;
        self.set_status(format!("palette {palette:?} (s to save)").to_lowercase());
        Ok(())
    }

    /// Strengthen or weaken the neighbour push.
    fn adjust_push(&mut self, delta: f32) -> color_eyre::Result<()> {
        let mut config = self.config.clone();
        config.push.factor += delta;
        self.apply(config)?;
        self.set_status(format!("push factor {:.2}", self.config.push.factor));
        Ok(())
    }

    /// Save the current configuration, reporting the outcome in the help line.
    fn save_config(&mut self) {
        let result = match &self.config_path {
            Some(path) => self.config.save_to(path).map(|()| path.clone()),
            None => self.config.save(),
        };
        let message = match result {
            Ok(path) => format!("saved {}", path.display()),
            Err(err) => format!("save failed: {err}"),
        };
        self.set_status(message);
    }

    fn set_status(&mut self, message: String) {
        self.status = Some((message, Instant::now()));
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Palette matching the configured colors.
fn palette_of(config: &Config) -> Option<Palette> {
    let rings = RingKind::ALL.map(|kind| config.ring(kind).color);
    Palette::matching(rings, config.highlight_color)
}

/// Map a terminal cell to [-1, 1] on both axes, y pointing up.
fn normalize_pointer(column: u16, row: u16, (width, height): (u16, u16)) -> Vec2 {
    let axis = |value: u16, extent: u16| {
        if extent <= 1 {
            0.0
        } else {
            (value as f32 / (extent - 1) as f32) * 2.0 - 1.0
        }
    };
    Vec2::new(axis(column, width), -axis(row, height)).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            Config {
                noise_seed: Some(3),
                ..Config::default()
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_pointer() {
        assert_eq!(normalize_pointer(0, 0, (81, 41)), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(80, 40, (81, 41)), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(40, 20, (81, 41)), Vec2::ZERO);
        assert_eq!(normalize_pointer(5, 5, (0, 0)), Vec2::ZERO);
    }

    #[test]
    fn test_toggle_time_format_rebuilds_hours() {
        let mut app = app();
        app.toggle_time_format().unwrap();
        assert_eq!(app.config.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(
            app.engine.ring(RingKind::Hours).elements().len(),
            24
        );
    }

    #[test]
    fn test_cycle_palette_sends_new_snapshot() {
        let mut app = app();
        app.cycle_palette().unwrap();
        assert_eq!(app.palette, Some(Palette::Ember));
        assert_eq!(app.engine.config().highlight_color, Palette::Ember.highlight());
    }

    #[test]
    fn test_palette_cycling_starts_from_loaded_colors() {
        let ocean = Config {
            noise_seed: Some(3),
            ..Config::default()
        }
        .with_palette(Palette::Ocean);
        let mut app = App::new(ocean, None).unwrap();
        assert_eq!(app.palette, Some(Palette::Ocean));
        app.cycle_palette().unwrap();
        assert_eq!(app.palette, Some(Palette::Forest));

        let mut custom = Config {
            noise_seed: Some(3),
            ..Config::default()
        };
        custom.hours.color = halo_core::Rgb::new(1, 2, 3);
        let mut app = App::new(custom, None).unwrap();
        assert_eq!(app.palette, None);
        app.cycle_palette().unwrap();
        assert_eq!(app.palette, Some(Palette::Classic));
        assert!(app.status.is_some());
    }

    #[test]
    fn test_adjust_push_is_clamped() {
        let mut app = app();
        for _ in 0..50 {
            app.adjust_push(PUSH_STEP).unwrap();
        }
        assert_eq!(app.config.push.factor, 0.2);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        app.running = true;
        app.on_key_event(KeyEvent::from(KeyCode::Char('q'))).unwrap();
        assert!(!app.running);
    }
}
