use crate::config::GameConfig;
use crate::engine::action::Action;
use crate::engine::clock::TickClock;
use crate::engine::input::Button;
use crate::engine::surface::Canvas;
use crate::engine::world::World;
use crate::map::asset::{bundled_world, load_world};
use crate::tui::{
    input::{key_action, mouse_action},
    renderer::render,
};

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
    time::{Duration, Instant},
};

/// Synthesizes releases for terminals that only report presses.
///
/// Auto-repeat keeps refreshing a held key; once no press or repeat has
/// arrived within the timeout, the key counts as let go.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    timeout: Duration,
    last_seen: [Option<Instant>; 5],
}

impl HoldTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_seen: [None; 5],
        }
    }

    pub fn touch(&mut self, button: Button, now: Instant) {
        self.last_seen[button.slot()] = Some(now);
    }

    pub fn forget(&mut self, button: Button) {
        self.last_seen[button.slot()] = None;
    }

    /// Buttons whose hold lapsed; each one is reported once.
    pub fn expired(&mut self, now: Instant) -> Vec<Button> {
        let mut out = Vec::new();
        for button in Button::ALL {
            let slot = &mut self.last_seen[button.slot()];
            if let Some(at) = *slot {
                if now.duration_since(at) >= self.timeout {
                    *slot = None;
                    out.push(button);
                }
            }
        }
        out
    }
}

/// Runs the game until the player quits. Returns the edit exports made
/// during the session.
pub fn run(config: &GameConfig) -> anyhow::Result<Vec<String>> {
    let loaded = match &config.world_path {
        Some(path) => load_world(path)
            .with_context(|| format!("loading world from {}", path.display()))?,
        None => bundled_world().context("loading bundled world")?,
    };

    let mut world = World::new(loaded, config);
    let mut canvas = Canvas::new(world.background());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;

    let releases_reported = matches!(supports_keyboard_enhancement(), Ok(true));
    if releases_reported {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(releases_reported, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = drive(&mut terminal, &mut world, &mut canvas, config, releases_reported);

    if releases_reported {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(world.exports().to_vec())
}

fn drive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    world: &mut World,
    canvas: &mut Canvas,
    config: &GameConfig,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let mut clock = TickClock::new(config.tick, Instant::now());
    tracing::info!(tick_ms = clock.step().as_millis() as u64, "game loop started");
    let mut holds = HoldTimer::new(config.hold_timeout);
    let mut map_area = Rect::default();
    let mut saved_exports = 0;

    world.tick(canvas);
    terminal.draw(|f| map_area = render(f, world, canvas))?;

    let mut running = true;
    while running {
        if event::poll(clock.timeout(Instant::now()))? {
            let action = match event::read()? {
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                    terminal.clear()?;
                    Action::None
                }
                Event::Key(key) => {
                    let action = key_action(&key);
                    match action {
                        Action::Press(b) if !releases_reported => holds.touch(b, Instant::now()),
                        Action::Release(b) => holds.forget(b),
                        _ => {}
                    }
                    action
                }
                Event::Mouse(mouse) => mouse_action(&mouse, map_area),
                // Releases that happen elsewhere never reach us.
                Event::FocusLost => {
                    world.input.release_all();
                    holds = HoldTimer::new(config.hold_timeout);
                    Action::None
                }
                _ => Action::None,
            };
            running = world.apply_action(action);
        }

        let now = Instant::now();
        if !releases_reported {
            release_lapsed(&mut holds, world, now);
        }

        let ticks = clock.due(now);
        for _ in 0..ticks {
            world.tick(canvas);
        }

        if let Some(path) = &config.export_path {
            save_exports(world, path, saved_exports);
        }
        saved_exports = world.exports().len();

        if ticks > 0 {
            terminal.draw(|f| map_area = render(f, world, canvas))?;
        }
    }

    Ok(())
}

/// Releases every button whose hold lapsed and is still down in the session.
fn release_lapsed(holds: &mut HoldTimer, world: &mut World, now: Instant) {
    for b in holds.expired(now) {
        if world.input.is_held(b) {
            world.apply_action(Action::Release(b));
        }
    }
}

/// Appends exports made since `from`; failures go to the log panel.
fn save_exports(world: &mut World, path: &Path, from: usize) {
    let failures: Vec<io::Error> = world.exports()[from..]
        .iter()
        .filter_map(|export| append_export(path, export).err())
        .collect();

    for e in failures {
        tracing::warn!(path = %path.display(), error = %e, "could not save export");
        world.push_log(format!("Export not saved: {e}"));
    }
}

fn append_export(path: &Path, export: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{export}")?;
    tracing::info!(path = %path.display(), "export appended");
    Ok(())
}
