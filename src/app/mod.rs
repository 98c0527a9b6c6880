pub mod input;
pub mod playing;
pub mod render;
pub mod shutdown;
pub mod state;

pub use input::Action;
pub use playing::Playing;
pub use shutdown::ShutdownManager;
pub use state::{AppState, Game};

use anyhow::Result;
use crossterm::event::{self, Event};
use glam::Vec2;
use std::time::{Duration, Instant};

use savanna_core::config::AppConfig;
use savanna_engine::{Atlas, HeadlessSprites, SpriteBatch};
use savanna_tui::{input_command, is_interrupt, TerminalSprites, Tui};

/// Plays the game in the terminal until quit, Ctrl+C or an error.
pub async fn run_tui(config: AppConfig, shutdown: &ShutdownManager) -> Result<()> {
    let bounds = Vec2::new(config.world.width, config.world.height);
    let frame_time = Duration::from_secs_f64(1.0 / config.game.target_fps as f64);

    let mut tui = Tui::new();
    tui.init()?;
    if !tui.keyboard_enhanced() {
        tracing::info!("Terminal does not report key repeats; held keys repeat as presses");
    }
    let sprites = TerminalSprites::new(Tui::terminal()?, Atlas::default(), bounds);
    let mut game = Game::new(config, sprites)?;

    let res = frame_loop(&mut game, shutdown, frame_time);
    let snapshot = game.on_shutdown()?;
    tui.exit()?;

    shutdown.cleanup(snapshot.as_ref())?;
    res
}

fn frame_loop<S: SpriteBatch>(
    game: &mut Game<S>,
    shutdown: &ShutdownManager,
    frame_time: Duration,
) -> Result<()> {
    let start = Instant::now();
    let mut last_frame = Instant::now();

    while !game.is_terminated() && !shutdown.is_shutdown_requested() {
        let deadline = last_frame + frame_time;
        // Drain input until the frame is due.
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if is_interrupt(&key) {
                    shutdown.request_shutdown();
                    break;
                }
                if let Some(command) = input_command(&key) {
                    game.on_input(&command)?;
                }
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        game.update(start.elapsed().as_secs_f64(), dt)?;
        game.render()?;
    }
    Ok(())
}

/// Runs `frames` fixed steps of `1 / target_fps` without a terminal.
pub async fn run_headless(config: AppConfig, frames: u64, shutdown: &ShutdownManager) -> Result<()> {
    let dt = 1.0 / config.game.target_fps as f32;
    let log_interval = config.game.log_interval.max(1);
    let mut game = Game::new(config, HeadlessSprites::default())?;

    let mut frame = 0;
    while frame < frames && !game.is_terminated() && !shutdown.is_shutdown_requested() {
        game.update(f64::from(dt) * frame as f64, dt)?;
        game.render()?;
        frame += 1;

        if frame % log_interval == 0 {
            if let Some(world) = game.world() {
                tracing::info!(
                    frame,
                    giraffes = world.live_giraffe_count(),
                    carcasses = world.giraffe_count() - world.live_giraffe_count(),
                    killed = world.stats.giraffes_killed,
                    eaten = world.stats.food_eaten,
                    "Headless progress"
                );
            }
        }
    }

    let snapshot = game.on_shutdown()?;
    if let Some(snapshot) = &snapshot {
        tracing::info!(
            frames = frame,
            tick = snapshot.tick,
            live = snapshot.live_giraffes(),
            killed = snapshot.stats.giraffes_killed,
            exhaustions = snapshot.stats.lion_exhaustions,
            "Headless simulation finished"
        );
    }
    shutdown.cleanup(snapshot.as_ref())
}
