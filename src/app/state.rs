//! Application state machine.
//!
//! `None → Initializing → Playing → Quitting → Terminate`. Each transition
//! runs the leave hook of the old state and the enter hook of the new one.

use anyhow::{Context, Result};
use savanna_core::config::AppConfig;
use savanna_core::world::clock_seed;
use savanna_core::{World, WorldSnapshot};
use savanna_engine::{ActionBinds, Atlas, SpriteBatch};

use crate::app::input::{key_help, Action};
use crate::app::playing::Playing;
use crate::app::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    None,
    Initializing,
    Playing,
    Quitting,
    /// Final. Nothing leaves it.
    Terminate,
}

pub struct Game<S: SpriteBatch> {
    pub config: AppConfig,
    pub binds: ActionBinds,
    pub sprites: S,
    pub(crate) state: AppState,
    pub playing: Option<Playing>,
    /// Field as it stood when the game started quitting.
    final_snapshot: Option<WorldSnapshot>,
}

impl<S: SpriteBatch> Game<S> {
    /// Builds the game around an engine. Every bound action must name an [`Action`].
    pub fn new(config: AppConfig, sprites: S) -> Result<Self> {
        config.validate()?;
        let binds = ActionBinds::from_names(&config.binds)?;
        for action in config.binds.values() {
            action.parse::<Action>()?;
        }
        Ok(Self {
            config,
            binds,
            sprites,
            state: AppState::None,
            playing: None,
            final_snapshot: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == AppState::Terminate
    }

    #[must_use]
    pub fn world(&self) -> Option<&World> {
        self.playing.as_ref().map(|playing| &playing.world)
    }

    pub fn transition(&mut self, next: AppState) -> Result<()> {
        if next == self.state || self.state == AppState::Terminate {
            return Ok(());
        }
        let previous = self.state;
        self.leave(previous);
        self.state = next;
        tracing::info!(from = ?previous, to = ?next, "App state transition");
        self.enter(next)
    }

    fn leave(&mut self, state: AppState) {
        if state == AppState::Playing {
            if let Some(world) = self.world() {
                tracing::info!(
                    tick = world.tick,
                    giraffes = world.giraffe_count(),
                    killed = world.stats.giraffes_killed,
                    "Leaving the field"
                );
            }
        }
    }

    fn enter(&mut self, state: AppState) -> Result<()> {
        match state {
            AppState::Initializing => {
                let atlas = match &self.config.game.atlas {
                    Some(path) => Atlas::load(path).with_context(|| format!("Failed to load atlas {path}"))?,
                    None => Atlas::default(),
                };
                self.sprites.load_atlas(atlas);
                let world = World::new(self.config.clone())?;
                self.playing = Some(Playing::new(world, &self.config.game, key_help(&self.binds)));
                self.transition(AppState::Playing)
            }
            AppState::Playing => {
                if self.config.world.seed.is_none() {
                    if let Some(playing) = self.playing.as_mut() {
                        playing.world.reseed(clock_seed());
                    }
                }
                Ok(())
            }
            AppState::Quitting => {
                self.final_snapshot = self.world().map(World::snapshot);
                Ok(())
            }
            AppState::None | AppState::Terminate => Ok(()),
        }
    }

    /// One frame of game logic. `t` is the absolute time, `dt` the frame step.
    pub fn update(&mut self, t: f64, dt: f32) -> Result<()> {
        match self.state {
            AppState::None => self.transition(AppState::Initializing),
            AppState::Playing => {
                if let Some(playing) = self.playing.as_mut() {
                    playing.world.update(dt);
                    render::present(playing, &mut self.sprites, t, dt)?;
                }
                Ok(())
            }
            AppState::Quitting => self.transition(AppState::Terminate),
            AppState::Initializing | AppState::Terminate => Ok(()),
        }
    }

    pub fn render(&mut self) -> Result<()> {
        if self.playing.is_some() && !self.is_terminated() {
            self.sprites.render_sprites()?;
        }
        Ok(())
    }

    /// Ends the game through `Quitting` and hands back the field as it stood
    /// when quitting began, if there was one.
    pub fn on_shutdown(&mut self) -> Result<Option<WorldSnapshot>> {
        self.transition(AppState::Quitting)?;
        self.transition(AppState::Terminate)?;
        Ok(self.final_snapshot.take())
    }
}
