use std::str::FromStr;

use savanna_engine::{ActionBinds, InputCommand, SpriteBatch};

use crate::app::state::{AppState, Game};

/// What a bound key does in the playing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    DebugDraw,
    DebugAvoidance,
    AddOne,
    AddFive,
    AddTen,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Quit,
        Action::DebugDraw,
        Action::DebugAvoidance,
        Action::AddOne,
        Action::AddFive,
        Action::AddTen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::DebugDraw => "debug_draw",
            Action::DebugAvoidance => "debug_avoidance",
            Action::AddOne => "add_one",
            Action::AddFive => "add_five",
            Action::AddTen => "add_ten",
        }
    }

    /// Giraffes added by the spawn actions.
    pub fn spawn_count(self) -> Option<usize> {
        match self {
            Action::AddOne => Some(1),
            Action::AddFive => Some(5),
            Action::AddTen => Some(10),
            _ => None,
        }
    }

    /// Toggles and quitting fire once per press; spawning also fires on auto-repeat.
    pub fn fires_on(self, command: &InputCommand) -> bool {
        if self.spawn_count().is_some() {
            command.is_down()
        } else {
            command.is_pressed()
        }
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown action '{name}'"))
    }
}

/// `q/escape quit  1 add_one ...` for every action with at least one key.
pub fn key_help(binds: &ActionBinds) -> String {
    Action::ALL
        .into_iter()
        .filter_map(|action| {
            let keys: Vec<String> = binds.keys_for(action.name()).map(|key| key.to_string()).collect();
            (!keys.is_empty()).then(|| format!("{} {}", keys.join("/"), action.name()))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

impl<S: SpriteBatch> Game<S> {
    /// Routes one input command to the current state.
    pub fn on_input(&mut self, command: &InputCommand) -> anyhow::Result<()> {
        if self.state != AppState::Playing {
            return Ok(());
        }
        let Some(action) = self
            .binds
            .action_for(command)
            .and_then(|name| name.parse::<Action>().ok())
        else {
            return Ok(());
        };
        if !action.fires_on(command) {
            return Ok(());
        }

        match action {
            Action::Quit => self.transition(AppState::Quitting)?,
            Action::DebugDraw => {
                if let Some(playing) = self.playing.as_mut() {
                    playing.toggle_debug_draw();
                }
            }
            Action::DebugAvoidance => {
                if let Some(playing) = self.playing.as_mut() {
                    playing.toggle_debug_avoidance();
                }
            }
            Action::AddOne | Action::AddFive | Action::AddTen => {
                if let (Some(playing), Some(count)) = (self.playing.as_mut(), action.spawn_count()) {
                    playing.add_giraffes(count);
                }
            }
        }
        Ok(())
    }
}
