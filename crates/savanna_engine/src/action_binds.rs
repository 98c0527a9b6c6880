use std::collections::BTreeMap;

use crate::error::Result;
use crate::input::{InputCommand, Key};

/// Key to action-name table.
///
/// The engine does not know what the actions mean; the game parses the names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBinds {
    binds: BTreeMap<Key, String>,
}

impl ActionBinds {
    /// Builds the table from `key name -> action name` pairs, as found in config.
    pub fn from_names<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut binds = Self::default();
        for (key, action) in pairs {
            binds.bind(key.parse()?, action);
        }
        Ok(binds)
    }

    /// Binds `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: Key, action: &str) {
        self.binds.insert(key, action.to_string());
    }

    #[must_use]
    pub fn action(&self, key: Key) -> Option<&str> {
        self.binds.get(&key).map(String::as_str)
    }

    /// The action bound to the command's key, whatever its trigger.
    #[must_use]
    pub fn action_for(&self, command: &InputCommand) -> Option<&str> {
        self.action(command.key)
    }

    /// Every key bound to `action`, in key order.
    pub fn keys_for<'a>(&'a self, action: &'a str) -> impl Iterator<Item = Key> + 'a {
        self.binds
            .iter()
            .filter(move |(_, bound)| bound.as_str() == action)
            .map(|(key, _)| *key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }
}
