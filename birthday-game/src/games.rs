use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One entry of `platform/games.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamesList(Vec<GameEntry>);

impl GamesList {
    /// Parse the landing page list.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GamesList`] when the JSON is not an array of entries.
    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn entries(&self) -> &[GameEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a GamesList {
    type Item = &'a GameEntry;
    type IntoIter = std::slice::Iter<'a, GameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
