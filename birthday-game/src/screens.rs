//! The fixed, linear list of screens and the cursor that walks it.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Welcome,
    HeroSelection,
    BrotherSelection,
    MamaSelection,
    PapaSelection,
    TeamReveal,
    Attraction,
    Restaurant,
    Dessert,
    FinalCelebration,
}

impl Screen {
    /// Every screen in play order.
    pub const ALL: [Self; 10] = [
        Self::Welcome,
        Self::HeroSelection,
        Self::BrotherSelection,
        Self::MamaSelection,
        Self::PapaSelection,
        Self::TeamReveal,
        Self::Attraction,
        Self::Restaurant,
        Self::Dessert,
        Self::FinalCelebration,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::HeroSelection => "yuval-selection",
            Self::BrotherSelection => "or-selection",
            Self::MamaSelection => "mama-selection",
            Self::PapaSelection => "papa-selection",
            Self::TeamReveal => "team-reveal",
            Self::Attraction => "attraction",
            Self::Restaurant => "restaurant",
            Self::Dessert => "dessert",
            Self::FinalCelebration => "final-celebration",
        }
    }

    /// Look a screen up by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownScreen`] when no screen carries `slug`.
    pub fn from_slug(slug: &str) -> Result<Self, GameError> {
        Self::ALL
            .into_iter()
            .find(|screen| screen.slug() == slug)
            .ok_or_else(|| GameError::UnknownScreen(slug.to_string()))
    }

    /// Voice-over track played when the screen becomes active.
    #[must_use]
    pub const fn narration_track(self) -> Option<u8> {
        Some(match self {
            Self::Welcome => 1,
            Self::HeroSelection => 2,
            Self::BrotherSelection => 3,
            Self::MamaSelection => 4,
            Self::PapaSelection => 5,
            Self::TeamReveal => 6,
            Self::Attraction => 7,
            Self::Restaurant => 9,
            Self::Dessert => 11,
            Self::FinalCelebration => 13,
        })
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|screen| *screen == self)
            .unwrap_or_default()
    }
}

/// Cursor over [`Screen::ALL`] plus the "transition in flight" latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenFlow {
    index: usize,
    transitioning: bool,
}

impl ScreenFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: 0,
            transitioning: false,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        Screen::ALL[self.index]
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.index + 1 == Screen::ALL.len()
    }

    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Latch the transition flag. Returns `false` when one is already running.
    pub const fn begin_transition(&mut self) -> bool {
        if self.transitioning {
            return false;
        }
        self.transitioning = true;
        true
    }

    pub const fn finish_transition(&mut self) {
        self.transitioning = false;
    }

    /// Step to the next screen. Stays put on the last one.
    pub fn advance(&mut self) -> Option<Screen> {
        if self.is_last() {
            log::debug!("advance ignored on {}", self.current().slug());
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub const fn restart(&mut self) {
        self.index = 0;
        self.transitioning = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_and_reject_unknown() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_slug(screen.slug()).unwrap(), screen);
        }
        assert!(matches!(
            Screen::from_slug("credits"),
            Err(GameError::UnknownScreen(slug)) if slug == "credits"
        ));
    }

    #[test]
    fn narration_tracks_skip_the_option_prompts() {
        let tracks: Vec<u8> = Screen::ALL
            .iter()
            .filter_map(|s| s.narration_track())
            .collect();
        assert_eq!(tracks, vec![1, 2, 3, 4, 5, 6, 7, 9, 11, 13]);
    }

    #[test]
    fn advance_stops_at_the_finale() {
        let mut flow = ScreenFlow::new();
        let mut visited = vec![flow.current()];
        while let Some(next) = flow.advance() {
            visited.push(next);
        }
        assert_eq!(visited, Screen::ALL.to_vec());
        assert!(flow.is_last());
        assert_eq!(flow.advance(), None);
        assert_eq!(flow.index(), Screen::ALL.len() - 1);
    }

    #[test]
    fn transition_latch_blocks_reentry() {
        let mut flow = ScreenFlow::new();
        assert!(flow.begin_transition());
        assert!(!flow.begin_transition());
        flow.finish_transition();
        assert!(flow.begin_transition());
        flow.restart();
        assert!(!flow.is_transitioning());
        assert_eq!(flow.current(), Screen::Welcome);
    }

    #[test]
    fn index_matches_position() {
        for (idx, screen) in Screen::ALL.iter().enumerate() {
            assert_eq!(screen.index(), idx);
        }
    }
}
