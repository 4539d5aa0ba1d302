//! Player picks and the derived asset lookups that depend on them.

use serde::{Deserialize, Serialize};

use crate::assets::AssetRequest;
use crate::error::GameError;
use crate::screens::ScreenFlow;

/// Directory holding the four family selection cards.
pub const CHARACTERS_DIR: &str = "characters";

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, kind = $kind:literal, dir = $dir:literal {
            $($variant:ident => ($id:literal, $asset:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const KIND: &'static str = $kind;
            pub const DIR: &'static str = $dir;

            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }

            /// Base file name of the selection card media.
            #[must_use]
            pub const fn asset_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $asset),+
                }
            }

            #[must_use]
            pub const fn card_asset(self) -> AssetRequest {
                AssetRequest::new(Self::DIR, self.asset_name())
            }

            /// Parse a choice from its id.
            ///
            /// # Errors
            ///
            /// Returns [`GameError::UnknownChoice`] for ids outside [`Self::ALL`].
            pub fn from_id(id: &str) -> Result<Self, GameError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.id() == id)
                    .ok_or_else(|| GameError::UnknownChoice {
                        kind: Self::KIND,
                        id: id.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

choice_enum!(
    /// Yuval's own superhero.
    Hero, kind = "hero", dir = "characters" {
        Flash => ("flash", "yuval_flash"),
        Batman => ("batman", "yuval_batman"),
    }
);

choice_enum!(
    /// Or, the brother.
    Brother, kind = "brother", dir = "characters" {
        Superman => ("superman", "Or_superman"),
        Thor => ("thor", "Or_thor"),
    }
);

choice_enum!(
    Mama, kind = "mama", dir = "characters" {
        Wonder => ("wonder", "mama_wonder"),
        Bishop => ("bishop", "mama_bishop"),
    }
);

choice_enum!(
    Papa, kind = "papa", dir = "characters" {
        Hulk => ("hulk", "papa_hulk"),
        Capitan => ("capitan", "papa_capitan"),
    }
);

choice_enum!(
    Restaurant, kind = "restaurant", dir = "restaurant" {
        Pizza => ("pizza", "pizza"),
        Hamburger => ("hamburger", "hamburger"),
        Steak => ("steak", "steak"),
        Wok => ("wok", "wok"),
    }
);

choice_enum!(
    Attraction, kind = "attraction", dir = "Attraction" {
        Theater => ("theater", "theater"),
        VideoGames => ("video_games", "video_games"),
        ObstacleGame => ("obstacle_game", "obstacle_game"),
        Safari => ("safari", "safari"),
    }
);

choice_enum!(
    Dessert, kind = "dessert", dir = "Dessert" {
        IceCream => ("ice_cream", "ice_cream"),
        Candies => ("candies", "candies"),
        Bakery => ("bakery", "bakery"),
        Strawberries => ("strawberries", "strawberries"),
    }
);

/// A family member picked after the hero, who gets a team-up preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partner {
    Brother(Brother),
    Mama(Mama),
    Papa(Papa),
}

impl Partner {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Brother(b) => b.id(),
            Self::Mama(m) => m.id(),
            Self::Papa(p) => p.id(),
        }
    }

    /// Directory of the hero + partner preview clips.
    #[must_use]
    pub const fn team_up_dir(self) -> &'static str {
        match self {
            Self::Brother(_) => "Yuval_Or",
            Self::Mama(_) => "Yuval_mama",
            Self::Papa(_) => "Yuval_papa",
        }
    }

    #[must_use]
    pub fn team_up_asset(self, hero: Hero) -> AssetRequest {
        AssetRequest::owned(
            self.team_up_dir(),
            format!("{}_{}", hero.id(), self.id()),
        )
    }
}

/// The full four-member team, available once every family pick is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Team {
    pub hero: Hero,
    pub brother: Brother,
    pub mama: Mama,
    pub papa: Papa,
}

impl Team {
    #[must_use]
    pub const fn dir(&self) -> &'static str {
        match self.hero {
            Hero::Flash => "flash_all_team",
            Hero::Batman => "batman_all_team",
        }
    }

    #[must_use]
    pub fn asset(&self) -> AssetRequest {
        AssetRequest::owned(
            self.dir(),
            format!(
                "{}_{}_{}_{}",
                self.hero.id(),
                self.brother.id(),
                self.mama.id(),
                self.papa.id()
            ),
        )
    }
}

/// The flat record of everything the player picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    pub hero: Option<Hero>,
    pub brother: Option<Brother>,
    pub mama: Option<Mama>,
    pub papa: Option<Papa>,
    pub restaurant: Option<Restaurant>,
    pub attraction: Option<Attraction>,
    pub dessert: Option<Dessert>,
}

impl Choices {
    /// Assemble the team.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IncompleteTeam`] naming the first missing member.
    pub fn team(&self) -> Result<Team, GameError> {
        Ok(Team {
            hero: self.hero.ok_or(GameError::IncompleteTeam { missing: "hero" })?,
            brother: self
                .brother
                .ok_or(GameError::IncompleteTeam { missing: "brother" })?,
            mama: self.mama.ok_or(GameError::IncompleteTeam { missing: "mama" })?,
            papa: self.papa.ok_or(GameError::IncompleteTeam { missing: "papa" })?,
        })
    }

    /// Record a partner pick and return the team-up preview to show.
    /// `None` when the hero has not been picked yet.
    pub fn pick_partner(&mut self, partner: Partner) -> Option<AssetRequest> {
        match partner {
            Partner::Brother(b) => self.brother = Some(b),
            Partner::Mama(m) => self.mama = Some(m),
            Partner::Papa(p) => self.papa = Some(p),
        }
        self.hero.map(|hero| partner.team_up_asset(hero))
    }

    /// Experience picks shown in the finale recap, with fallbacks for unset ones.
    #[must_use]
    pub fn recap(&self) -> (Restaurant, Attraction, Dessert) {
        (
            self.restaurant.unwrap_or(Restaurant::Pizza),
            self.attraction.unwrap_or(Attraction::VideoGames),
            self.dessert.unwrap_or(Dessert::IceCream),
        )
    }
}

/// Choices plus screen position. Lives only as long as the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub choices: Choices,
    pub flow: ScreenFlow,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the welcome screen with nothing picked.
    pub fn restart(&mut self) {
        self.choices = Choices::default();
        self.flow.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_team() -> Choices {
        Choices {
            hero: Some(Hero::Flash),
            brother: Some(Brother::Thor),
            mama: Some(Mama::Bishop),
            papa: Some(Papa::Hulk),
            ..Choices::default()
        }
    }

    #[test]
    fn ids_parse_back_to_variants() {
        assert_eq!(Hero::from_id("batman").unwrap(), Hero::Batman);
        assert_eq!(
            Attraction::from_id("obstacle_game").unwrap(),
            Attraction::ObstacleGame
        );
        let err = Dessert::from_id("broccoli").unwrap_err();
        assert!(matches!(
            err,
            GameError::UnknownChoice { kind: "dessert", .. }
        ));
    }

    #[test]
    fn card_assets_use_the_recorded_file_names() {
        assert_eq!(Brother::Superman.card_asset().base(), "Or_superman");
        assert_eq!(Brother::Superman.card_asset().dir(), CHARACTERS_DIR);
        assert_eq!(Dessert::IceCream.card_asset().dir(), "Dessert");
        assert_eq!(Restaurant::Wok.card_asset().base(), "wok");
    }

    #[test]
    fn team_up_preview_combines_hero_and_partner() {
        let mut choices = Choices::default();
        assert_eq!(choices.pick_partner(Partner::Mama(Mama::Wonder)), None);

        choices.hero = Some(Hero::Batman);
        let preview = choices.pick_partner(Partner::Papa(Papa::Capitan)).unwrap();
        assert_eq!(preview.dir(), "Yuval_papa");
        assert_eq!(preview.base(), "batman_capitan");
        assert_eq!(choices.papa, Some(Papa::Capitan));

        let preview = choices
            .pick_partner(Partner::Brother(Brother::Superman))
            .unwrap();
        assert_eq!(preview.path_stem(), "Yuval_Or/batman_superman");
    }

    #[test]
    fn team_asset_depends_on_hero_directory() {
        let team = full_team().team().unwrap();
        let asset = team.asset();
        assert_eq!(asset.dir(), "flash_all_team");
        assert_eq!(asset.base(), "flash_thor_bishop_hulk");

        let mut choices = full_team();
        choices.hero = Some(Hero::Batman);
        assert_eq!(choices.team().unwrap().dir(), "batman_all_team");
    }

    #[test]
    fn incomplete_team_names_the_gap() {
        let mut choices = full_team();
        choices.mama = None;
        assert!(matches!(
            choices.team(),
            Err(GameError::IncompleteTeam { missing: "mama" })
        ));
    }

    #[test]
    fn recap_falls_back_to_defaults() {
        let mut choices = Choices::default();
        assert_eq!(
            choices.recap(),
            (Restaurant::Pizza, Attraction::VideoGames, Dessert::IceCream)
        );
        choices.dessert = Some(Dessert::Bakery);
        assert_eq!(choices.recap().2, Dessert::Bakery);
    }

    #[test]
    fn restart_clears_everything() {
        let mut state = GameState::new();
        state.choices = full_team();
        state.flow.advance();
        state.flow.begin_transition();
        state.restart();
        assert_eq!(state, GameState::default());
    }
}
