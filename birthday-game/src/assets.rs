//! Media lookup with a fixed fallback chain.
//!
//! Asset files on disk are not named consistently: some are videos, some are
//! stills, some start with a capital letter and a few carry a known typo. For a
//! directory and base name the resolver tries, in order:
//!
//! 1. `{dir}/{base}.mp4`
//! 2. `{dir}/{base}.png`
//! 3. `{dir}/{Base}.mp4` and `{dir}/{Base}.png` (first letter upper-cased)
//! 4. when `base` mentions `flash`, the same two extensions with `falsh`
//!
//! The first candidate the probe reports as present wins; otherwise a
//! placeholder labelled with the base name is returned.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::future::Future;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::encounter::EncounterSpec;
use crate::state::{Attraction, Brother, Dessert, Hero, Mama, Papa, Partner, Restaurant, Team};

const TYPO_FROM: &str = "flash";
const TYPO_TO: &str = "falsh";

static IMAGE_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpeg|jpg|gif|png)$").expect("static image regex"));
static VIDEO_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg)$").expect("static video regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Video => "mp4",
            Self::Image => "png",
        }
    }
}

/// Classify a path by its extension, ignoring case.
#[must_use]
pub fn media_kind_for_path(path: &str) -> Option<MediaKind> {
    if IMAGE_EXT.is_match(path) {
        Some(MediaKind::Image)
    } else if VIDEO_EXT.is_match(path) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetCandidate {
    pub path: String,
    pub kind: MediaKind,
}

impl AssetCandidate {
    fn new(dir: &str, stem: &str, kind: MediaKind) -> Self {
        Self {
            path: format!("{dir}/{stem}.{}", kind.extension()),
            kind,
        }
    }
}

pub type CandidateList = SmallVec<[AssetCandidate; 6]>;

/// Strip a single trailing slash.
#[must_use]
pub fn normalize_dir(dir: &str) -> &str {
    dir.strip_suffix('/').unwrap_or(dir)
}

/// Upper-case the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Every path worth probing for `base` inside `dir`, in priority order.
#[must_use]
pub fn candidates(dir: &str, base: &str) -> CandidateList {
    let dir = normalize_dir(dir);
    let mut list = CandidateList::new();
    let mut push_pair = |stem: &str| {
        list.push(AssetCandidate::new(dir, stem, MediaKind::Video));
        list.push(AssetCandidate::new(dir, stem, MediaKind::Image));
    };

    push_pair(base);
    let capitalized = capitalize(base);
    if capitalized != base {
        push_pair(&capitalized);
    }
    if base.contains(TYPO_FROM) {
        push_pair(&base.replacen(TYPO_FROM, TYPO_TO, 1));
    }
    list
}

/// A directory + base name pair the game asks for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRequest {
    dir: Cow<'static, str>,
    base: Cow<'static, str>,
}

impl AssetRequest {
    #[must_use]
    pub const fn new(dir: &'static str, base: &'static str) -> Self {
        Self {
            dir: Cow::Borrowed(dir),
            base: Cow::Borrowed(base),
        }
    }

    #[must_use]
    pub const fn owned(dir: &'static str, base: String) -> Self {
        Self {
            dir: Cow::Borrowed(dir),
            base: Cow::Owned(base),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &str {
        &self.dir
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `dir/base`, without an extension.
    #[must_use]
    pub fn path_stem(&self) -> String {
        format!("{}/{}", normalize_dir(&self.dir), self.base)
    }

    #[must_use]
    pub fn candidates(&self) -> CandidateList {
        candidates(&self.dir, &self.base)
    }

    #[must_use]
    pub fn resolve<P: AssetProbe + ?Sized>(&self, probe: &P) -> Resolution {
        resolve_detailed(&self.dir, &self.base, probe)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedAsset {
    Video { path: String },
    Image { path: String },
    Placeholder { label: String },
}

impl ResolvedAsset {
    fn from_candidate(candidate: AssetCandidate) -> Self {
        match candidate.kind {
            MediaKind::Video => Self::Video {
                path: candidate.path,
            },
            MediaKind::Image => Self::Image {
                path: candidate.path,
            },
        }
    }

    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::Placeholder {
            label: label.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Video { path } | Self::Image { path } => Some(path),
            Self::Placeholder { .. } => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Option<MediaKind> {
        match self {
            Self::Video { .. } => Some(MediaKind::Video),
            Self::Image { .. } => Some(MediaKind::Image),
            Self::Placeholder { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Outcome of a resolution plus how many candidates were probed to get there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub asset: ResolvedAsset,
    pub probes: usize,
}

impl Resolution {
    /// True when the first candidate already matched.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.probes == 1 && !self.asset.is_placeholder()
    }
}

/// Answers "does this file exist?" for the resolver.
pub trait AssetProbe {
    fn exists(&self, candidate: &AssetCandidate) -> bool;
}

impl<F> AssetProbe for F
where
    F: Fn(&AssetCandidate) -> bool,
{
    fn exists(&self, candidate: &AssetCandidate) -> bool {
        self(candidate)
    }
}

/// A fixed set of paths known to exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownFiles(BTreeSet<String>);

impl KnownFiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
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

impl<S: Into<String>> FromIterator<S> for KnownFiles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl AssetProbe for KnownFiles {
    fn exists(&self, candidate: &AssetCandidate) -> bool {
        self.0.contains(&candidate.path)
    }
}

/// Resolve `base` in `dir` against a synchronous probe.
#[must_use]
pub fn resolve<P: AssetProbe + ?Sized>(dir: &str, base: &str, probe: &P) -> ResolvedAsset {
    resolve_detailed(dir, base, probe).asset
}

#[must_use]
pub fn resolve_detailed<P: AssetProbe + ?Sized>(dir: &str, base: &str, probe: &P) -> Resolution {
    let mut probes = 0;
    for candidate in candidates(dir, base) {
        probes += 1;
        if probe.exists(&candidate) {
            return Resolution {
                asset: ResolvedAsset::from_candidate(candidate),
                probes,
            };
        }
    }
    log::debug!("no media for {}/{base}, using placeholder", normalize_dir(dir));
    Resolution {
        asset: ResolvedAsset::placeholder(base),
        probes,
    }
}

/// Resolve against an asynchronous probe, one candidate at a time.
pub async fn resolve_with<F, Fut>(dir: &str, base: &str, mut probe: F) -> ResolvedAsset
where
    F: FnMut(AssetCandidate) -> Fut,
    Fut: Future<Output = bool>,
{
    for candidate in candidates(dir, base) {
        if probe(candidate.clone()).await {
            return ResolvedAsset::from_candidate(candidate);
        }
    }
    log::debug!("no media for {}/{base}, using placeholder", normalize_dir(dir));
    ResolvedAsset::placeholder(base)
}

/// Every asset request the game can issue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    requests: Vec<AssetRequest>,
}

impl AssetCatalog {
    #[must_use]
    pub fn full() -> Self {
        let mut requests: Vec<AssetRequest> = Vec::new();
        requests.extend(Hero::ALL.iter().map(|c| c.card_asset()));
        requests.extend(Brother::ALL.iter().map(|c| c.card_asset()));
        requests.extend(Mama::ALL.iter().map(|c| c.card_asset()));
        requests.extend(Papa::ALL.iter().map(|c| c.card_asset()));

        let partners = Brother::ALL
            .iter()
            .map(|b| Partner::Brother(*b))
            .chain(Mama::ALL.iter().map(|m| Partner::Mama(*m)))
            .chain(Papa::ALL.iter().map(|p| Partner::Papa(*p)));
        for partner in partners {
            requests.extend(Hero::ALL.iter().map(|hero| partner.team_up_asset(*hero)));
        }

        for &hero in Hero::ALL {
            for &brother in Brother::ALL {
                for &mama in Mama::ALL {
                    for &papa in Papa::ALL {
                        let team = Team {
                            hero,
                            brother,
                            mama,
                            papa,
                        };
                        requests.push(team.asset());
                    }
                }
            }
        }

        requests.extend(Restaurant::ALL.iter().map(|c| c.card_asset()));
        requests.extend(Attraction::ALL.iter().map(|c| c.card_asset()));
        requests.extend(Dessert::ALL.iter().map(|c| c.card_asset()));

        for spec in EncounterSpec::ALL {
            requests.push(spec.enemy_asset());
            requests.push(spec.defeated_asset());
        }

        requests.sort();
        requests.dedup();
        Self { requests }
    }

    #[must_use]
    pub fn requests(&self) -> &[AssetRequest] {
        &self.requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn paths(list: &CandidateList) -> Vec<&str> {
        list.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn candidate_order_covers_casing_and_typo() {
        let list = candidates("./characters/", "yuval_flash");
        assert_eq!(
            paths(&list),
            vec![
                "./characters/yuval_flash.mp4",
                "./characters/yuval_flash.png",
                "./characters/Yuval_flash.mp4",
                "./characters/Yuval_flash.png",
                "./characters/yuval_falsh.mp4",
                "./characters/yuval_falsh.png",
            ]
        );
        assert_eq!(list[0].kind, MediaKind::Video);
        assert_eq!(list[1].kind, MediaKind::Image);
    }

    #[test]
    fn capitalized_bases_do_not_repeat_candidates() {
        let list = candidates("enemies", "Dragon");
        assert_eq!(paths(&list), vec!["enemies/Dragon.mp4", "enemies/Dragon.png"]);
    }

    #[test]
    fn only_first_flash_is_rewritten() {
        let list = candidates("x", "flash_flash");
        assert!(paths(&list).contains(&"x/falsh_flash.mp4"));
    }

    #[test]
    fn resolver_returns_first_present_candidate() {
        let files: KnownFiles = ["characters/Yuval_flash.png", "characters/yuval_falsh.mp4"]
            .into_iter()
            .collect();
        let resolution = resolve_detailed("characters", "yuval_flash", &files);
        assert_eq!(
            resolution.asset,
            ResolvedAsset::Image {
                path: "characters/Yuval_flash.png".to_string()
            }
        );
        assert_eq!(resolution.probes, 4);
        assert!(!resolution.is_exact());
    }

    #[test]
    fn video_beats_image_for_the_same_stem() {
        let files: KnownFiles = ["restaurant/pizza.png", "restaurant/pizza.mp4"]
            .into_iter()
            .collect();
        let resolution = resolve_detailed("restaurant", "pizza", &files);
        assert_eq!(resolution.asset.kind(), Some(MediaKind::Video));
        assert!(resolution.is_exact());
    }

    #[test]
    fn missing_media_becomes_placeholder() {
        let asset = resolve("Dessert", "bakery", &|_: &AssetCandidate| false);
        assert_eq!(asset, ResolvedAsset::placeholder("bakery"));
        assert!(asset.is_placeholder());
        assert_eq!(asset.path(), None);
    }

    #[test]
    fn async_resolution_stops_probing_after_a_hit() {
        let seen = RefCell::new(Vec::new());
        let asset = block_on(resolve_with("enemies", "robot", |candidate| {
            seen.borrow_mut().push(candidate.path.clone());
            let hit = candidate.path.ends_with("Robot.mp4");
            async move { hit }
        }));
        assert_eq!(
            asset,
            ResolvedAsset::Video {
                path: "enemies/Robot.mp4".to_string()
            }
        );
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn media_kind_is_case_insensitive() {
        assert_eq!(media_kind_for_path("a/B.PNG"), Some(MediaKind::Image));
        assert_eq!(media_kind_for_path("a/b.jpeg"), Some(MediaKind::Image));
        assert_eq!(media_kind_for_path("a/b.WebM"), Some(MediaKind::Video));
        assert_eq!(media_kind_for_path("a/b.m4a"), None);
        assert_eq!(media_kind_for_path("a/png"), None);
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("or_superman"), "Or_superman");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn catalog_covers_every_team_combination() {
        let catalog = AssetCatalog::full();
        let team_assets = catalog
            .requests()
            .iter()
            .filter(|r| r.dir().ends_with("_all_team"))
            .count();
        assert_eq!(team_assets, 16);
        let team_ups = catalog
            .requests()
            .iter()
            .filter(|r| r.dir().starts_with("Yuval_"))
            .count();
        assert_eq!(team_ups, 12);
        assert!(
            catalog
                .requests()
                .contains(&AssetRequest::new("enemies", "dessert_enemy_defeated"))
        );
        // 8 cards + 12 team-ups + 16 teams + 12 options + 6 enemies
        assert_eq!(catalog.len(), 54);
    }
}
