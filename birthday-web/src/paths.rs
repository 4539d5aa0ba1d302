//! URLs for static files that respect the deployment base path.
//!
//! When `PUBLIC_URL` is set at compile time (e.g. `/party` for GitHub Pages),
//! generated URLs are prefixed accordingly. Local builds without `PUBLIC_URL`
//! fall back to root-anchored paths.

/// Folder holding the adventure's media and narration, relative to the site root.
pub const GAME_ROOT: &str = "games/yuval-birthday";

/// Landing page list of playable games.
pub const GAMES_LIST: &str = "platform/games.json";

#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of a file inside [`GAME_ROOT`], e.g. `characters/yuval_flash.mp4`.
#[must_use]
pub fn game_asset(relative: &str) -> String {
    let rel = relative.trim_start_matches("./").trim_start_matches('/');
    asset_path(&format!("{GAME_ROOT}/{rel}"))
}

/// Base path for the router.
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_prefixed_path_when_base_missing() {
        assert_eq!(asset_path(GAMES_LIST), "/platform/games.json");
        assert_eq!(asset_path("/platform/games.json"), "/platform/games.json");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            asset_path_with_base("games/yuval-birthday/audio/1.m4a", "/party"),
            "/party/games/yuval-birthday/audio/1.m4a"
        );
        assert_eq!(
            asset_path_with_base("/platform/games.json", "/party/"),
            "/party/platform/games.json"
        );
    }

    #[test]
    fn game_assets_live_under_the_game_folder() {
        assert_eq!(
            game_asset("characters/yuval_flash.mp4"),
            "/games/yuval-birthday/characters/yuval_flash.mp4"
        );
        assert_eq!(
            game_asset("./enemies/Dragon.png"),
            "/games/yuval-birthday/enemies/Dragon.png"
        );
    }

    #[test]
    fn router_base_is_none_by_default() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/party/"), Some(String::from("/party")));
    }
}
