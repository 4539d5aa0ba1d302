use birthday_game::GameError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised by the browser side of the game.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("`window` is not available")]
    NoWindow,
    #[error("`document` is not available")]
    NoDocument,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("request for {url} failed with status {status}")]
    Http { url: String, status: u16 },
    #[error("narration track {0} could not be loaded")]
    Narration(u8),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(crate::dom::js_error_message(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_names_the_url() {
        let err = WebError::Http {
            url: "/platform/games.json".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "request for /platform/games.json failed with status 500"
        );
    }

    #[test]
    fn game_errors_pass_through() {
        let err = WebError::from(GameError::UnknownScreen("lobby".to_string()));
        assert_eq!(err.to_string(), "unknown screen slug: lobby");
    }
}
