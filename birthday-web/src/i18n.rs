//! UI strings.
//!
//! The adventure ships in English only; strings still live in a JSON bundle
//! so screens never hard-code copy.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;

static BUNDLE: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../i18n/en.json")).unwrap_or_else(|err| {
        log::error!("ui strings could not be parsed: {err}");
        Value::Object(serde_json::Map::new())
    })
});

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            let ph1 = format!("{{{{{k}}}}}"); // {{var}}
            let ph2 = format!("{{{k}}}"); // {var}
            text = text.replace(&ph1, v);
            text = text.replace(&ph2, v);
        }
    }
    Some(text)
}

/// Look up a dotted key, e.g. `welcome.start`. Unknown keys render as themselves.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Look up a key and substitute `{name}` / `{{name}}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    get_nested_value(&BUNDLE, key)
        .and_then(|v| render_value(v, args))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_keys() {
        assert_eq!(t("welcome.start"), "LET'S GO!");
        assert_eq!(t("finale.again"), "PLAY AGAIN");
        assert_eq!(t("selection.team_up"), "AWESOME!");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        assert_eq!(t("welcome.nope"), "welcome.nope");
        assert_eq!(t("welcome"), "welcome");
    }

    #[test]
    fn substitutes_both_placeholder_styles() {
        let mut args = BTreeMap::new();
        args.insert("path", "characters/Or_thor.png");
        assert_eq!(
            tr("asset.alt", Some(&args)),
            "Game Asset: characters/Or_thor.png"
        );
        let value = Value::String("{{n}} and {n}".to_string());
        let mut args = BTreeMap::new();
        args.insert("n", "7");
        assert_eq!(render_value(&value, Some(&args)).as_deref(), Some("7 and 7"));
    }
}
