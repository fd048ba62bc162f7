//! Game settings
//!
//! Selects the rule variant and a few host-loop knobs. Geometry is fixed in
//! [`crate::consts`]; only the rules change between variants.

use serde::{Deserialize, Serialize};

use crate::sim::Rules;

/// Named rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Score bar, miss penalty, game over once the board is cleared
    #[default]
    Classic,
    /// No score bar, no penalty, never ends
    Endless,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Endless => "endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "endless" | "infinite" => Some(Variant::Endless),
            _ => None,
        }
    }

    /// Rule flags for this preset
    pub fn rules(&self) -> Rules {
        match self {
            Variant::Classic => Rules::CLASSIC,
            Variant::Endless => Rules::ENDLESS,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the rules were derived from
    pub variant: Variant,
    /// Active rule flags (may be tweaked after applying a preset)
    pub rules: Rules,
    /// Let the paddle steer itself
    pub autopilot: bool,
    /// Tick budget for headless sessions
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Variant::default())
    }
}

impl Settings {
    /// Headless sessions stop here unless the game ends first
    pub const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

    /// Create settings from a preset (applies the preset's rules)
    pub fn from_preset(variant: Variant) -> Self {
        Self {
            variant,
            rules: variant.rules(),
            autopilot: false,
            max_ticks: Self::DEFAULT_MAX_TICKS,
        }
    }

    /// Switch preset, replacing the rule flags
    pub fn apply_preset(&mut self, variant: Variant) {
        self.variant = variant;
        self.rules = variant.rules();
    }

    /// Parse settings from JSON. Missing fields fall back to defaults; when
    /// only `variant` is given the rules follow that preset.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut settings: Settings = serde_json::from_value(value.clone())?;
        if value.get("rules").is_none() {
            settings.rules = settings.variant.rules();
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from a JSON file, with the path in any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Load settings from the page URL (`?variant=endless&autopilot`)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let mut settings = Self::default();
        if let Some(name) = params.get("variant") {
            match Variant::from_str(&name) {
                Some(variant) => settings.apply_preset(variant),
                None => log::warn!("Unknown variant '{}', using {}", name, settings.variant.as_str()),
            }
        }
        settings.autopilot = params.has("autopilot");
        log::info!("Loaded settings: variant={}", settings.variant.as_str());
        settings
    }

    /// Native: defaults (the binary reads an optional JSON file instead)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_variant_names() {
        for variant in [Variant::Classic, Variant::Endless] {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::from_str(" Endless "), Some(Variant::Endless));
        assert_eq!(Variant::from_str("arcade"), None);
    }

    #[test]
    fn test_presets() {
        let classic = Settings::from_preset(Variant::Classic);
        assert!(classic.rules.has_game_over);
        assert_eq!(classic.rules.miss_penalty, MISS_PENALTY);
        assert_eq!(classic.rules.top_offset, SCORE_BAR_HEIGHT);

        let mut settings = classic.clone();
        settings.apply_preset(Variant::Endless);
        assert_eq!(settings.rules, Rules::ENDLESS);
        assert_eq!(settings.variant, Variant::Endless);
    }

    #[test]
    fn test_from_json_variant_only() {
        let settings = Settings::from_json(r#"{ "variant": "endless" }"#).unwrap();
        assert_eq!(settings.variant, Variant::Endless);
        assert_eq!(settings.rules, Rules::ENDLESS);
        assert_eq!(settings.max_ticks, Settings::DEFAULT_MAX_TICKS);
        assert!(!settings.autopilot);
    }

    #[test]
    fn test_from_json_custom_rules() {
        let json = r#"{
            "variant": "classic",
            "rules": { "has_game_over": true, "miss_penalty": 0, "top_offset": 20.0 },
            "autopilot": true,
            "max_ticks": 100
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.rules.miss_penalty, 0);
        assert!(settings.rules.has_game_over);
        assert!(settings.autopilot);
        assert_eq!(settings.max_ticks, 100);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Settings::from_json("not json").is_err());
        assert!(Settings::from_json(r#"{ "variant": "arcade" }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::from_preset(Variant::Endless);
        settings.autopilot = true;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "variant": "endless", "max_ticks": 42 }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.rules, Rules::ENDLESS);
        assert_eq!(settings.max_ticks, 42);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_from_file_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let err = Settings::from_file(&missing).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to read settings file"), "{}", message);
        assert!(message.contains("missing.json"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, r#"{ "variant": "arcade" }"#).unwrap();
        let err = Settings::from_file(&broken).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Invalid settings in"), "{}", message);
        assert!(message.contains("broken.json"));
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }
}
