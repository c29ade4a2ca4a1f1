use crate::{
    card::{
        prompt::parse_prompts,
        spec::{CardSpec, DEFAULT_CAPTION, IconSelector},
    },
    foundation::error::{CardError, CardResult},
    shell::store::{SettingsStore, load_json, save_json},
    style::preset::{CardOptions, CardStyle},
};

/// Store key holding the persisted [`Settings`].
pub const SETTINGS_KEY: &str = "promptcards.settings";

/// Largest response area the form offers, in percent of card height.
pub const MAX_RESPONSE_PERCENT: u8 = 50;

/// Persisted form state: prompt text plus the style choices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prompts, one per line.
    pub prompt_text: String,
    /// Color scheme.
    pub style: CardStyle,
    /// Caption next to the badge.
    pub caption_text: String,
    /// Badge glyph.
    pub icon: IconSelector,
    /// Response area height in percent of the card, `0..=50`.
    pub response_percent: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt_text: String::new(),
            style: CardStyle::Black,
            caption_text: DEFAULT_CAPTION.to_string(),
            icon: IconSelector::Warning,
            response_percent: 30,
        }
    }
}

impl Settings {
    /// Non-blank prompt lines.
    pub fn prompts(&self) -> Vec<String> {
        parse_prompts(&self.prompt_text)
    }

    /// Shared card options implied by these settings.
    pub fn card_options(&self) -> CardResult<CardOptions> {
        if self.response_percent > MAX_RESPONSE_PERCENT {
            return Err(CardError::invalid_spec(format!(
                "response_percent {} is above {MAX_RESPONSE_PERCENT}",
                self.response_percent
            )));
        }
        Ok(CardOptions {
            caption_text: self.caption_text.clone(),
            icon: self.icon.clone(),
            response_area_fraction: f64::from(self.response_percent) / 100.0,
            ..CardOptions::default()
        })
    }

    /// Resolve to the [`CardSpec`] every card of this session is rendered with.
    pub fn card_spec(&self) -> CardResult<CardSpec> {
        self.style.resolve(&self.card_options()?)
    }
}

/// Settings from `store`, or defaults when nothing was saved yet.
pub fn load_settings(store: &(impl SettingsStore + ?Sized)) -> CardResult<Settings> {
    Ok(load_json(store, SETTINGS_KEY)?.unwrap_or_default())
}

/// Persist `settings` into `store`.
pub fn save_settings(store: &mut (impl SettingsStore + ?Sized), settings: &Settings) -> CardResult<()> {
    save_json(store, SETTINGS_KEY, settings)
}

#[cfg(test)]
#[path = "../../tests/unit/shell/settings.rs"]
mod tests;
