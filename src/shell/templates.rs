use crate::{
    foundation::error::{CardError, CardResult},
    shell::{
        settings::Settings,
        store::{SettingsStore, load_json, save_json},
    },
};

/// Store key holding the user's templates.
pub const TEMPLATES_KEY: &str = "promptcards.templates";

/// A named, reusable bundle of prompts and style settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    /// Unique display name.
    pub name: String,
    /// Prompts rendered one card each.
    pub prompts: Vec<String>,
    /// Style snapshot. Its `prompt_text` is ignored in favor of `prompts`.
    pub settings: Settings,
}

impl Template {
    /// Template with the given prompts and default style.
    pub fn new(name: impl Into<String>, prompts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            prompts: prompts.into_iter().map(Into::into).collect(),
            settings: Settings::default(),
        }
    }

    /// Replace the style snapshot.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Settings {
            prompt_text: String::new(),
            ..settings
        };
        self
    }
}

/// Starter templates offered before the user saves any.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            "Start, Stop, Continue",
            [
                "What should we start doing?",
                "What should we stop doing?",
                "What should we continue doing?",
            ],
        ),
        Template::new(
            "Mad, Sad, Glad",
            [
                "What made you mad this sprint?",
                "What made you sad this sprint?",
                "What made you glad this sprint?",
            ],
        ),
        Template::new(
            "Sailboat",
            [
                "What wind pushed us forward?",
                "Which anchor held us back?",
                "What rocks do you see ahead?",
                "Where is our island?",
            ],
        ),
    ]
}

/// User template collection persisted in a [`SettingsStore`].
///
/// Templates keep their creation order; names are unique after trimming.
#[derive(Debug)]
pub struct TemplateLibrary<S> {
    store: S,
}

impl<S: SettingsStore> TemplateLibrary<S> {
    /// Library over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Saved templates in creation order.
    pub fn list(&self) -> CardResult<Vec<Template>> {
        Ok(load_json(&self.store, TEMPLATES_KEY)?.unwrap_or_default())
    }

    /// Saved template named `name`, falling back to the built-in ones.
    pub fn get(&self, name: &str) -> CardResult<Option<Template>> {
        let name = name.trim();
        let found = self.list()?.into_iter().find(|t| t.name == name);
        Ok(found.or_else(|| builtin_templates().into_iter().find(|t| t.name == name)))
    }

    /// Save a new template. Empty names, prompt-less templates and duplicates are rejected.
    pub fn create(&mut self, mut template: Template) -> CardResult<()> {
        template.name = template.name.trim().to_string();
        if template.name.is_empty() {
            return Err(CardError::invalid_spec("template name must not be empty"));
        }
        template.prompts.retain(|p| !p.trim().is_empty());
        if template.prompts.is_empty() {
            return Err(CardError::invalid_spec(format!(
                "template \"{}\" has no prompts",
                template.name
            )));
        }

        let mut templates = self.list()?;
        if templates.iter().any(|t| t.name == template.name) {
            return Err(CardError::invalid_spec(format!(
                "template \"{}\" already exists",
                template.name
            )));
        }
        tracing::info!(name = %template.name, prompts = template.prompts.len(), "saving template");
        templates.push(template);
        save_json(&mut self.store, TEMPLATES_KEY, &templates)
    }

    /// Delete the saved template named `name`. Returns whether one was removed.
    pub fn delete(&mut self, name: &str) -> CardResult<bool> {
        let name = name.trim();
        let mut templates = self.list()?;
        let before = templates.len();
        templates.retain(|t| t.name != name);
        if templates.len() == before {
            return Ok(false);
        }
        save_json(&mut self.store, TEMPLATES_KEY, &templates)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/templates.rs"]
mod tests;
