pub(crate) mod settings;
pub(crate) mod store;
pub(crate) mod templates;
