/// Convenience result type used across promptcards.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by compositor and shell APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// The text backend cannot measure text (no usable font was found or loaded).
    #[error("text measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    /// The final image could not be encoded or written.
    #[error("export error: {0}")]
    Export(String),

    /// A structurally invalid [`crate::CardSpec`], rejected before any drawing.
    #[error("invalid card spec: {0}")]
    InvalidSpec(String),

    /// Errors when serializing or deserializing settings, templates or specs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::MeasurementUnavailable`] value.
    pub fn measurement_unavailable(msg: impl Into<String>) -> Self {
        Self::MeasurementUnavailable(msg.into())
    }

    /// Build a [`CardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CardError::InvalidSpec`] value.
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error only affects the card it was raised for.
    ///
    /// Batch callers may skip such cards and keep going.
    pub fn is_per_card(&self) -> bool {
        matches!(self, Self::Export(_))
    }
}

impl From<serde_json::Error> for CardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
