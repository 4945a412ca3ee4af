pub type FlowloopResult<T> = Result<T, FlowloopError>;

#[derive(thiserror::Error, Debug)]
pub enum FlowloopError {
    /// The user asked for something the current scene cannot satisfy (e.g. animating a path
    /// with fewer than two nodes). Nothing was mutated.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// An external resource (image decoder, GIF encoder, file) was unavailable or failed.
    #[error("resource unavailable: {0}")]
    Resource(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlowloopError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors the user caused and can fix from the UI.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Precondition(_) | Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
