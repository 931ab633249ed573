//! Error types for quest loading and assembly.
//!
//! Every variant here is a load-time failure. Evaluating requirements or
//! resolving steps against player state never produces an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::world::WorldPoint;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("quest '{quest}': zone '{zone}' is not defined")]
    UnknownZone { quest: String, zone: String },

    #[error("quest '{quest}': item '{item}' is not defined")]
    UnknownItem { quest: String, item: String },

    #[error("quest '{quest}': condition '{condition}' is not defined")]
    UnknownCondition { quest: String, condition: String },

    #[error("quest '{quest}': step '{step}' is not defined")]
    UnknownStep { quest: String, step: String },

    #[error("quest '{quest}': {kind} '{key}' is defined more than once")]
    DuplicateKey {
        quest: String,
        kind: &'static str,
        key: String,
    },

    #[error("quest '{quest}': stage {stage} is assigned more than once")]
    DuplicateStage { quest: String, stage: u32 },

    #[error("quest '{quest}': '{router}' is not a conditional step")]
    NotARouter { quest: String, router: String },

    #[error("quest '{quest}': step '{step}' is conditional and must be created as a router")]
    UnexpectedRouter { quest: String, step: String },

    #[error("quest '{quest}': branch from '{router}' to '{target}' would form a cycle")]
    CyclicRoute {
        quest: String,
        router: String,
        target: String,
    },

    #[error("quest '{quest}': '{entry}' is missing required field '{field}'")]
    MissingField {
        quest: String,
        entry: String,
        field: &'static str,
    },

    #[error("zone corners are on different planes: {a} and {b}")]
    ZonePlaneMismatch { a: WorldPoint, b: WorldPoint },

    #[error("item requirement '{name}' has quantity 0")]
    InvalidQuantity { name: String },

    #[error("quest '{0}' is not registered")]
    QuestNotFound(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type QuestResult<T> = Result<T, QuestError>;

impl QuestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuestError::Io {
            path: path.into(),
            source,
        }
    }
}
