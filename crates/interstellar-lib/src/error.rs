use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationCode;

/// Convenient result alias for the interstellar library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default dataset")]
    ProjectDirsUnavailable,

    /// Raised when a SQLite dataset lacks the vertex or edge tables.
    #[error("unsupported dataset schema; expected vertex and edge tables")]
    UnsupportedSchema,

    /// Raised when a planet id or name could not be found in the snapshot.
    #[error("unknown planet: {name}{}", format_suggestions(.suggestions))]
    UnknownPlanet {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route connects the two planets.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a candidate record is rejected by validation.
    #[error("{code}: {message}")]
    Validation {
        code: ValidationCode,
        message: String,
    },

    /// Raised when a planet id is registered twice.
    #[error("planet {id} already exists as {name}")]
    VertexExists { id: String, name: String },

    /// A neighbour was discovered without a matching edge on weight lookup.
    ///
    /// This can only happen if the materialized edge set and the engine's
    /// lookup tables disagree, which is a programming error.
    #[error("internal error: no edge from {from} to {to} after it was discovered as a neighbour")]
    MissingEdge { from: String, to: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON snapshot errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
