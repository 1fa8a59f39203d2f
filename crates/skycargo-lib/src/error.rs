use thiserror::Error;

/// Convenient result alias for the Sky Cargo library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Weather lookups never fail a request; the provider turns failures into
/// fallback observations.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an airport code is not part of the registry.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two airports.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a route request carries out-of-range parameters.
    #[error("invalid route request: {message}")]
    InvalidRequest { message: String },

    /// Raised when an airport registry cannot support routing.
    #[error("invalid airport registry: {message}")]
    InvalidRegistry { message: String },

    /// Wrapper for HTTP client construction errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_registry(message: impl Into<String>) -> Self {
        Error::InvalidRegistry {
            message: message.into(),
        }
    }
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
