#[derive(Debug, thiserror::Error)]
pub enum LynappError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Boundary validation failures for user input and price histories.
///
/// Form variants carry the exact messages shown to users.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email address is required.")]
    EmailRequired,

    #[error("Email address is invalid.")]
    EmailInvalid,

    #[error("Password is required.")]
    PasswordRequired,

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("price at index {index} is not a finite number")]
    NonFinitePrice { index: usize },

    #[error("price at index {index} is negative ({price})")]
    NegativePrice { index: usize, price: f64 },

    #[error("date at index {index} ({date}) is earlier than the previous point ({previous})")]
    OutOfOrder {
        index: usize,
        date: chrono::NaiveDate,
        previous: chrono::NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, LynappError>;
