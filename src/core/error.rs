// Centralized error handling for the customer console

use thiserror::Error;

/// Status text shown when a failure carries no structured message
pub const GENERIC_SERVER_ERROR: &str = "Server error!";

/// Status text shown when required fields are missing
pub const GENERIC_VALIDATION_ERROR: &str = "Please fill in all required fields";

/// Local failures detected before any request is sent
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingRequired,

    #[error("Customer ID is required for this action")]
    MissingCustomerId,
}

/// Failures of a request against the customers backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Server error!")]
    Unstructured { status: u16 },

    #[error("Server error!")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse response body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Unstructured { status } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl(_) | ApiError::InvalidBody(_) => None,
        }
    }
}

/// Any failure of a single user action
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    /// Text for the status area
    ///
    /// Server messages are passed through verbatim; everything without a
    /// structured message collapses to one generic string.
    pub fn flash_text(&self) -> String {
        match self {
            ActionError::Form(FormError::MissingRequired) => GENERIC_VALIDATION_ERROR.to_string(),
            ActionError::Form(e) => e.to_string(),
            ActionError::Api(ApiError::Server { message, .. }) => message.clone(),
            ActionError::Api(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}
