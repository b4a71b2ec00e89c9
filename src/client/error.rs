//! Errors reported to the user of the terminal client.
//!
//! `Display` of every variant is the exact message shown to the user.

use thiserror::Error;

/// Why a client action failed.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please enter a URL.")]
    EmptyUrl,

    #[error("Please enter a short code.")]
    EmptyCode,

    #[error("That alias is already taken.")]
    AliasTaken,

    #[error("Short URL not found.")]
    NotFound,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// The backend refused the input (422).
    #[error("{0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("Could not reach the server.")]
    Connection(#[source] reqwest::Error),

    /// A success status whose body could not be read.
    #[error("Server returned error")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    Config(String),
}
