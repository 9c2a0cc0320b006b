//! All error types for the langmodel crate.
//!
//! Localization itself never fails: absent locales, absent wire payloads,
//! and absent path segments degrade to empty strings or `None`. Errors are
//! reserved for locale validation and snapshot I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
