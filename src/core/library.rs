use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // The patron is known but not allowed to take more items, e.g. the borrowing limit was reached.
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The requested item exists but has no copy left to hand out.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // The payment gateway answered and refused the charge or refund.
    PaymentDeclined {
        message: String,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn payment_declined(message: &str) -> LibraryError {
        LibraryError::PaymentDeclined { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::NotGranted { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::PaymentDeclined { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn reason_code(&self) -> Option<String> {
        match self {
            LibraryError::Database { reason_code, .. } => { reason_code.clone() }
            LibraryError::AccessDenied { reason_code, .. } => { reason_code.clone() }
            LibraryError::NotGranted { reason_code, .. } => { reason_code.clone() }
            LibraryError::CurrentlyUnavailable { reason_code, .. } => { reason_code.clone() }
            LibraryError::Validation { reason_code, .. } => { reason_code.clone() }
            LibraryError::Runtime { reason_code, .. } => { reason_code.clone() }
            _ => { None }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Database { message, .. } => { message.as_str() }
            LibraryError::AccessDenied { message, .. } => { message.as_str() }
            LibraryError::NotGranted { message, .. } => { message.as_str() }
            LibraryError::DuplicateKey { message } => { message.as_str() }
            LibraryError::NotFound { message } => { message.as_str() }
            LibraryError::CurrentlyUnavailable { message, .. } => { message.as_str() }
            LibraryError::Validation { message, .. } => { message.as_str() }
            LibraryError::PaymentDeclined { message } => { message.as_str() }
            LibraryError::Serialization { message } => { message.as_str() }
            LibraryError::Runtime { message, .. } => { message.as_str() }
        }
    }
}

// store_failure logs the store error and replaces its detail with a message fit for the caller.
pub(crate) fn store_failure(message: &str, cause: LibraryError) -> LibraryError {
    warn!(cause = ?cause, "{}", message);
    LibraryError::database(message, cause.reason_code(), cause.retryable())
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

// Display carries the message only, reason codes stay in Debug.
impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for library services and repositories.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Returned,
}

impl TryFrom<&str> for LoanStatus {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Active" => Ok(LoanStatus::Active),
            "Returned" => Ok(LoanStatus::Returned),
            _ => Err(LibraryError::serialization(format!("unknown loan status {:?}", s).as_str())),
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}
