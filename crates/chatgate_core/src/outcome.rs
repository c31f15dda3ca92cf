//! Terminal request outcomes and their boundary mapping.

use serde::Serialize;
use std::time::Duration;

/// The single result produced for every inbound chat message.
///
/// Every failure inside the orchestrator ends up here as data; nothing is
/// raised past it.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Generated (or cached) response text
    Success(String),
    /// Outbound budget exhausted; retry after the given wait
    RateLimited {
        /// Time until the current window expires
        retry_after: Duration,
    },
    /// Provider kept throttling after every retry
    ProviderThrottled,
    /// Credential missing or invalid
    AuthRejected,
    /// Message failed validation
    InvalidInput(String),
    /// Non-throttling provider failure
    ProviderError(String),
    /// Caller cancelled the request
    Cancelled,
}

/// Status category the boundary layer should answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StatusCategory {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 429
    TooManyRequests,
    /// 499, client went away
    ClientClosedRequest,
    /// 500
    InternalError,
    /// 503
    ServiceUnavailable,
}

impl StatusCategory {
    /// HTTP status code for this category.
    pub fn code(self) -> u16 {
        match self {
            StatusCategory::Ok => 200,
            StatusCategory::BadRequest => 400,
            StatusCategory::Unauthorized => 401,
            StatusCategory::TooManyRequests => 429,
            StatusCategory::ClientClosedRequest => 499,
            StatusCategory::InternalError => 500,
            StatusCategory::ServiceUnavailable => 503,
        }
    }
}

/// JSON body for an outcome: `{"response": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutcomeBody {
    /// Successful response
    Response {
        /// Generated text
        response: String,
    },
    /// Any failure
    Error {
        /// Caller-facing message
        error: String,
    },
}

impl Outcome {
    /// Status category per the outcome-to-response table.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatgate_core::{Outcome, StatusCategory};
    ///
    /// assert_eq!(Outcome::AuthRejected.status(), StatusCategory::Unauthorized);
    /// assert_eq!(Outcome::ProviderThrottled.status().code(), 503);
    /// ```
    pub fn status(&self) -> StatusCategory {
        match self {
            Outcome::Success(_) => StatusCategory::Ok,
            Outcome::AuthRejected => StatusCategory::Unauthorized,
            Outcome::InvalidInput(_) => StatusCategory::BadRequest,
            Outcome::RateLimited { .. } => StatusCategory::TooManyRequests,
            Outcome::ProviderThrottled => StatusCategory::ServiceUnavailable,
            Outcome::ProviderError(_) => StatusCategory::InternalError,
            Outcome::Cancelled => StatusCategory::ClientClosedRequest,
        }
    }

    /// Whole seconds to advertise in `Retry-After`, rounded up.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatgate_core::Outcome;
    /// use std::time::Duration;
    ///
    /// let limited = Outcome::RateLimited { retry_after: Duration::from_millis(7_200) };
    /// assert_eq!(limited.retry_after_secs(), Some(8));
    /// assert_eq!(Outcome::Cancelled.retry_after_secs(), None);
    /// ```
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Outcome::RateLimited { retry_after } => {
                let whole = retry_after.as_secs();
                Some(if retry_after.subsec_nanos() > 0 {
                    whole + 1
                } else {
                    whole
                })
            }
            _ => None,
        }
    }

    /// Whether this outcome carries a response.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Short snake_case name for logs.
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Caller-facing JSON body. Provider error details stay in the logs.
    pub fn body(&self) -> OutcomeBody {
        let error = match self {
            Outcome::Success(text) => {
                return OutcomeBody::Response {
                    response: text.clone(),
                };
            }
            Outcome::RateLimited { .. } => "Too many requests. Please try again later.".to_string(),
            Outcome::ProviderThrottled => {
                "The model service is under heavy load. Please wait a few minutes.".to_string()
            }
            Outcome::AuthRejected => "Authentication token missing or invalid".to_string(),
            Outcome::InvalidInput(reason) => reason.clone(),
            Outcome::ProviderError(_) => "Could not generate a response".to_string(),
            Outcome::Cancelled => "Request cancelled".to_string(),
        };
        OutcomeBody::Error { error }
    }
}
