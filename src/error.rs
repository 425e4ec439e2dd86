use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Non-successful HTTP call that will not be retried
    Status,
    /// Error related to invalid caller input or configuration
    Validation,
    /// Network-level failure: connect, timeout, DNS, or reading the body
    Transport,
    /// A successful response whose body did not match the requested type
    Decode,
    /// Every permitted attempt failed; the source carries the last cause
    Exhausted,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Status {
            status_code,
            method,
            path,
            message: message.into(),
        }
        .into()
    }

    #[must_use]
    pub fn transport(source: reqwest::Error) -> Self {
        Error::with_source(Kind::Transport, source)
    }

    #[must_use]
    pub fn exhausted(attempts: u32, last: Error) -> Self {
        Exhausted { attempts, last }.into()
    }

    /// The status code of the failed response, looking through an exhaustion
    /// wrapper to the last attempt.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        if let Some(status) = self.downcast_ref::<Status>() {
            return Some(status.status_code);
        }
        self.downcast_ref::<Exhausted>()
            .and_then(|exhausted| exhausted.last.status_code())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

/// Retry budget exhausted. Carries the most recent failure, even when earlier
/// attempts failed for a different reason.
#[non_exhaustive]
#[derive(Debug)]
pub struct Exhausted {
    pub attempts: u32,
    pub last: Error,
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request failed after {} attempts: {}",
            self.attempts, self.last
        )
    }
}

impl StdError for Exhausted {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.last)
    }
}

impl From<Exhausted> for Error {
    fn from(err: Exhausted) -> Self {
        Error::with_source(Kind::Exhausted, err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Decode, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        Error::with_source(Kind::Status, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_should_succeed() {
        let error = Error::status(
            StatusCode::NOT_FOUND,
            Method::GET,
            "/events/1".to_owned(),
            "not found",
        );

        assert_eq!(error.kind(), Kind::Status);
        assert_eq!(
            error.to_string(),
            "Status: error(404 Not Found) making GET call to /events/1 with not found"
        );
    }

    #[test]
    fn exhausted_keeps_last_cause_and_attempts() {
        let last = Error::status(
            StatusCode::SERVICE_UNAVAILABLE,
            Method::GET,
            "/teams".to_owned(),
            "try later",
        );
        let error = Error::exhausted(3, last);

        assert_eq!(error.kind(), Kind::Exhausted);
        assert!(error.to_string().contains("after 3 attempts"), "{error}");
        assert!(error.to_string().contains("503"), "{error}");
        assert_eq!(error.status_code(), Some(StatusCode::SERVICE_UNAVAILABLE));

        let exhausted = error
            .downcast_ref::<Exhausted>()
            .expect("exhausted source");
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(exhausted.last.kind(), Kind::Status);
    }

    #[test]
    fn decode_error_converts_to_decode_kind() {
        let e = serde_json::from_str::<Vec<u8>>("{").expect_err("truncated json");
        let error: Error = e.into();

        assert_eq!(error.kind(), Kind::Decode);
        assert_eq!(error.status_code(), None);
    }
}
