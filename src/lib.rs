#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod error;
pub mod gamma;
pub mod retry;
pub(crate) mod serde_helpers;
pub mod target;
pub mod transport;
pub mod types;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::Error;
use crate::retry::{Disposition, RetryPolicy};
use crate::target::ParameterSet;

pub type Result<T> = std::result::Result<T, Error>;

/// Trait for converting request types to URL query parameters.
///
/// This trait is automatically implemented for all types that implement [`Serialize`].
/// It uses [`serde_html_form`] to serialize the struct fields, so sequences become
/// repeated keys (`key=val1&key=val2`) and `None` fields are left out.
pub trait ToQueryParams: Serialize {
    /// Converts the request into a [`ParameterSet`].
    ///
    /// Returns an empty set if the request cannot be form-encoded, which only
    /// happens for nested structures that no request type contains.
    fn query_params(&self) -> ParameterSet {
        let encoded = serde_html_form::to_string(self)
            .inspect_err(|e| {
                #[cfg(feature = "tracing")]
                tracing::error!("Unable to convert to URL-encoded string {e:?}");
                #[cfg(not(feature = "tracing"))]
                let _: &serde_html_form::ser::Error = e;
            })
            .unwrap_or_default();

        form_urlencoded::parse(encoded.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }
}

impl<T: Serialize> ToQueryParams for T {}

/// Performs a GET on `target` under `policy` and decodes the body into `Response`.
///
/// Each attempt either returns the decoded body, which ends the call, or fails.
/// [`RetryPolicy::should_retry_error`] decides whether a failure is retried
/// after [`RetryPolicy::delay`]. A failure that is not retried is returned as
/// is when [`retry::classify`] marks it as [`Disposition::Abort`], and wrapped
/// in an [`error::Exhausted`] when the budget ran out.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(client, policy), err(level = "debug"))
)]
async fn request<Response: DeserializeOwned>(
    client: &reqwest::Client,
    policy: &RetryPolicy,
    target: &str,
) -> Result<Response> {
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay(attempt);
            #[cfg(feature = "tracing")]
            tracing::debug!(attempt, ?delay, "backing off before retry");
            tokio::time::sleep(delay).await;
        }

        let error = match execute(client, target).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if policy.should_retry_error(&error, attempt) {
            #[cfg(feature = "tracing")]
            tracing::warn!(attempt, attempts, error = %error, "request attempt failed");
            attempt += 1;
            continue;
        }

        if retry::classify(&error) == Disposition::Abort {
            #[cfg(feature = "tracing")]
            tracing::warn!(attempt, error = %error, "request failed, not retrying");
            return Err(error);
        }

        #[cfg(feature = "tracing")]
        tracing::error!(attempts, error = %error, "retry budget exhausted");

        break Err(Error::exhausted(attempts, error));
    }
}

/// A single attempt. The body is always read to the end so the connection goes
/// back to the pool, whatever the status.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "trace",
        skip(client, target),
        fields(method = "GET", path, status_code)
    )
)]
async fn execute<Response: DeserializeOwned>(
    client: &reqwest::Client,
    target: &str,
) -> Result<Response> {
    let request = client.request(Method::GET, target).build()?;
    let path = request.url().path().to_owned();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("path", path.as_str());

    let response = client.execute(request).await.map_err(Error::transport)?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    let body = response.bytes().await.map_err(Error::transport)?;

    if !status_code.is_success() {
        let message = String::from_utf8_lossy(&body).into_owned();
        return Err(Error::status(status_code, Method::GET, path, message));
    }

    let value: serde_json::Value = serde_json::from_slice(&body)?;
    serde_helpers::deserialize_with_warnings(value)
}
