//! Client for the Polymarket Gamma API.
//!
//! The client turns typed requests into Gamma URLs and runs every call through
//! the shared transport under a [`RetryPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use polymarket_gamma_client::gamma::{Client, types::request::TagsRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::default();
//!
//! let request = TagsRequest::builder().limit(10).offset(0).build();
//!
//! for tag in client.tags(&request).await? {
//!     println!("{tag}");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use super::types::request::{
    EventByIdRequest, EventsBeforeDateRequest, EventsBetweenDatesRequest, EventsByTagRequest,
    MarketByIdRequest, MarketsBetweenDatesRequest, RelatedTagsByTagIdRequest, TagBySlugRequest,
    TagsRequest, TeamsRequest,
};
use super::types::response::{Event, Market, MarketTypes, Sport, Tag, Team};
use crate::retry::RetryPolicy;
use crate::target::{ParameterSet, build_target};
use crate::transport::{self, Transport};
use crate::{Result, ToQueryParams as _};

/// The production Gamma API.
pub const DEFAULT_HOST: &str = "https://gamma-api.polymarket.com";

/// HTTP client for the Polymarket Gamma API.
///
/// Clients are cheap to clone. Unless built with [`Client::with_transport`],
/// they all share the process-wide transport from [`transport::shared`], so
/// connections are pooled across clients. The shared transport is looked up
/// on the first request, so [`transport::init`] still applies when called
/// after a client was built.
///
/// # Example
///
/// ```no_run
/// use polymarket_gamma_client::gamma::Client;
/// use polymarket_gamma_client::retry::RetryPolicy;
///
/// // Client with the default endpoint and retry policy
/// let client = Client::default();
///
/// // Or with a custom endpoint and a tighter retry budget
/// let client = Client::new("https://custom-api.example.com")
///     .unwrap()
///     .with_retry_policy(RetryPolicy::builder().max_attempts(2).build());
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    /// `None` means the process-wide transport.
    transport: Option<Arc<Transport>>,
    retry: RetryPolicy,
}

impl Default for Client {
    fn default() -> Self {
        Client::new(DEFAULT_HOST).expect("Client with default endpoint should succeed")
    }
}

impl Client {
    /// Creates a client for `host` on the process-wide transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not a valid URL.
    pub fn new(host: &str) -> Result<Client> {
        Ok(Self {
            host: Url::parse(host)?,
            transport: None,
            retry: RetryPolicy::default(),
        })
    }

    /// Creates a client for `host` on a caller-provided transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not a valid URL.
    pub fn with_transport(host: &str, transport: Arc<Transport>) -> Result<Client> {
        Ok(Self {
            host: Url::parse(host)?,
            transport: Some(transport),
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy used for every call made by this client.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// The transport requests go through, installing the default process-wide
    /// transport if this client uses it and nothing was installed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be built.
    pub fn transport(&self) -> Result<Arc<Transport>> {
        match &self.transport {
            Some(transport) => Ok(Arc::clone(transport)),
            None => transport::shared(),
        }
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn get<Res: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&ParameterSet>,
    ) -> Result<Res> {
        let target = build_target(self.host.as_str(), path, params)?;
        let transport = self.transport()?;
        crate::request(transport.client(), &self.retry, &target).await
    }

    /// Lists sports teams, optionally filtered by league, name or abbreviation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn teams(&self, request: &TeamsRequest) -> Result<Vec<Team>> {
        self.get("teams", Some(&request.query_params())).await
    }

    /// Lists sports with their images, resolution sources and tag ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn sports(&self) -> Result<Vec<Sport>> {
        let params = ParameterSet::from([("order", "id")]);
        self.get("sports", Some(&params)).await
    }

    /// Returns the valid sports market types.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn market_types(&self) -> Result<MarketTypes> {
        let params = ParameterSet::from([("order", "id")]);
        self.get("sports/market-types", Some(&params)).await
    }

    /// Lists tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn tags(&self, request: &TagsRequest) -> Result<Vec<Tag>> {
        self.get("tags", Some(&request.query_params())).await
    }

    /// Gets a single tag by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn tag_by_slug(&self, request: &TagBySlugRequest) -> Result<Tag> {
        let path = format!("tags/slug/{}", request.slug);
        self.get(&path, Some(&request.query_params())).await
    }

    /// Gets the tags related to a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn related_tags_by_tag_id(
        &self,
        request: &RelatedTagsByTagIdRequest,
    ) -> Result<Vec<Tag>> {
        let path = format!("tags/{}/related-tags/tags", request.id);
        self.get(&path, Some(&request.query_params())).await
    }

    /// Lists events carrying a tag, and optionally its related tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn events_by_tag(&self, request: &EventsByTagRequest) -> Result<Vec<Event>> {
        self.get("events", Some(&request.query_params())).await
    }

    /// Gets a single event by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn event_by_id(&self, request: &EventByIdRequest) -> Result<Event> {
        let path = format!("events/{}", request.id);
        self.get(&path, None).await
    }

    /// Lists events ending before a date, with an optional lifecycle filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn events_before_date(
        &self,
        request: &EventsBeforeDateRequest,
    ) -> Result<Vec<Event>> {
        let mut params = request.query_params();
        if let Some(status) = request.status {
            status.apply(&mut params);
        }
        self.get("events", Some(&params)).await
    }

    /// Lists events within a date window, with an optional lifecycle filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn events_between_dates(
        &self,
        request: &EventsBetweenDatesRequest,
    ) -> Result<Vec<Event>> {
        let mut params = request.query_params();
        if let Some(status) = request.status {
            status.apply(&mut params);
        }
        self.get("events", Some(&params)).await
    }

    /// Lists markets within a date window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn markets_between_dates(
        &self,
        request: &MarketsBetweenDatesRequest,
    ) -> Result<Vec<Market>> {
        self.get("markets", Some(&request.query_params())).await
    }

    /// Looks a market up by id. The API answers with the filtered market
    /// listing, which is empty when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn market_by_id(&self, request: &MarketByIdRequest) -> Result<Vec<Market>> {
        self.get("markets", Some(&request.query_params())).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transport::Config;

    #[test]
    fn default_client_targets_production_host() {
        let client = Client::default();

        assert_eq!(client.host().as_str(), "https://gamma-api.polymarket.com/");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn clients_share_the_process_transport() -> Result<()> {
        let first = Client::new("http://localhost:1")?;
        let second = Client::default();

        assert!(Arc::ptr_eq(&first.transport()?, &second.transport()?));
        Ok(())
    }

    #[test]
    fn with_transport_keeps_a_private_transport() -> Result<()> {
        let transport = Arc::new(Transport::new(
            Config::builder().timeout(Duration::from_secs(2)).build(),
        )?);
        let client = Client::with_transport(DEFAULT_HOST, Arc::clone(&transport))?
            .with_retry_policy(RetryPolicy::builder().max_attempts(5).build());

        assert!(Arc::ptr_eq(&client.transport()?, &transport));
        assert_eq!(client.transport()?.timeout(), Duration::from_secs(2));
        assert_eq!(client.retry_policy().max_attempts, 5);
        Ok(())
    }

    #[test]
    fn invalid_host_is_rejected() -> Result<()> {
        let transport = Arc::new(Transport::new(Config::default())?);
        let err = Client::with_transport("not a url", transport).expect_err("invalid host");

        assert_eq!(err.kind(), crate::error::Kind::Validation);
        Ok(())
    }
}
