//! The HTTP transport shared by every client in the process.
//!
//! A transport is a pooled [`reqwest::Client`] plus the [`Config`] it was built
//! from. The process-wide transport is installed at most once: either
//! explicitly through [`init`], or lazily with [`Config::default`] the first
//! time a client needs it. Once installed it is never replaced, and later
//! calls to [`init`] are ignored.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use polymarket_gamma_client::transport::{self, Config};
//!
//! # fn main() -> polymarket_gamma_client::Result<()> {
//! let installed = transport::init(
//!     Config::builder()
//!         .timeout(Duration::from_secs(10))
//!         .pool_max_idle_per_host(4)
//!         .build(),
//! )?;
//! assert!(installed);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use bon::Builder;
use reqwest::Client as ReqwestClient;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::Result;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = "rs_gamma_client";

static SHARED: TransportCell = TransportCell::new();

/// Transport tuning. Only `timeout` is always applied; unset options keep
/// `reqwest`'s defaults.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Config {
    /// Total timeout of a single attempt, from connecting to reading the body.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub pool_idle_timeout: Option<Duration>,
    pub pool_max_idle_per_host: Option<usize>,
    #[builder(into)]
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A pooled HTTP client and the configuration it was built from.
#[derive(Debug)]
pub struct Transport {
    client: ReqwestClient,
    config: Config,
}

impl Transport {
    /// Builds a standalone transport. Most callers want [`shared`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is not a valid header value or the
    /// underlying client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let mut headers = HeaderMap::new();
        let _ = headers.insert("Accept", HeaderValue::from_static("application/json"));

        let mut builder = ReqwestClient::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(config.timeout);

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.pool_idle_timeout {
            builder = builder.pool_idle_timeout(timeout);
        }
        if let Some(max) = config.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn client(&self) -> &ReqwestClient {
        &self.client
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

/// A slot holding at most one [`Transport`], installed once and then shared.
///
/// The process-wide slot behind [`init`] and [`shared`] is one of these;
/// separate cells are useful to scope a transport to part of an application.
#[derive(Debug, Default)]
pub struct TransportCell {
    slot: OnceLock<Arc<Transport>>,
}

impl TransportCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Installs a transport built from `config` unless one is already
    /// installed. Returns whether this call installed it.
    ///
    /// When several threads race, exactly one configuration wins and every
    /// caller observes the same transport afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built. Nothing is installed
    /// in that case.
    pub fn init(&self, config: Config) -> Result<bool> {
        if self.slot.get().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(?config, "transport already initialized, ignoring configuration");
            return Ok(false);
        }

        let transport = Arc::new(Transport::new(config)?);
        let installed = self.slot.set(transport).is_ok();

        #[cfg(feature = "tracing")]
        if installed {
            tracing::debug!(timeout = ?self.slot.get().map(|t| t.timeout()), "transport initialized");
        }

        Ok(installed)
    }

    /// Returns the installed transport, installing a default one first if the
    /// cell is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is empty and the default transport cannot
    /// be built.
    pub fn get(&self) -> Result<Arc<Transport>> {
        if let Some(transport) = self.slot.get() {
            return Ok(Arc::clone(transport));
        }

        let transport = Arc::new(Transport::new(Config::default())?);
        Ok(Arc::clone(self.slot.get_or_init(|| transport)))
    }

    /// The installed transport, if any, without installing a default.
    #[must_use]
    pub fn installed(&self) -> Option<Arc<Transport>> {
        self.slot.get().map(Arc::clone)
    }
}

/// Configures the process-wide transport. Only the first call that reaches
/// an uninitialized transport has any effect; see [`TransportCell::init`].
///
/// Clients look the transport up on their first request, so this takes effect
/// for clients built earlier as long as none of them has sent a request yet.
///
/// # Errors
///
/// Returns an error if the transport cannot be built.
pub fn init(config: Config) -> Result<bool> {
    SHARED.init(config)
}

/// The process-wide transport, created with [`Config::default`] if [`init`]
/// was never called.
///
/// # Errors
///
/// Returns an error if the default transport cannot be built.
pub fn shared() -> Result<Arc<Transport>> {
    SHARED.get()
}
