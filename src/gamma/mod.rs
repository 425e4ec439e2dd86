//! Polymarket Gamma API client and types.
//!
//! The Gamma API serves the metadata behind Polymarket: sports, teams, tags,
//! events and markets. Every call is a GET, retried on rate limiting, server
//! errors, transport failures and undecodable bodies.
//!
//! ## Available Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | [`Client::teams`] | `/teams` | List sports teams |
//! | [`Client::sports`] | `/sports` | Get sports metadata |
//! | [`Client::market_types`] | `/sports/market-types` | Get valid sports market types |
//! | [`Client::tags`] | `/tags` | List tags |
//! | [`Client::tag_by_slug`] | `/tags/slug/{slug}` | Get tag by slug |
//! | [`Client::related_tags_by_tag_id`] | `/tags/{id}/related-tags/tags` | Get related tags |
//! | [`Client::events_by_tag`] | `/events` | List events for a tag |
//! | [`Client::event_by_id`] | `/events/{id}` | Get event by ID |
//! | [`Client::events_before_date`] | `/events` | List events ending before a date |
//! | [`Client::events_between_dates`] | `/events` | List events inside a date window |
//! | [`Client::markets_between_dates`] | `/markets` | List markets inside a date window |
//! | [`Client::market_by_id`] | `/markets` | Look a market up by ID |
//!
//! # Example
//!
//! ```no_run
//! use polymarket_gamma_client::gamma::{Client, types::Status};
//! use polymarket_gamma_client::gamma::types::request::EventsBetweenDatesRequest;
//! use polymarket_gamma_client::types::{DateTime, Utc};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::default();
//!
//! let request = EventsBetweenDatesRequest::builder()
//!     .limit(10)
//!     .offset(0)
//!     .tag_id(100_639)
//!     .volume_min(1000)
//!     .start_date_min("2025-10-15T00:00:00Z".parse::<DateTime<Utc>>()?)
//!     .end_date_max("2025-12-31T23:59:59Z".parse::<DateTime<Utc>>()?)
//!     .status(Status::Active)
//!     .build();
//!
//! for event in client.events_between_dates(&request).await? {
//!     println!("{event}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Base URL
//!
//! The default API endpoint is `https://gamma-api.polymarket.com`.

pub mod client;
pub mod types;

pub use client::Client;
