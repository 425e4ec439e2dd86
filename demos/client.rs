//! Gamma API endpoint explorer.
//!
//! Walks every endpoint, feeding ids and slugs found in earlier responses into
//! the lookups that need them.
//!
//! Run with tracing enabled:
//! ```sh
//! RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example gamma --features tracing
//! ```
//!
//! Optionally log to a file:
//! ```sh
//! LOG_FILE=gamma.log RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example gamma --features tracing
//! ```

use std::fs::File;
use std::time::Duration;

use chrono::{Duration as TimeDelta, Utc};
use polymarket_gamma_client::gamma::Client;
use polymarket_gamma_client::gamma::types::Status;
use polymarket_gamma_client::gamma::types::request::{
    EventByIdRequest, EventsBeforeDateRequest, EventsBetweenDatesRequest, EventsByTagRequest,
    MarketByIdRequest, MarketsBetweenDatesRequest, RelatedTagsByTagIdRequest, TagBySlugRequest,
    TagsRequest, TeamsRequest,
};
use polymarket_gamma_client::transport::{self, Config};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    transport::init(Config::builder().timeout(Duration::from_secs(15)).build())?;
    let client = Client::default();

    match client.sports().await {
        Ok(v) => info!(endpoint = "sports", count = v.len()),
        Err(e) => debug!(endpoint = "sports", error = %e),
    }

    match client.market_types().await {
        Ok(v) => info!(endpoint = "market_types", types = %v),
        Err(e) => debug!(endpoint = "market_types", error = %e),
    }

    match client
        .teams(&TeamsRequest::builder().limit(5).offset(0).build())
        .await
    {
        Ok(v) => info!(endpoint = "teams", count = v.len()),
        Err(e) => debug!(endpoint = "teams", error = %e),
    }

    match client
        .tags(&TagsRequest::builder().limit(10).offset(0).build())
        .await
    {
        Ok(v) => info!(endpoint = "tags", count = v.len()),
        Err(e) => debug!(endpoint = "tags", error = %e),
    }

    let tag_id = match client
        .tag_by_slug(&TagBySlugRequest::builder().slug("nfl").build())
        .await
    {
        Ok(tag) => {
            info!(endpoint = "tag_by_slug", tag = %tag);
            tag.id.parse::<i64>().ok()
        }
        Err(e) => {
            debug!(endpoint = "tag_by_slug", error = %e);
            None
        }
    };

    if let Some(tag_id) = tag_id {
        explore_tag(&client, tag_id).await;
    }

    let now = Utc::now();

    let market_id = match client
        .markets_between_dates(
            &MarketsBetweenDatesRequest::builder()
                .limit(5)
                .offset(0)
                .start_date_min(now - TimeDelta::days(7))
                .end_date_max(now + TimeDelta::days(7))
                .build(),
        )
        .await
    {
        Ok(v) => {
            info!(endpoint = "markets_between_dates", count = v.len());
            v.first().and_then(|market| market.id.parse::<i64>().ok())
        }
        Err(e) => {
            debug!(endpoint = "markets_between_dates", error = %e);
            None
        }
    };

    if let Some(id) = market_id {
        match client
            .market_by_id(&MarketByIdRequest::builder().id(id).build())
            .await
        {
            Ok(v) => info!(endpoint = "market_by_id", count = v.len()),
            Err(e) => debug!(endpoint = "market_by_id", error = %e),
        }
    }

    Ok(())
}

/// Endpoints keyed by a tag id found through `tag_by_slug`.
async fn explore_tag(client: &Client, tag_id: i64) {
    let now = Utc::now();

    match client
        .related_tags_by_tag_id(&RelatedTagsByTagIdRequest::builder().id(tag_id).build())
        .await
    {
        Ok(v) => info!(endpoint = "related_tags_by_tag_id", count = v.len()),
        Err(e) => debug!(endpoint = "related_tags_by_tag_id", error = %e),
    }

    let event_id = match client
        .events_by_tag(
            &EventsByTagRequest::builder()
                .tag_id(tag_id)
                .related_tags(true)
                .build(),
        )
        .await
    {
        Ok(v) => {
            info!(endpoint = "events_by_tag", count = v.len());
            v.into_iter().next().map(|event| event.id)
        }
        Err(e) => {
            debug!(endpoint = "events_by_tag", error = %e);
            None
        }
    };

    if let Some(id) = event_id {
        match client
            .event_by_id(&EventByIdRequest::builder().id(id).build())
            .await
        {
            Ok(event) => info!(endpoint = "event_by_id", event = %event),
            Err(e) => debug!(endpoint = "event_by_id", error = %e),
        }
    }

    match client
        .events_before_date(
            &EventsBeforeDateRequest::builder()
                .limit(5)
                .offset(0)
                .tag_id(tag_id)
                .volume_min(1000)
                .end_date_max(now + TimeDelta::days(30))
                .status(Status::Active)
                .build(),
        )
        .await
    {
        Ok(v) => info!(endpoint = "events_before_date", count = v.len()),
        Err(e) => debug!(endpoint = "events_before_date", error = %e),
    }

    match client
        .events_between_dates(
            &EventsBetweenDatesRequest::builder()
                .limit(5)
                .offset(0)
                .tag_id(tag_id)
                .volume_min(1000)
                .start_date_min(now - TimeDelta::days(30))
                .end_date_max(now)
                .status(Status::Closed)
                .build(),
        )
        .await
    {
        Ok(v) => info!(endpoint = "events_between_dates", count = v.len()),
        Err(e) => debug!(endpoint = "events_between_dates", error = %e),
    }
}
