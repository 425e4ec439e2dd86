#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

//! Parameters for the filtered Gamma endpoints.
//!
//! Every field that is not marked `skip` becomes a query parameter. Path
//! identifiers (slugs, ids) are carried alongside and skipped during
//! serialization. Paging values are passed through as given, negative ones
//! included.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::serde_as;

use crate::gamma::types::Status;
use crate::serde_helpers::WireDate;

const ORDER_BY_ID: &str = "id";
const ORDER_BY_VOLUME: &str = "volume";

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct TeamsRequest {
    pub limit: i32,
    pub offset: i32,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub league: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub abbreviation: Vec<String>,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct TagsRequest {
    pub limit: i32,
    pub offset: i32,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct TagBySlugRequest {
    #[serde(skip_serializing)]
    #[builder(into)]
    pub slug: String,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct RelatedTagsByTagIdRequest {
    #[serde(skip_serializing)]
    pub id: i64,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct EventsByTagRequest {
    pub tag_id: i64,
    /// Also return events carrying tags related to `tag_id`.
    #[builder(default)]
    pub related_tags: bool,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct EventByIdRequest {
    #[serde(skip_serializing)]
    #[builder(into)]
    pub id: String,
}

/// Events ending no later than `end_date_max`, most traded first.
#[serde_as]
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct EventsBeforeDateRequest {
    pub limit: i32,
    pub offset: i32,
    pub tag_id: i64,
    pub volume_min: i64,
    #[serde_as(as = "WireDate")]
    pub end_date_max: DateTime<Utc>,
    /// Sent as the `active`/`closed` flag pair, see [`Status::apply`].
    #[serde(skip)]
    pub status: Option<Status>,
    #[builder(into, default = ORDER_BY_VOLUME.to_owned())]
    pub order: String,
}

/// Events starting no earlier than `start_date_min` and ending no later than
/// `end_date_max`, most traded first.
#[serde_as]
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct EventsBetweenDatesRequest {
    pub limit: i32,
    pub offset: i32,
    pub tag_id: i64,
    pub volume_min: i64,
    #[serde_as(as = "WireDate")]
    pub start_date_min: DateTime<Utc>,
    #[serde_as(as = "WireDate")]
    pub end_date_max: DateTime<Utc>,
    /// Sent as the `active`/`closed` flag pair, see [`Status::apply`].
    #[serde(skip)]
    pub status: Option<Status>,
    #[builder(into, default = ORDER_BY_VOLUME.to_owned())]
    pub order: String,
}

#[serde_as]
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct MarketsBetweenDatesRequest {
    pub limit: i32,
    pub offset: i32,
    #[serde_as(as = "WireDate")]
    pub start_date_min: DateTime<Utc>,
    #[serde_as(as = "WireDate")]
    pub end_date_max: DateTime<Utc>,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}

/// Looks a market up through the `markets` listing, so the response is a list.
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct MarketByIdRequest {
    pub id: i64,
    #[builder(into, default = ORDER_BY_ID.to_owned())]
    pub order: String,
}
