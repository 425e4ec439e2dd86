use std::fmt;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::json::JsonString;
use serde_with::{StringWithSeparator, formats::CommaSeparator, serde_as};

use crate::serde_helpers::StringFromAny;
use crate::types::Decimal;

/// A sports team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Team {
    pub id: i64,
    pub name: Option<String>,
    pub league: Option<String>,
    pub record: Option<String>,
    pub logo: Option<String>,
    pub abbreviation: Option<String>,
    pub alias: Option<String>,
    pub color: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sports metadata.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Sport {
    pub id: Option<i64>,
    pub sport: String,
    pub image: Option<String>,
    pub resolution: Option<String>,
    pub ordering: Option<String>,
    /// Tag ids, sent by the API as one comma separated string.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(default)]
    #[builder(default)]
    pub tags: Vec<String>,
    pub series: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Valid sports market types, e.g. `moneyline` or `spreads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct MarketTypes {
    pub market_types: Vec<String>,
}

/// A tag for categorizing events and markets.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Tag {
    #[serde_as(as = "StringFromAny")]
    pub id: String,
    pub label: Option<String>,
    pub slug: Option<String>,
    pub force_show: Option<bool>,
    pub force_hide: Option<bool>,
    pub is_carousel: Option<bool>,
    pub published_at: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Category {
    #[serde_as(as = "StringFromAny")]
    pub id: String,
    pub label: Option<String>,
    pub parent_category: Option<String>,
    pub slug: Option<String>,
}

/// A chat or live stream attached to an event or series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Chat {
    pub id: String,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub channel_image: Option<String>,
    pub live: Option<bool>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Collection {
    pub id: String,
    pub ticker: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub collection_type: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub header_image: Option<String>,
    pub active: Option<bool>,
}

/// A prediction market.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Market {
    pub id: String,
    pub question: Option<String>,
    pub condition_id: Option<String>,
    pub slug: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub amm_type: Option<String>,
    pub liquidity: Option<Decimal>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub lower_bound: Option<String>,
    pub upper_bound: Option<String>,
    pub description: Option<String>,
    /// Outcome labels, sent by the API as a JSON encoded string.
    #[serde_as(as = "Option<JsonString>")]
    #[serde(default)]
    pub outcomes: Option<Vec<String>>,
    #[serde_as(as = "Option<JsonString>")]
    #[serde(default)]
    pub outcome_prices: Option<Vec<Decimal>>,
    pub volume: Option<Decimal>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub market_type: Option<String>,
    #[serde(rename = "questionID")]
    pub question_id: Option<String>,
    pub volume_24hr: Option<Decimal>,
    pub volume_1wk: Option<Decimal>,
    pub volume_1mo: Option<Decimal>,
    pub volume_1yr: Option<Decimal>,
    #[serde_as(as = "Option<JsonString>")]
    #[serde(default)]
    pub clob_token_ids: Option<Vec<String>>,
    #[serde(rename = "teamAID")]
    pub team_a_id: Option<String>,
    #[serde(rename = "teamBID")]
    pub team_b_id: Option<String>,
    pub uma_bond: Option<String>,
    pub uma_reward: Option<String>,
    pub events: Option<Vec<Event>>,
    pub categories: Option<Vec<Category>>,
    pub tags: Option<Vec<Tag>>,
    pub spread: Option<Decimal>,
    pub sports_market_type: Option<String>,
    pub line: Option<Decimal>,
    pub event_start_time: Option<DateTime<Utc>>,
}

/// A series of recurring events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Series {
    pub id: String,
    pub ticker: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub series_type: Option<String>,
    pub recurrence: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub collections: Option<Vec<Collection>>,
    pub categories: Option<Vec<Category>>,
    pub tags: Option<Vec<Tag>>,
    pub comment_count: Option<i64>,
    pub chats: Option<Vec<Chat>>,
}

/// A prediction market event, grouping one or more markets.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Event {
    pub id: String,
    pub ticker: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub resolution_source: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub creation_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub liquidity: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub sort_by: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub is_template: Option<bool>,
    #[serde(alias = "published_at")]
    pub published_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub comments_enabled: Option<bool>,
    pub volume_24hr: Option<Decimal>,
    pub volume_1wk: Option<Decimal>,
    pub volume_1mo: Option<Decimal>,
    pub volume_1yr: Option<Decimal>,
    pub featured_image: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub parent_event: Option<String>,
    pub neg_risk: Option<bool>,
    #[serde(rename = "negRiskMarketID")]
    pub neg_risk_market_id: Option<String>,
    pub sub_events: Option<Vec<String>>,
    pub markets: Option<Vec<Market>>,
    pub series: Option<Vec<Series>>,
    pub categories: Option<Vec<Category>>,
    pub collections: Option<Vec<Collection>>,
    pub tags: Option<Vec<Tag>>,
    pub start_time: Option<DateTime<Utc>>,
    pub series_slug: Option<String>,
    pub chats: Option<Vec<Chat>>,
    pub spreads_main_line: Option<Decimal>,
    pub totals_main_line: Option<Decimal>,
}

/// Renders `None` as `-` so summaries keep a fixed shape.
struct Opt<'value, T>(&'value Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("-"),
        }
    }
}

fn count<T>(items: Option<&Vec<T>>) -> usize {
    items.map_or(0, Vec::len)
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Team{{id: {}, name: {}, league: {}, abbreviation: {}}}",
            self.id,
            Opt(&self.name),
            Opt(&self.league),
            Opt(&self.abbreviation)
        )
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sport{{sport: {}, tags: [{}], series: {}}}",
            self.sport,
            self.tags.join(", "),
            Opt(&self.series)
        )
    }
}

impl fmt::Display for MarketTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarketTypes{{[{}]}}", self.market_types.join(", "))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag{{id: {}, label: {}, slug: {}}}",
            self.id,
            Opt(&self.label),
            Opt(&self.slug)
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Category{{id: {}, label: {}, slug: {}, parent: {}}}",
            self.id,
            Opt(&self.label),
            Opt(&self.slug),
            Opt(&self.parent_category)
        )
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chat{{id: {}, channel: {}, live: {}}}",
            self.id,
            Opt(&self.channel_name),
            Opt(&self.live)
        )
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Collection{{id: {}, slug: {}, title: {}, type: {}}}",
            self.id,
            Opt(&self.slug),
            Opt(&self.title),
            Opt(&self.collection_type)
        )
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Market{{")?;
        writeln!(f, "  id: {}", self.id)?;
        writeln!(f, "  question: {}", Opt(&self.question))?;
        writeln!(f, "  slug: {}", Opt(&self.slug))?;
        writeln!(f, "  start: {}", Opt(&self.start_date))?;
        writeln!(f, "  end: {}", Opt(&self.end_date))?;
        writeln!(f, "  volume: {}", Opt(&self.volume))?;
        writeln!(f, "  liquidity: {}", Opt(&self.liquidity))?;
        if let Some(outcomes) = &self.outcomes {
            writeln!(f, "  outcomes: [{}]", outcomes.join(", "))?;
        }
        writeln!(f, "  tags: {}", count(self.tags.as_ref()))?;
        write!(f, "}}")
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Series{{")?;
        writeln!(f, "  id: {}", self.id)?;
        writeln!(f, "  slug: {}", Opt(&self.slug))?;
        writeln!(f, "  title: {}", Opt(&self.title))?;
        writeln!(f, "  recurrence: {}", Opt(&self.recurrence))?;
        writeln!(f, "  active: {}", Opt(&self.active))?;
        write!(f, "}}")
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event{{")?;
        writeln!(f, "  id: {}", self.id)?;
        writeln!(f, "  title: {}", Opt(&self.title))?;
        writeln!(f, "  slug: {}", Opt(&self.slug))?;
        writeln!(f, "  start: {}", Opt(&self.start_date))?;
        writeln!(f, "  end: {}", Opt(&self.end_date))?;
        writeln!(f, "  volume: {}", Opt(&self.volume))?;
        writeln!(f, "  active: {}", Opt(&self.active))?;
        writeln!(f, "  markets: {}", count(self.markets.as_ref()))?;
        writeln!(f, "  tags: {}", count(self.tags.as_ref()))?;
        write!(f, "}}")
    }
}
