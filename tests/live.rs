//! Smoke tests against the production Gamma API.
//!
//! These need network access and are ignored by default:
//!
//! ```bash
//! cargo test --test live -- --ignored
//! ```

use polymarket_gamma_client::gamma::Client;
use polymarket_gamma_client::gamma::types::request::{
    MarketByIdRequest, RelatedTagsByTagIdRequest, TagBySlugRequest, TagsRequest, TeamsRequest,
};

#[tokio::test]
#[ignore = "requires network access"]
async fn sports_are_listed() -> anyhow::Result<()> {
    let sports = Client::default().sports().await?;

    assert!(!sports.is_empty());
    assert!(sports.iter().all(|sport| !sport.sport.is_empty()));
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access"]
async fn market_types_are_listed() -> anyhow::Result<()> {
    let types = Client::default().market_types().await?;

    assert!(!types.market_types.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access"]
async fn teams_respect_the_page_size() -> anyhow::Result<()> {
    let request = TeamsRequest::builder()
        .limit(5)
        .offset(0)
        .league(vec!["nfl".to_owned()])
        .build();
    let teams = Client::default().teams(&request).await?;

    assert!(teams.len() <= 5);
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access"]
async fn tags_resolve_by_slug_and_relation() -> anyhow::Result<()> {
    let client = Client::default();

    let tags = client
        .tags(&TagsRequest::builder().limit(3).offset(0).build())
        .await?;
    assert!(tags.len() <= 3);

    let nfl = client
        .tag_by_slug(&TagBySlugRequest::builder().slug("nfl").build())
        .await?;
    assert_eq!(nfl.slug.as_deref(), Some("nfl"));

    let id: i64 = nfl.id.parse()?;
    let _related = client
        .related_tags_by_tag_id(&RelatedTagsByTagIdRequest::builder().id(id).build())
        .await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access"]
async fn unknown_market_id_yields_an_empty_listing() -> anyhow::Result<()> {
    let request = MarketByIdRequest::builder().id(999_999_999).build();
    let markets = Client::default().market_by_id(&request).await?;

    assert!(markets.is_empty());
    Ok(())
}
