//! The process-wide transport is configured at most once. This lives in its own
//! test binary so no other test can install the transport first.

use std::sync::Arc;
use std::time::Duration;

use polymarket_gamma_client::gamma::Client;
use polymarket_gamma_client::transport::{self, Config};

#[test]
fn first_configuration_wins_for_the_whole_process() -> anyhow::Result<()> {
    // Built before any configuration: the transport is only resolved on use.
    let early = Client::default();

    let first = transport::init(Config::builder().timeout(Duration::from_secs(7)).build())?;
    let second = transport::init(Config::builder().timeout(Duration::from_secs(90)).build())?;

    assert!(first);
    assert!(!second);

    let shared = transport::shared()?;
    assert_eq!(shared.timeout(), Duration::from_secs(7));

    assert!(Arc::ptr_eq(&early.transport()?, &shared));

    let late = Client::new("http://localhost:8080")?;
    assert!(Arc::ptr_eq(&late.transport()?, &shared));
    assert_eq!(late.transport()?.config().timeout, Duration::from_secs(7));

    Ok(())
}
