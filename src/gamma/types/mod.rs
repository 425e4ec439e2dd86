//! Types for the Polymarket Gamma API.
//!
//! - **Request types**: builder-pattern structs for the filtered endpoints
//!   (e.g. [`request::TeamsRequest`], [`request::EventsBeforeDateRequest`]).
//! - **Response types**: the records the API returns
//!   (e.g. [`response::Event`], [`response::Market`], [`response::Tag`]).
//!
//! All request types use the builder pattern via the [`bon`](https://docs.rs/bon) crate:
//!
//! ```
//! use polymarket_gamma_client::gamma::types::request::{TagsRequest, TeamsRequest};
//!
//! let tags = TagsRequest::builder().limit(10).offset(0).build();
//!
//! let teams = TeamsRequest::builder()
//!     .limit(25)
//!     .offset(0)
//!     .league(vec!["nfl".to_owned()])
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::target::ParameterSet;

pub mod request;
pub mod response;

/// Lifecycle filter for event listings.
///
/// The API has no single status parameter; each variant maps onto a pair of
/// `active`/`closed` flags. Leaving the filter out sends neither flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Status {
    Active,
    Closed,
}

impl Status {
    /// The `(active, closed)` flag values for this status.
    #[must_use]
    pub fn flags(self) -> (bool, bool) {
        match self {
            Status::Active => (true, false),
            Status::Closed => (false, true),
        }
    }

    /// Sets the `active` and `closed` parameters, replacing any already present.
    pub fn apply(self, params: &mut ParameterSet) {
        let (active, closed) = self.flags();
        let _ = params
            .set("active", active.to_string())
            .set("closed", closed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_sets_active_true_closed_false() {
        let mut params = ParameterSet::new();
        Status::Active.apply(&mut params);

        assert_eq!(params.encode(), "active=true&closed=false");
    }

    #[test]
    fn closed_sets_active_false_closed_true() {
        let mut params = ParameterSet::from([("active", "true")]);
        Status::Closed.apply(&mut params);

        assert_eq!(params.encode(), "active=false&closed=true");
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(Status::Active.to_string(), "ACTIVE");
        assert_eq!(Status::Closed.to_string(), "CLOSED");
        assert_eq!(
            serde_json::from_str::<Status>("\"CLOSED\"").expect("decodes"),
            Status::Closed
        );
    }
}
