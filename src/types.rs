//! Re-exported types from external crates for convenience.
//!
//! These types appear in request filters and response records, and are
//! re-exported here so users don't need to add these dependencies to their
//! `Cargo.toml`.

/// Date and time types for date filters and record timestamps.
pub use chrono::{DateTime, NaiveDate, Utc};
/// Arbitrary precision decimal type for liquidity, volume and price fields.
pub use rust_decimal::Decimal;
/// Macro for creating [`Decimal`] literals at compile time.
///
/// # Example
/// ```
/// use polymarket_gamma_client::types::dec;
/// let volume = dec!(1250.5);
/// ```
pub use rust_decimal_macros::dec;
