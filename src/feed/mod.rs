//! Close-Approach Feed
//!
//! ```text
//! CNEOS cad.api ──fetch──► RawApproachPayload ──transform──► ApproachTable
//!   (HTTP, JSON)            (fields + rows)                   (sorted by datetime)
//! ```
//!
//! The client and the transformer are independent: the transformer is a pure
//! function over a payload, so it is tested without the network.

mod client;
pub mod conversions;
mod error;
mod transform;

pub use client::{parse_payload, ApproachSource, FeedClient, FeedQuery};
pub use error::{FeedError, TransformError};
pub use transform::{parse_date_str, transform, DISPLAY_DATE_FORMAT};
