//! Feed Pipeline
//!
//! ```text
//! request ──► ApproachFeed::load ──hit──► cached Arc<ApproachTable>
//!                   │
//!                  miss
//!                   ▼
//!         ApproachSource::fetch ──► transform ──► cache ──► FeedView
//! ```
//!
//! Runs are request-driven; nothing polls in the background.

mod feed;
mod view;

pub use feed::ApproachFeed;
pub use view::FeedView;
