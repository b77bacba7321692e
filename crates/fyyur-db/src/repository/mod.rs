//! Query and write paths over the booking schema.
//!
//! Every function takes the connection it runs on. Reads accept anything that
//! implements [`sea_orm::ConnectionTrait`], so they work on a pool or inside an
//! open transaction. Writes accept a [`sea_orm::TransactionTrait`] handle and
//! open exactly one transaction: it commits when the closure returns `Ok` and
//! rolls back otherwise, so a failed submission leaves nothing behind.

pub mod artists;
pub mod genres;
pub mod search;
pub mod shows;
pub mod submission;
pub mod venues;

pub use shows::{Partitioned, ShowListing, Timing};
pub use submission::{ArtistSubmission, VenueSubmission};
