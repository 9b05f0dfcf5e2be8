//! Business operations over the relief schema. Services own validation,
//! transaction boundaries, and broadcast fan-out; row access goes through
//! the repositories in [`crate::data`].

pub mod history;
pub mod rating;
pub mod redemption;
pub mod request;
pub mod tracking;

pub use history::HistoryService;
pub use rating::RatingService;
pub use redemption::RedemptionService;
pub use request::RequestService;
pub use tracking::TrackingService;
