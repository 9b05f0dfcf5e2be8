//! Repositories over the relief schema. Each is a thin sea-orm wrapper,
//! generic over the connection so services can run them against a live
//! connection or inside a transaction.

pub mod history;
pub mod rating;
pub mod request;
pub mod tracking;

pub use history::DonationHistoryRepository;
pub use rating::DonationRatingRepository;
pub use request::AffectedRequestRepository;
pub use tracking::TrackingRepository;
