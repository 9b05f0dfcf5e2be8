pub use super::affected_request::Entity as AffectedRequest;
pub use super::donation_history::Entity as DonationHistory;
pub use super::donation_rating::Entity as DonationRating;
pub use super::donator_on_the_way::Entity as DonatorOnTheWay;
pub use super::location_update::Entity as LocationUpdate;
