pub mod prelude;

pub mod affected_request;
pub mod donation_history;
pub mod donation_rating;
pub mod donator_on_the_way;
pub mod location_update;
