//! Error types for the relief coordination core.
//!
//! Domain errors are split by category (validation, not-found, conflict,
//! authorization) and aggregated into [`Error`] via `thiserror`'s `#[from]`
//! so service code can use `?` freely. Store failures surface as
//! [`sea_orm::DbErr`]; multi-step operations roll back in full before the
//! error reaches the caller, which owns any retry policy.

pub mod authorization;
pub mod conflict;
pub mod not_found;
pub mod validation;

use thiserror::Error;

pub use authorization::AuthorizationError;
pub use conflict::ConflictError;
pub use not_found::NotFoundError;
pub use validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-range input; rejected with no state change.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unknown id or code; no state change.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Operation contradicts current state (duplicate rating, fulfilled
    /// request, active cool-down); no state change.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// Caller is not permitted to act on the entity.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// Underlying store failure (query, connection, constraint).
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}
