use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The presented session token does not own the request it tries to
    /// act on. Identity itself is the auth collaborator's concern; only
    /// ownership is enforced here.
    #[error("Session token does not own affected request {0}")]
    NotRequestOwner(i32),
}
