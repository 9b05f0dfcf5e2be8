use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// A donation was recently received for this phone number; the same
    /// phone may not request again before `next_allowed_at`.
    #[error(
        "A donation was recently received for this phone number; \
         next request allowed in {remaining_seconds} second(s)"
    )]
    CooldownActive {
        remaining_seconds: i64,
        next_allowed_at: NaiveDateTime,
    },
    #[error("This request has already received a donation")]
    AlreadyFulfilled,
    #[error("A rating already exists for donation history {0}")]
    DuplicateRating(i32),
}
