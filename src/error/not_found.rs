use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Affected request {0} not found")]
    Request(i32),
    #[error("Invalid or expired QR code {0:?}")]
    QrCode(String),
    #[error("No tracking record found for request {request_id} and donator {donator_id}")]
    TrackingPair { request_id: i32, donator_id: i64 },
    #[error("No active tracking found for request {request_id} and donator {donator_id}")]
    NoActiveTracking { request_id: i32, donator_id: i64 },
    #[error("Donation history {0} not found")]
    DonationHistory(i32),
}
