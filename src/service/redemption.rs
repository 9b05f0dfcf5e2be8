use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    broadcast::ChannelRegistry,
    data::{AffectedRequestRepository, DonationHistoryRepository, TrackingRepository},
    error::{ConflictError, Error, NotFoundError},
    model::{
        event::{Channel, Event, QrScanNotification},
        history::HistoryView,
        Donator,
    },
};

/// How long a phone number is barred from requesting again after a
/// donation is received.
pub const COOLDOWN_HOURS: i64 = 3;

pub struct RedemptionService<'a> {
    db: &'a DatabaseConnection,
    channels: &'a ChannelRegistry,
}

impl<'a> RedemptionService<'a> {
    pub fn new(db: &'a DatabaseConnection, channels: &'a ChannelRegistry) -> Self {
        Self { db, channels }
    }

    /// Redeems a QR code in the donator's hands.
    ///
    /// # Behavior
    /// - Exactly one redemption can succeed per request: the fulfilment
    ///   update is guarded on the request still being active and
    ///   unfulfilled, so a concurrent scan of the same code loses and
    ///   gets a conflict.
    /// - Fulfilment, the ledger snapshot, the cool-down deadline, and
    ///   the donator's arrival flag all commit in one transaction.
    /// - After commit, the requester's session is notified on the
    ///   locations channel so their client can show the confirmation
    ///   screen.
    pub async fn redeem(&self, qr_code: &str, donator: &Donator) -> Result<HistoryView, Error> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        let request = AffectedRequestRepository::new(&txn)
            .find_by_qr_locked(qr_code)
            .await?
            .ok_or_else(|| NotFoundError::QrCode(qr_code.to_string()))?;

        if request.donation_received {
            return Err(ConflictError::AlreadyFulfilled.into());
        }
        // Withdrawn but somehow undeleted rows read as expired codes.
        if !request.is_active {
            return Err(NotFoundError::QrCode(qr_code.to_string()).into());
        }

        let changed = AffectedRequestRepository::new(&txn)
            .mark_fulfilled(
                request.id,
                donator.id,
                &donator.display_name(),
                now,
                now + Duration::hours(COOLDOWN_HOURS),
            )
            .await?;
        if changed == 0 {
            return Err(ConflictError::AlreadyFulfilled.into());
        }

        let entry = DonationHistoryRepository::new(&txn)
            .insert_snapshot(&request, donator, now)
            .await?;

        let tracking_repo = TrackingRepository::new(&txn);
        if let Some(pair) = tracking_repo.find_pair(request.id, donator.id).await? {
            tracking_repo.mark_arrived(pair).await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Donator {} redeemed QR code for request {}",
            donator.id,
            request.id
        );
        self.channels.publish(
            Channel::Locations,
            Event::QrScanNotification(QrScanNotification {
                session_id: request.session_id.clone(),
                donation_history_id: entry.id,
                donator_name: entry.donator_name.clone(),
                donator_email: entry.donator_email.clone(),
                supply_needs_fulfilled: entry.supply_needs_fulfilled.clone(),
                qr_code: entry.qr_code.clone(),
                donated_at: entry.donated_at,
            }),
        );

        Ok(HistoryView::from_model(entry))
    }
}
