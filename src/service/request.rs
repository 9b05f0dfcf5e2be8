use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{AffectedRequestRepository, TrackingRepository},
    error::{AuthorizationError, ConflictError, Error, NotFoundError, ValidationError},
    model::{request::NewRequest, request::RequestView, supply::SupplyNeeds},
    util::validate::{validate_coordinates, validate_phone},
};

/// Requests unseen for longer than this drop off the active map.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

const QR_TOKEN_LEN: usize = 12;

pub struct RequestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequestService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Accepts a relief request from an anonymous session.
    ///
    /// # Behavior
    /// - Validates the payload (required fields, PH phone format,
    ///   coordinate ranges, supply-needs shape) before touching the
    ///   database.
    /// - If a fulfilled request for the same phone number is still inside
    ///   its cool-down, the submission is rejected with the remaining
    ///   wait time.
    /// - If the session already has an active request, that row is
    ///   rewritten in place and keeps its QR code; otherwise a new row is
    ///   created with a fresh `LOC-` token. A session therefore never
    ///   accumulates more than one active request.
    pub async fn submit(&self, input: NewRequest) -> Result<RequestView, Error> {
        if input.session_id.trim().is_empty() {
            return Err(ValidationError::MissingField("session_id").into());
        }
        if input.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField("first_name").into());
        }
        if input.last_name.trim().is_empty() {
            return Err(ValidationError::MissingField("last_name").into());
        }
        if input.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone").into());
        }

        validate_phone(&input.phone)?;
        validate_coordinates(input.latitude, input.longitude)?;
        let needs = SupplyNeeds::parse(&input.supply_needs)?;

        let now = Utc::now().naive_utc();

        let request_repo = AffectedRequestRepository::new(self.db);
        if let Some(blocking) = request_repo
            .find_cooldown_by_phone(&input.phone, now)
            .await?
        {
            // The filter only matches rows with a deadline set.
            if let Some(next_allowed_at) = blocking.next_request_allowed_at {
                return Err(ConflictError::CooldownActive {
                    remaining_seconds: cooldown_remaining_seconds(next_allowed_at, now),
                    next_allowed_at,
                }
                .into());
            }
        }

        let txn = self.db.begin().await?;
        let txn_repo = AffectedRequestRepository::new(&txn);

        let model = match txn_repo.find_active_by_session(&input.session_id).await? {
            Some(existing) => {
                let updated = txn_repo
                    .update_submission(existing, &input, needs.to_json(), now)
                    .await?;
                tracing::info!("Refreshed relief request {}", updated.id);

                updated
            }
            None => {
                let created = txn_repo
                    .create(&input, needs.to_json(), generate_qr_code(), now)
                    .await?;
                tracing::info!("Created relief request {}", created.id);

                created
            }
        };

        txn.commit().await?;

        let en_route = TrackingRepository::new(self.db)
            .list_en_route(vec![model.id])
            .await?;

        Ok(RequestView::from_model(model, en_route))
    }

    pub async fn get(&self, request_id: i32) -> Result<RequestView, Error> {
        let model = AffectedRequestRepository::new(self.db)
            .find_by_id(request_id)
            .await?
            .ok_or(NotFoundError::Request(request_id))?;

        let en_route = TrackingRepository::new(self.db)
            .list_en_route(vec![model.id])
            .await?;

        Ok(RequestView::from_model(model, en_route))
    }

    /// Active, unfulfilled requests seen inside the freshness window,
    /// freshest first, each carrying its en-route donators.
    pub async fn list_active(&self) -> Result<Vec<RequestView>, Error> {
        let cutoff = Utc::now().naive_utc() - Duration::hours(FRESHNESS_WINDOW_HOURS);
        let models = AffectedRequestRepository::new(self.db)
            .list_active_since(cutoff)
            .await?;

        let request_ids: Vec<i32> = models.iter().map(|model| model.id).collect();
        let mut en_route_by_request: HashMap<i32, Vec<_>> = HashMap::new();
        for record in TrackingRepository::new(self.db)
            .list_en_route(request_ids)
            .await?
        {
            en_route_by_request
                .entry(record.request_id)
                .or_default()
                .push(record);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let en_route = en_route_by_request.remove(&model.id).unwrap_or_default();
                RequestView::from_model(model, en_route)
            })
            .collect())
    }

    /// Withdraws a request. Only the owning session may do this; the row
    /// and its tracking records are removed.
    pub async fn deactivate(&self, request_id: i32, session_id: &str) -> Result<(), Error> {
        let request_repo = AffectedRequestRepository::new(self.db);
        let model = request_repo
            .find_by_id(request_id)
            .await?
            .ok_or(NotFoundError::Request(request_id))?;

        if model.session_id != session_id {
            return Err(AuthorizationError::NotRequestOwner(request_id).into());
        }

        request_repo.delete(request_id).await?;
        tracing::info!("Withdrew relief request {}", request_id);

        Ok(())
    }
}

/// Whole seconds left on an active cool-down, never less than one: a
/// rejection always carries a positive wait even when the deadline is
/// under a second away.
fn cooldown_remaining_seconds(next_allowed_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (next_allowed_at - now).num_seconds().max(1)
}

fn generate_qr_code() -> String {
    const HEX: &[u8] = b"0123456789ABCDEF";

    let mut rng = rand::rng();
    let token: String = (0..QR_TOKEN_LEN)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect();

    format!("LOC-{token}")
}
