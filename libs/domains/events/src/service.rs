use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventFilter, EventStatus, UpdateEvent};
use crate::repository::EventRepository;

/// Service layer for Event business logic
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

/// Check the price rule: the base price must not exceed the max price,
/// except when the max price is 0, which means the price is uncapped.
fn validate_prices(base_price: i32, max_price: i32) -> EventResult<()> {
    if base_price > max_price && max_price != 0 {
        return Err(EventError::InvalidPrices);
    }
    Ok(())
}

/// Check the schedule rule: the event must end after enrollment opens,
/// enrollment closes, and the event starts.
fn validate_schedule(
    begin_enrollment_at: DateTime<Utc>,
    close_enrollment_at: DateTime<Utc>,
    begin_event_at: DateTime<Utc>,
    end_event_at: DateTime<Utc>,
) -> EventResult<()> {
    if end_event_at < begin_event_at
        || end_event_at < close_enrollment_at
        || end_event_at < begin_enrollment_at
    {
        return Err(EventError::InvalidSchedule);
    }
    Ok(())
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new event with field and cross-field validation
    pub async fn create_event(&self, input: CreateEvent, manager_id: Uuid) -> EventResult<Event> {
        // Validate input fields
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        // Cross-field business rules
        validate_prices(input.base_price, input.max_price)?;
        validate_schedule(
            input.begin_enrollment_at,
            input.close_enrollment_at,
            input.begin_event_at,
            input.end_event_at,
        )?;

        self.repository.create(input, manager_id).await
    }

    /// Get an event by ID
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// List events with filters
    pub async fn list_events(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        self.repository.list(filter).await
    }

    /// Update an event; only its manager may modify it.
    ///
    /// The business rules are checked against the final state of the event,
    /// so a partial update cannot sneak in an invalid price or schedule.
    pub async fn update_event(
        &self,
        id: Uuid,
        manager_id: Uuid,
        input: UpdateEvent,
    ) -> EventResult<Event> {
        // Validate input fields
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let event = self.get_event(id).await?;
        if event.manager_id != manager_id {
            return Err(EventError::Forbidden(id));
        }

        // Check business rules against the merged state
        let mut merged = event;
        merged.apply_update(input.clone());
        validate_prices(merged.base_price, merged.max_price)?;
        validate_schedule(
            merged.begin_enrollment_at,
            merged.close_enrollment_at,
            merged.begin_event_at,
            merged.end_event_at,
        )?;

        self.repository.update(id, input).await
    }

    /// Delete an event; allowed for its manager or an admin.
    pub async fn delete_event(&self, id: Uuid, manager_id: Uuid, is_admin: bool) -> EventResult<()> {
        let event = self.get_event(id).await?;

        if event.manager_id != manager_id && !is_admin {
            return Err(EventError::Forbidden(id));
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(EventError::NotFound(id));
        }

        Ok(())
    }

    /// Publish a draft event; only its manager may publish it.
    pub async fn publish_event(&self, id: Uuid, manager_id: Uuid) -> EventResult<Event> {
        let event = self.get_event(id).await?;

        if event.manager_id != manager_id {
            return Err(EventError::Forbidden(id));
        }

        match event.status {
            EventStatus::Published => Ok(event),
            EventStatus::Draft => {
                self.repository
                    .set_status(id, EventStatus::Published)
                    .await
            }
            EventStatus::BeganEnrollment => Err(EventError::Validation(
                "Cannot publish an event whose enrollment has begun".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryEventRepository;
    use chrono::TimeZone;

    fn sample_create() -> CreateEvent {
        CreateEvent {
            name: "rust meetup".to_string(),
            description: String::new(),
            begin_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            close_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap(),
            begin_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
            end_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap(),
            location: Some("Community Hall".to_string()),
            base_price: 100,
            max_price: 200,
            limit_of_enrollment: 50,
        }
    }

    fn service() -> EventService<InMemoryEventRepository> {
        EventService::new(InMemoryEventRepository::new())
    }

    #[test]
    fn test_price_rule_rejects_base_over_max() {
        assert!(matches!(
            validate_prices(1000, 200),
            Err(EventError::InvalidPrices)
        ));
    }

    #[test]
    fn test_price_rule_allows_uncapped_max() {
        // max_price of 0 means uncapped, so any base price is fine
        assert!(validate_prices(1000, 0).is_ok());
    }

    #[test]
    fn test_price_rule_allows_equal_prices() {
        assert!(validate_prices(200, 200).is_ok());
    }

    #[test]
    fn test_schedule_rule_rejects_end_before_start() {
        let begin_enrollment = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let close_enrollment = Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap();
        let begin_event = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let end_event = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();

        assert!(matches!(
            validate_schedule(begin_enrollment, close_enrollment, begin_event, end_event),
            Err(EventError::InvalidSchedule)
        ));
    }

    #[test]
    fn test_schedule_rule_rejects_end_before_enrollment_close() {
        let begin_enrollment = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let close_enrollment = Utc.with_ymd_and_hms(2025, 1, 20, 18, 0, 0).unwrap();
        let begin_event = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let end_event = Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap();

        assert!(matches!(
            validate_schedule(begin_enrollment, close_enrollment, begin_event, end_event),
            Err(EventError::InvalidSchedule)
        ));
    }

    #[tokio::test]
    async fn test_create_event_rejects_invalid_prices() {
        let service = service();
        let mut input = sample_create();
        input.base_price = 1000;
        input.max_price = 200;

        let result = service.create_event(input, Uuid::now_v7()).await;
        assert!(matches!(result, Err(EventError::InvalidPrices)));
    }

    #[tokio::test]
    async fn test_create_event_derives_flags() {
        let service = service();
        let mut input = sample_create();
        input.base_price = 0;
        input.max_price = 0;
        input.location = None;

        let event = service.create_event(input, Uuid::now_v7()).await.unwrap();
        assert!(event.free);
        assert!(!event.offline);
        assert_eq!(event.status, EventStatus::Draft);
    }

    #[tokio::test]
    async fn test_update_event_forbidden_for_non_manager() {
        let service = service();
        let manager_id = Uuid::now_v7();
        let event = service
            .create_event(sample_create(), manager_id)
            .await
            .unwrap();

        let result = service
            .update_event(event.id, Uuid::now_v7(), UpdateEvent::default())
            .await;
        assert!(matches!(result, Err(EventError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_event_checks_rules_on_merged_state() {
        let service = service();
        let manager_id = Uuid::now_v7();
        let event = service
            .create_event(sample_create(), manager_id)
            .await
            .unwrap();

        // Raising base_price above the existing max_price must be rejected
        let result = service
            .update_event(
                event.id,
                manager_id,
                UpdateEvent {
                    base_price: Some(500),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(EventError::InvalidPrices)));
    }

    #[tokio::test]
    async fn test_delete_event_allowed_for_admin() {
        let service = service();
        let manager_id = Uuid::now_v7();
        let event = service
            .create_event(sample_create(), manager_id)
            .await
            .unwrap();

        let admin_id = Uuid::now_v7();
        service.delete_event(event.id, admin_id, true).await.unwrap();

        let result = service.get_event(event.id).await;
        assert!(matches!(result, Err(EventError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_event_forbidden_for_other_account() {
        let service = service();
        let event = service
            .create_event(sample_create(), Uuid::now_v7())
            .await
            .unwrap();

        let result = service.delete_event(event.id, Uuid::now_v7(), false).await;
        assert!(matches!(result, Err(EventError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_publish_event() {
        let service = service();
        let manager_id = Uuid::now_v7();
        let event = service
            .create_event(sample_create(), manager_id)
            .await
            .unwrap();

        let published = service.publish_event(event.id, manager_id).await.unwrap();
        assert_eq!(published.status, EventStatus::Published);

        // Publishing again is a no-op
        let again = service.publish_event(event.id, manager_id).await.unwrap();
        assert_eq!(again.status, EventStatus::Published);
    }
}
