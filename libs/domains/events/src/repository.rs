use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventFilter, EventStatus, UpdateEvent};

/// Repository trait for Event persistence
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Create a new event owned by the given manager
    async fn create(&self, input: CreateEvent, manager_id: Uuid) -> EventResult<Event>;

    /// Get an event by ID
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// List events with optional filters
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>>;

    /// Update an existing event
    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event>;

    /// Change the lifecycle status of an event
    async fn set_status(&self, id: Uuid, status: EventStatus) -> EventResult<Event>;

    /// Delete an event by ID
    async fn delete(&self, id: Uuid) -> EventResult<bool>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: CreateEvent, manager_id: Uuid) -> EventResult<Event> {
        let mut events = self.events.write().await;

        let event = Event::new(input, manager_id);
        events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;

        let mut result: Vec<Event> = events
            .values()
            .filter(|e| {
                if let Some(status) = filter.status {
                    if e.status != status {
                        return false;
                    }
                }
                if let Some(manager_id) = filter.manager_id {
                    if e.manager_id != manager_id {
                        return false;
                    }
                }
                if let Some(free) = filter.free {
                    if e.free != free {
                        return false;
                    }
                }
                if let Some(offline) = filter.offline {
                    if e.offline != offline {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Apply pagination
        let result: Vec<Event> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        let mut events = self.events.write().await;

        let event = events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        event.apply_update(input);
        let updated = event.clone();

        tracing::info!(event_id = %id, "Updated event");
        Ok(updated)
    }

    async fn set_status(&self, id: Uuid, status: EventStatus) -> EventResult<Event> {
        let mut events = self.events.write().await;

        let event = events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        event.status = status;
        event.updated_at = chrono::Utc::now();
        let updated = event.clone();

        tracing::info!(event_id = %id, status = %status, "Changed event status");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let mut events = self.events.write().await;

        if events.remove(&id).is_some() {
            tracing::info!(event_id = %id, "Deleted event");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_create() -> CreateEvent {
        CreateEvent {
            name: "rust meetup".to_string(),
            description: String::new(),
            begin_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            close_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap(),
            begin_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
            end_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap(),
            location: None,
            base_price: 0,
            max_price: 0,
            limit_of_enrollment: 10,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let repo = InMemoryEventRepository::new();
        let manager_id = Uuid::now_v7();

        let event = repo.create(sample_create(), manager_id).await.unwrap();
        assert_eq!(event.name, "rust meetup");
        assert_eq!(event.manager_id, manager_id);
        assert!(event.free);

        let fetched = repo.get_by_id(event.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, event.id);
    }

    #[tokio::test]
    async fn test_update_missing_event_is_not_found() {
        let repo = InMemoryEventRepository::new();

        let result = repo.update(Uuid::now_v7(), UpdateEvent::default()).await;
        assert!(matches!(result, Err(EventError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = InMemoryEventRepository::new();
        let manager_id = Uuid::now_v7();

        let draft = repo.create(sample_create(), manager_id).await.unwrap();
        let published = repo.create(sample_create(), manager_id).await.unwrap();
        repo.set_status(published.id, EventStatus::Published)
            .await
            .unwrap();

        let filter = EventFilter {
            status: Some(EventStatus::Published),
            ..Default::default()
        };
        let result = repo.list(filter).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, published.id);
        assert_ne!(result[0].id, draft.id);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let repo = InMemoryEventRepository::new();

        let event = repo.create(sample_create(), Uuid::now_v7()).await.unwrap();
        assert!(repo.delete(event.id).await.unwrap());
        assert!(!repo.delete(event.id).await.unwrap());
        assert!(repo.get_by_id(event.id).await.unwrap().is_none());
    }
}
