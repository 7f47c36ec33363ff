use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{EventError, EventResult},
    models::{CreateEvent, Event, EventFilter, EventStatus, UpdateEvent},
    repository::EventRepository,
};

pub struct PgEventRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: CreateEvent, manager_id: Uuid) -> EventResult<Event> {
        let event = Event::new(input, manager_id);
        let active_model: entity::ActiveModel = event.into();

        // Insert using base repository
        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(event_id = %model.id, "Created event");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let mut query = entity::Entity::find();

        // Apply filters
        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        if let Some(manager_id) = filter.manager_id {
            query = query.filter(entity::Column::ManagerId.eq(manager_id));
        }

        if let Some(free) = filter.free {
            query = query.filter(entity::Column::Free.eq(free));
        }

        if let Some(offline) = filter.offline {
            query = query.filter(entity::Column::Offline.eq(offline));
        }

        // Apply pagination and ordering
        query = query
            .order_by_desc(entity::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        // Fetch existing event
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?
            .ok_or(EventError::NotFound(id))?;

        // Convert to domain model and apply updates (re-derives flags)
        let mut event: Event = model.into();
        event.apply_update(input);

        let active_model: entity::ActiveModel = event.into();

        // Update using base repository
        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(event_id = %id, "Updated event");
        Ok(updated_model.into())
    }

    async fn set_status(&self, id: Uuid, status: EventStatus) -> EventResult<Event> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?
            .ok_or(EventError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = sea_orm::IntoActiveModel::into_active_model(model);
        active_model.status = Set(status);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(event_id = %id, status = %status, "Changed event status");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| EventError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
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
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sample_model(id: Uuid) -> entity::Model {
        entity::Model {
            id,
            name: "rust meetup".to_string(),
            description: String::new(),
            begin_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap().into(),
            close_enrollment_at: Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap().into(),
            begin_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap().into(),
            end_event_at: Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap().into(),
            location: None,
            base_price: 0,
            max_price: 0,
            limit_of_enrollment: 10,
            free: true,
            offline: false,
            status: EventStatus::Draft,
            manager_id: Uuid::now_v7(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_model(id)]])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let event = repo.get_by_id(id).await.unwrap();
        assert!(event.is_some());
        let event = event.unwrap();
        assert_eq!(event.id, id);
        assert!(event.free);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgEventRepository::new(db);

        let event = repo.get_by_id(Uuid::now_v7()).await.unwrap();
        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgEventRepository::new(db);

        assert!(repo.delete(Uuid::now_v7()).await.unwrap());
        assert!(!repo.delete(Uuid::now_v7()).await.unwrap());
    }
}
