use crate::models::EventStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the events table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub begin_enrollment_at: DateTimeWithTimeZone,
    pub close_enrollment_at: DateTimeWithTimeZone,
    pub begin_event_at: DateTimeWithTimeZone,
    pub end_event_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text", nullable)]
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub free: bool,
    pub offline: bool,
    pub status: EventStatus,
    pub manager_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Event
impl From<Model> for crate::models::Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            begin_enrollment_at: model.begin_enrollment_at.into(),
            close_enrollment_at: model.close_enrollment_at.into(),
            begin_event_at: model.begin_event_at.into(),
            end_event_at: model.end_event_at.into(),
            location: model.location,
            base_price: model.base_price,
            max_price: model.max_price,
            limit_of_enrollment: model.limit_of_enrollment,
            free: model.free,
            offline: model.offline,
            status: model.status,
            manager_id: model.manager_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain Event to Sea-ORM ActiveModel
impl From<crate::models::Event> for ActiveModel {
    fn from(event: crate::models::Event) -> Self {
        ActiveModel {
            id: Set(event.id),
            name: Set(event.name),
            description: Set(event.description),
            begin_enrollment_at: Set(event.begin_enrollment_at.into()),
            close_enrollment_at: Set(event.close_enrollment_at.into()),
            begin_event_at: Set(event.begin_event_at.into()),
            end_event_at: Set(event.end_event_at.into()),
            location: Set(event.location),
            base_price: Set(event.base_price),
            max_price: Set(event.max_price),
            limit_of_enrollment: Set(event.limit_of_enrollment),
            free: Set(event.free),
            offline: Set(event.offline),
            status: Set(event.status),
            manager_id: Set(event.manager_id),
            created_at: Set(event.created_at.into()),
            updated_at: Set(event.updated_at.into()),
        }
    }
}

/// OpenAPI tag for event endpoints
pub const TAG: &str = "events";
