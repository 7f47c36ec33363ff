use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of an event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventStatus {
    /// Event is a draft, not yet visible for enrollment
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Event has been published
    #[sea_orm(string_value = "published")]
    Published,
    /// Enrollment has started
    #[sea_orm(string_value = "began_enrollment")]
    BeganEnrollment,
}

/// Event entity - a schedulable event with enrollment windows and pricing
///
/// The `free` and `offline` flags are derived from the pricing and location
/// fields and are never accepted from clients directly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier
    pub id: Uuid,
    /// Event name
    pub name: String,
    /// Event description
    pub description: String,
    /// When enrollment opens
    pub begin_enrollment_at: DateTime<Utc>,
    /// When enrollment closes
    pub close_enrollment_at: DateTime<Utc>,
    /// When the event starts
    pub begin_event_at: DateTime<Utc>,
    /// When the event ends
    pub end_event_at: DateTime<Utc>,
    /// Venue; absent or blank means the event is held online
    pub location: Option<String>,
    /// Base enrollment price
    pub base_price: i32,
    /// Maximum price; 0 means uncapped (unlimited bidding)
    pub max_price: i32,
    /// Maximum number of enrollments
    pub limit_of_enrollment: i32,
    /// Derived: true when both prices are zero
    pub free: bool,
    /// Derived: true when a non-blank location is set
    pub offline: bool,
    /// Current lifecycle status
    pub status: EventStatus,
    /// Account that manages this event
    pub manager_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new event
///
/// Status and the derived flags are never settable by clients.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub begin_enrollment_at: DateTime<Utc>,
    pub close_enrollment_at: DateTime<Utc>,
    pub begin_event_at: DateTime<Utc>,
    pub end_event_at: DateTime<Utc>,
    pub location: Option<String>,
    #[validate(range(min = 0))]
    pub base_price: i32,
    #[validate(range(min = 0))]
    pub max_price: i32,
    #[validate(range(min = 0))]
    pub limit_of_enrollment: i32,
}

/// DTO for updating an existing event
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub begin_enrollment_at: Option<DateTime<Utc>>,
    pub close_enrollment_at: Option<DateTime<Utc>>,
    pub begin_event_at: Option<DateTime<Utc>>,
    pub end_event_at: Option<DateTime<Utc>>,
    /// Setting an empty or blank location marks the event as online
    pub location: Option<String>,
    #[validate(range(min = 0))]
    pub base_price: Option<i32>,
    #[validate(range(min = 0))]
    pub max_price: Option<i32>,
    #[validate(range(min = 0))]
    pub limit_of_enrollment: Option<i32>,
}

/// Query filters for listing events
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub manager_id: Option<Uuid>,
    pub free: Option<bool>,
    pub offline: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            status: None,
            manager_id: None,
            free: None,
            offline: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Event {
    /// Create a new event from CreateEvent DTO, owned by the given manager
    pub fn new(input: CreateEvent, manager_id: Uuid) -> Self {
        let now = Utc::now();
        let mut event = Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            begin_enrollment_at: input.begin_enrollment_at,
            close_enrollment_at: input.close_enrollment_at,
            begin_event_at: input.begin_event_at,
            end_event_at: input.end_event_at,
            location: input.location,
            base_price: input.base_price,
            max_price: input.max_price,
            limit_of_enrollment: input.limit_of_enrollment,
            free: false,
            offline: false,
            status: EventStatus::Draft,
            manager_id,
            created_at: now,
            updated_at: now,
        };
        event.refresh_derived_flags();
        event
    }

    /// Apply updates from UpdateEvent DTO and re-derive the status flags
    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(begin_enrollment_at) = update.begin_enrollment_at {
            self.begin_enrollment_at = begin_enrollment_at;
        }
        if let Some(close_enrollment_at) = update.close_enrollment_at {
            self.close_enrollment_at = close_enrollment_at;
        }
        if let Some(begin_event_at) = update.begin_event_at {
            self.begin_event_at = begin_event_at;
        }
        if let Some(end_event_at) = update.end_event_at {
            self.end_event_at = end_event_at;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(base_price) = update.base_price {
            self.base_price = base_price;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(limit_of_enrollment) = update.limit_of_enrollment {
            self.limit_of_enrollment = limit_of_enrollment;
        }
        self.refresh_derived_flags();
        self.updated_at = Utc::now();
    }

    /// Recompute the `free` and `offline` flags from pricing and location.
    ///
    /// An event is free only when both prices are zero; it is offline only
    /// when a non-blank location is set.
    pub fn refresh_derived_flags(&mut self) {
        self.free = self.base_price == 0 && self.max_price == 0;
        self.offline = self
            .location
            .as_deref()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_create() -> CreateEvent {
        CreateEvent {
            name: "rust meetup".to_string(),
            description: "monthly meetup".to_string(),
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

    #[test]
    fn test_new_event_starts_as_draft() {
        let event = Event::new(sample_create(), Uuid::now_v7());
        assert_eq!(event.status, EventStatus::Draft);
    }

    #[test]
    fn test_free_requires_both_prices_zero() {
        let mut input = sample_create();
        input.base_price = 0;
        input.max_price = 0;
        let event = Event::new(input, Uuid::now_v7());
        assert!(event.free);

        let mut input = sample_create();
        input.base_price = 0;
        input.max_price = 100;
        let event = Event::new(input, Uuid::now_v7());
        assert!(!event.free);

        let mut input = sample_create();
        input.base_price = 100;
        input.max_price = 0;
        let event = Event::new(input, Uuid::now_v7());
        assert!(!event.free);
    }

    #[test]
    fn test_offline_derived_from_location() {
        let event = Event::new(sample_create(), Uuid::now_v7());
        assert!(event.offline);

        let mut input = sample_create();
        input.location = None;
        let event = Event::new(input, Uuid::now_v7());
        assert!(!event.offline);

        let mut input = sample_create();
        input.location = Some("   ".to_string());
        let event = Event::new(input, Uuid::now_v7());
        assert!(!event.offline, "blank location means online");
    }

    #[test]
    fn test_apply_update_rederives_flags() {
        let mut event = Event::new(sample_create(), Uuid::now_v7());
        assert!(!event.free);

        event.apply_update(UpdateEvent {
            base_price: Some(0),
            max_price: Some(0),
            location: Some(String::new()),
            ..Default::default()
        });

        assert!(event.free);
        assert!(!event.offline);
    }

    #[test]
    fn test_apply_update_keeps_unset_fields() {
        let mut event = Event::new(sample_create(), Uuid::now_v7());
        let original_name = event.name.clone();

        event.apply_update(UpdateEvent {
            description: Some("updated".to_string()),
            ..Default::default()
        });

        assert_eq!(event.name, original_name);
        assert_eq!(event.description, "updated");
    }
}
