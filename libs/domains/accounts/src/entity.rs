use crate::models::Role;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the accounts table
///
/// Roles are stored as a JSONB array of role names.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Account
impl From<Model> for crate::models::Account {
    fn from(model: Model) -> Self {
        let roles: Vec<Role> = model
            .roles
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| s.parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            password_hash: model.password_hash,
            roles: if roles.is_empty() {
                vec![Role::User]
            } else {
                roles
            },
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain Account to Sea-ORM ActiveModel
impl From<crate::models::Account> for ActiveModel {
    fn from(account: crate::models::Account) -> Self {
        let roles: Vec<serde_json::Value> = account
            .roles
            .iter()
            .map(|r| serde_json::Value::String(r.to_string()))
            .collect();

        ActiveModel {
            id: Set(account.id),
            email: Set(account.email),
            name: Set(account.name),
            password_hash: Set(account.password_hash),
            roles: Set(serde_json::Value::Array(roles)),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        }
    }
}

/// OpenAPI tag for account endpoints
pub const TAG: &str = "accounts";
