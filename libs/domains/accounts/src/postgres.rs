use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{AccountError, AccountResult},
    models::{Account, AccountFilter},
    repository::AccountRepository,
};

#[derive(Clone)]
pub struct PgAccountRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<entity::Model>> {
        entity::Entity::find()
            .filter(entity::Column::Email.eq(email.to_lowercase()))
            .one(self.base.db())
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: Account) -> AccountResult<Account> {
        if self.email_exists(&account.email).await? {
            return Err(AccountError::DuplicateEmail(account.email));
        }

        let active_model: entity::ActiveModel = account.into();
        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(account_id = %model.id, "Created account");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<Account>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let model = self.find_by_email(email).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn list(&self, filter: AccountFilter) -> AccountResult<Vec<Account>> {
        let mut query = entity::Entity::find();

        if let Some(email) = filter.email {
            query = query.filter(entity::Column::Email.eq(email.to_lowercase()));
        }

        query = query
            .order_by_desc(entity::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        let accounts: Vec<Account> = models.into_iter().map(|m| m.into()).collect();

        // Role filtering happens after the fetch; roles live in a JSONB column
        if let Some(role) = filter.role {
            Ok(accounts
                .into_iter()
                .filter(|a| a.roles.iter().any(|r| r.to_string() == role))
                .collect())
        } else {
            Ok(accounts)
        }
    }

    async fn update(&self, account: Account) -> AccountResult<Account> {
        let id = account.id;
        let active_model: entity::ActiveModel = account.into();

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(account_id = %id, "Updated account");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: Uuid) -> AccountResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(account_id = %id, "Deleted account");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
