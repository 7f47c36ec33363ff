use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::{Account, AccountFilter};

/// Repository trait for Account persistence
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create a new account
    async fn create(&self, account: Account) -> AccountResult<Account>;

    /// Get an account by ID
    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<Account>>;

    /// Get an account by email (case-insensitive)
    async fn get_by_email(&self, email: &str) -> AccountResult<Option<Account>>;

    /// Check whether an account with the given email exists
    async fn email_exists(&self, email: &str) -> AccountResult<bool>;

    /// List accounts with optional filters
    async fn list(&self, filter: AccountFilter) -> AccountResult<Vec<Account>>;

    /// Update an existing account
    async fn update(&self, account: Account) -> AccountResult<Account>;

    /// Delete an account by ID
    async fn delete(&self, id: Uuid) -> AccountResult<bool>;
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> AccountResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AccountError::DuplicateEmail(account.email));
        }

        accounts.insert(account.id, account.clone());

        tracing::info!(account_id = %account.id, "Created account");
        Ok(account)
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(email)))
    }

    async fn list(&self, filter: AccountFilter) -> AccountResult<Vec<Account>> {
        let accounts = self.accounts.read().await;

        let mut result: Vec<Account> = accounts
            .values()
            .filter(|a| {
                if let Some(ref email) = filter.email {
                    if !a.email.eq_ignore_ascii_case(email) {
                        return false;
                    }
                }
                if let Some(ref role) = filter.role {
                    if !a.roles.iter().any(|r| r.to_string() == *role) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let result: Vec<Account> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, account: Account) -> AccountResult<Account> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id));
        }

        accounts.insert(account.id, account.clone());

        tracing::info!(account_id = %account.id, "Updated account");
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> AccountResult<bool> {
        let mut accounts = self.accounts.write().await;

        if accounts.remove(&id).is_some() {
            tracing::info!(account_id = %id, "Deleted account");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_account(email: &str) -> Account {
        Account::new(
            email.to_string(),
            "Test Account".to_string(),
            "hash".to_string(),
            vec![Role::User],
        )
    }

    #[tokio::test]
    async fn test_create_and_get_account() {
        let repo = InMemoryAccountRepository::new();

        let account = repo.create(sample_account("user@example.com")).await.unwrap();

        let by_id = repo.get_by_id(account.id).await.unwrap();
        assert!(by_id.is_some());

        let by_email = repo.get_by_email("USER@EXAMPLE.COM").await.unwrap();
        assert!(by_email.is_some());
        assert_eq!(by_email.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create(sample_account("user@example.com")).await.unwrap();

        let result = repo.create(sample_account("User@Example.com")).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_role() {
        let repo = InMemoryAccountRepository::new();
        repo.create(sample_account("user@example.com")).await.unwrap();
        let admin = Account::new(
            "admin@example.com".to_string(),
            "Admin".to_string(),
            "hash".to_string(),
            vec![Role::Admin],
        );
        repo.create(admin).await.unwrap();

        let filter = AccountFilter {
            role: Some("admin".to_string()),
            limit: 50,
            ..Default::default()
        };
        let result = repo.list(filter).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_delete_account() {
        let repo = InMemoryAccountRepository::new();
        let account = repo.create(sample_account("user@example.com")).await.unwrap();

        assert!(repo.delete(account.id).await.unwrap());
        assert!(!repo.delete(account.id).await.unwrap());
    }
}
