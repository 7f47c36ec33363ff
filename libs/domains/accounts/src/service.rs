use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AccountError, AccountResult};
use crate::models::{Account, AccountFilter, AccountResponse, CreateAccount, Role, UpdateAccount};
use crate::repository::AccountRepository;

/// Service layer for Account business logic
#[derive(Clone)]
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new account with password hashing
    pub async fn create_account(&self, input: CreateAccount) -> AccountResult<AccountResponse> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        self.validate_password(&input.password)?;

        if self.repository.email_exists(&input.email).await? {
            return Err(AccountError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let roles: Vec<Role> = input.roles.iter().filter_map(|r| r.parse().ok()).collect();

        let account = Account::new(input.email, input.name, password_hash, roles);

        let created = self.repository.create(account).await?;
        Ok(created.into())
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: Uuid) -> AccountResult<AccountResponse> {
        let account = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        Ok(account.into())
    }

    /// Get an account by email.
    ///
    /// The failure carries the email that was looked up.
    pub async fn get_account_by_email(&self, email: &str) -> AccountResult<AccountResponse> {
        let account = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| AccountError::EmailNotFound(email.to_string()))?;

        Ok(account.into())
    }

    /// List accounts with filters
    pub async fn list_accounts(&self, filter: AccountFilter) -> AccountResult<Vec<AccountResponse>> {
        let accounts = self.repository.list(filter).await?;
        Ok(accounts.into_iter().map(|a| a.into()).collect())
    }

    /// Update an account
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccount,
    ) -> AccountResult<AccountResponse> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let mut account = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let new_password_hash = if let Some(ref password) = input.password {
            self.validate_password(password)?;
            Some(self.hash_password(password)?)
        } else {
            None
        };

        // Check for duplicate email if email is being changed
        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&account.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(AccountError::DuplicateEmail(new_email.clone()));
            }
        }

        account.apply_update(input, new_password_hash);

        let updated = self.repository.update(account).await?;
        Ok(updated.into())
    }

    /// Delete an account
    pub async fn delete_account(&self, id: Uuid) -> AccountResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(AccountError::NotFound(id));
        }

        Ok(())
    }

    /// Verify account credentials (for login)
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AccountResult<AccountResponse> {
        let account = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.verify_password(password, &account.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account.into())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AccountResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn validate_password(&self, password: &str) -> AccountResult<()> {
        if password.len() < 8 {
            return Err(AccountError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(AccountError::Validation(
                "Password cannot exceed 128 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAccountRepository;

    fn service() -> AccountService<InMemoryAccountRepository> {
        AccountService::new(InMemoryAccountRepository::new())
    }

    fn sample_create(email: &str) -> CreateAccount {
        CreateAccount {
            email: email.to_string(),
            name: "Test Account".to_string(),
            password: "correct-horse-7".to_string(),
            roles: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_account_hashes_password() {
        let service = service();
        let created = service
            .create_account(sample_create("user@example.com"))
            .await
            .unwrap();

        assert_eq!(created.email, "user@example.com");
        assert_eq!(created.roles, vec!["user".to_string()]);
    }

    #[tokio::test]
    async fn test_create_account_rejects_duplicate_email() {
        let service = service();
        service
            .create_account(sample_create("user@example.com"))
            .await
            .unwrap();

        let result = service
            .create_account(sample_create("user@example.com"))
            .await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_account_rejects_short_password() {
        let service = service();
        let mut input = sample_create("user@example.com");
        input.password = "short".to_string();

        let result = service.create_account(input).await;
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_by_email_failure_names_the_email() {
        let service = service();

        let result = service.get_account_by_email("missing@example.com").await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing@example.com"));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let service = service();
        service
            .create_account(sample_create("user@example.com"))
            .await
            .unwrap();

        let verified = service
            .verify_credentials("user@example.com", "correct-horse-7")
            .await
            .unwrap();
        assert_eq!(verified.email, "user@example.com");

        let result = service
            .verify_credentials("user@example.com", "wrong-password")
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));

        let result = service
            .verify_credentials("other@example.com", "correct-horse-7")
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }
}
