use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Account roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Account entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    /// Unique identifier
    pub id: Uuid,
    /// Account email (unique)
    pub email: String,
    /// Display name
    pub name: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account roles
    pub roles: Vec<Role>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Account response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            roles: account.roles.iter().map(|r| r.to_string()).collect(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// DTO for creating a new account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccount {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// DTO for updating an existing account
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccount {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// Query filters for listing accounts
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct AccountFilter {
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// DTO for account login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
}

/// DTO for account registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Response after successful login/register
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub account: AccountResponse,
}

impl Account {
    /// Create a new account (password must already be hashed)
    pub fn new(email: String, name: String, password_hash: String, roles: Vec<Role>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            // Stored lowercased; uniqueness is case-insensitive
            email: email.to_lowercase(),
            name,
            password_hash,
            roles: if roles.is_empty() {
                vec![Role::User]
            } else {
                roles
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates (password must already be hashed if provided)
    pub fn apply_update(&mut self, update: UpdateAccount, new_password_hash: Option<String>) {
        if let Some(email) = update.email {
            self.email = email.to_lowercase();
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        if let Some(roles) = update.roles {
            self.roles = roles.iter().filter_map(|r| r.parse().ok()).collect();
            if self.roles.is_empty() {
                self.roles = vec![Role::User];
            }
        }
        self.updated_at = Utc::now();
    }

    /// Whether the account carries the given role.
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults_to_user_role() {
        let account = Account::new(
            "user@example.com".to_string(),
            "User".to_string(),
            "hash".to_string(),
            vec![],
        );
        assert_eq!(account.roles, vec![Role::User]);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account::new(
            "user@example.com".to_string(),
            "User".to_string(),
            "secret-hash".to_string(),
            vec![],
        );
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_apply_update_falls_back_to_user_role() {
        let mut account = Account::new(
            "user@example.com".to_string(),
            "User".to_string(),
            "hash".to_string(),
            vec![Role::Admin],
        );

        account.apply_update(
            UpdateAccount {
                roles: Some(vec!["bogus".to_string()]),
                ..Default::default()
            },
            None,
        );

        assert_eq!(account.roles, vec![Role::User]);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!("superuser".parse::<Role>().is_err());
    }
}
