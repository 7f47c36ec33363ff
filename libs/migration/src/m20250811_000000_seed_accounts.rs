use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Seeded account ids; down() deletes exactly these rows
const ADMIN_ID: &str = "01989a7c-0000-7000-8000-000000000001";
const USER_ID: &str = "01989a7c-0000-7001-8000-000000000002";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Insert sample accounts (password for both: Str0ngPassw0rd!)
        manager
            .get_connection()
            .execute_unprepared(&format!(
                r#"
            INSERT INTO accounts (id, email, name, password_hash, roles, created_at, updated_at)
            VALUES
                (
                    '{ADMIN_ID}',
                    'admin@example.com',
                    'Admin Account',
                    '$argon2id$v=19$m=19456,t=2,p=1$VE0rHYzGbYjDhGgvhdzFPw$CJpleaNYKGFpc44EFOyWTE+fG2Z0A+6Ka2SlQQzroYA',
                    '["admin", "user"]'::JSONB,
                    NOW(),
                    NOW()
                ),
                (
                    '{USER_ID}',
                    'user@example.com',
                    'Regular Account',
                    '$argon2id$v=19$m=19456,t=2,p=1$VE0rHYzGbYjDhGgvhdzFPw$CJpleaNYKGFpc44EFOyWTE+fG2Z0A+6Ka2SlQQzroYA',
                    '["user"]'::JSONB,
                    NOW(),
                    NOW()
                )
            ON CONFLICT (id) DO NOTHING
            "#
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // id is a uuid column, so match the literal ids instead of a text pattern
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DELETE FROM accounts WHERE id IN ('{ADMIN_ID}', '{USER_ID}')"
            ))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_valid_uuids() {
        for id in [ADMIN_ID, USER_ID] {
            sea_orm::prelude::Uuid::parse_str(id).expect("seed id must be a valid uuid");
        }
    }
}
