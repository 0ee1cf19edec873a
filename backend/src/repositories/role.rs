//! Role repository
//!
//! Roles are static reference data: seeded once at startup, referenced
//! by user records, never mutated afterwards.

use anyhow::Result;
use sqlx::PgPool;
use user_portal_shared::role::{Role, ALL_ROLES};
use uuid::Uuid;

/// Role record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleRecord {
    pub id: Uuid,
    pub name: String,
}

/// Role repository for database operations
pub struct RoleRepository;

impl RoleRepository {
    /// Insert the closed role set if absent. Idempotent.
    pub async fn seed(pool: &PgPool) -> Result<()> {
        for role in ALL_ROLES {
            sqlx::query(
                r#"
                INSERT INTO roles (name)
                VALUES ($1)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(role.as_str())
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Find a role row by its enum value.
    pub async fn find(pool: &PgPool, role: Role) -> Result<Option<RoleRecord>> {
        let record = sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT id, name
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    // Exercised through the integration suite; requires a database.
}
