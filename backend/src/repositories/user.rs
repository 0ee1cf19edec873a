//! User repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use user_portal_shared::{NewUser, Role, UserProfile};
use uuid::Uuid;

/// User record with its role names, as loaded from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub birthdate: NaiveDate,
    pub url_profile: Option<String>,
    pub adress: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Roles parsed into the closed enum. Unknown names are dropped.
    pub fn role_set(&self) -> Vec<Role> {
        self.roles
            .iter()
            .filter_map(|r| r.parse::<Role>().ok())
            .collect()
    }
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        UserProfile {
            id: record.id,
            email: record.email,
            name: record.name,
            last_name: record.last_name,
            phone_number: record.phone_number,
            birthdate: record.birthdate,
            url_profile: record.url_profile,
            adress: record.adress,
            roles: record.roles,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const SELECT_WITH_ROLES: &str = r#"
    SELECT u.id, u.email, u.password_hash, u.name, u.last_name,
           u.phone_number, u.birthdate, u.url_profile, u.adress,
           COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), '{}') AS roles,
           u.created_at, u.updated_at
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
"#;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a user with the given role assignments in one transaction.
    ///
    /// Returns the raw sqlx error on failure so the service layer can
    /// map a unique violation on `users.email` to a conflict.
    pub async fn create(
        pool: &PgPool,
        new_user: &NewUser,
        password_hash: &str,
        roles: &[Role],
    ) -> Result<UserRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, password_hash, name, last_name,
                               phone_number, birthdate, url_profile, adress)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(&new_user.name)
        .bind(&new_user.last_name)
        .bind(&new_user.phone_number)
        .bind(new_user.birthdate)
        .bind(&new_user.url_profile)
        .bind(&new_user.adress)
        .fetch_one(&mut *tx)
        .await?;

        for role in roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE name = $2
                "#,
            )
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "{SELECT_WITH_ROLES} WHERE u.id = $1 GROUP BY u.id"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Find a user by email. Expects an already lowercased value.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "{SELECT_WITH_ROLES} WHERE u.email = $1 GROUP BY u.id"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "{SELECT_WITH_ROLES} WHERE u.id = $1 GROUP BY u.id"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List every user, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "{SELECT_WITH_ROLES} GROUP BY u.id ORDER BY u.created_at"
        ))
        .fetch_all(pool)
        .await
    }

    /// Check if an email is taken.
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
