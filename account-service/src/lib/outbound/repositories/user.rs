use async_trait::async_trait;
use auth::OtpChallenge;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::Postgres;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::user::models::Address;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::MobileNumber;
use crate::domain::user::models::Patch;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_COLUMNS: &str = "id, first_name, last_name, email, mobile_number, \
     password_hash, address, status, otp_code, otp_expires_at, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append the SET clauses for the patched fields.
    ///
    /// `updated_at` is always written; OTP code and expiry are written (or
    /// cleared) together so they can never drift apart.
    fn push_patch(qb: &mut QueryBuilder<'_, Postgres>, patch: &UserPatch) {
        qb.push("updated_at = now()");

        if let Patch::Set(hash) = &patch.password_hash {
            qb.push(", password_hash = ");
            qb.push_bind(hash.clone());
        }

        if let Patch::Set(status) = &patch.status {
            qb.push(", status = ");
            qb.push_bind(status.as_str());
        }

        match &patch.otp {
            Patch::Keep => {}
            Patch::Set(Some(challenge)) => {
                qb.push(", otp_code = ");
                qb.push_bind(challenge.code.clone());
                qb.push(", otp_expires_at = ");
                qb.push_bind(challenge.expires_at);
            }
            Patch::Set(None) => {
                qb.push(", otp_code = NULL, otp_expires_at = NULL");
            }
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let address = user
            .address
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO users
                (id, first_name, last_name, email, mobile_number, password_hash,
                 address, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.0)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.mobile_number.as_str())
        .bind(&user.password_hash)
        .bind(address)
        .bind(user.status.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn update_fields(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE users SET ");
        Self::push_patch(&mut qb, &patch);
        qb.push(" WHERE id = ");
        qb.push_bind(id.0);
        qb.push(format!(" RETURNING {SELECT_COLUMNS}"));

        let row: Option<UserRow> = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn consume_otp(
        &self,
        id: &UserId,
        expected_code: &str,
        patch: UserPatch,
    ) -> Result<bool, UserError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE users SET ");
        Self::push_patch(&mut qb, &patch);
        qb.push(" WHERE id = ");
        qb.push_bind(id.0);
        // The code predicate makes the consume atomic: a concurrent request
        // that already cleared or replaced the code matches zero rows.
        qb.push(" AND otp_code = ");
        qb.push_bind(expected_code.to_string());

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

/// Flat row shape as stored; converted back into domain types on read.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    mobile_number: String,
    password_hash: String,
    address: Option<serde_json::Value>,
    status: String,
    otp_code: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, UserError> {
        let address: Option<Address> = self
            .address
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| UserError::DatabaseError(format!("Invalid address column: {}", e)))?;

        let otp = match (self.otp_code, self.otp_expires_at) {
            (Some(code), Some(expires_at)) => Some(OtpChallenge { code, expires_at }),
            (None, None) => None,
            _ => {
                return Err(UserError::DatabaseError(
                    "otp_code and otp_expires_at are out of sync".to_string(),
                ))
            }
        };

        Ok(User {
            id: UserId(self.id),
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            email: EmailAddress::new(self.email)?,
            mobile_number: MobileNumber::new(self.mobile_number)?,
            password_hash: self.password_hash,
            address,
            status: self.status.parse()?,
            otp,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
