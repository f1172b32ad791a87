//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! `phone_number` is unique, so each phone has at most one row. `issue` is a
//! single upsert; `issue_unless_active` is a conditional upsert that leaves a
//! live row alone. `verify` locks the row with `SELECT ... FOR UPDATE` before
//! consuming it. Times are taken from the application clock and bound as
//! parameters.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::mysql::MySqlArguments;
use sqlx::{MySql, MySqlPool, Row};
use uuid::Uuid;

use sepm_core::domain::entities::verification_code::{IssueOutcome, VerificationCode, VerifyOutcome};
use sepm_core::errors::DomainError;
use sepm_core::repositories::VerificationCodeRepository;

use super::{decode_error, storage_error};

const SELECT_COLUMNS: &str = "id, phone_number, code, created_at, expires_at, used";

const INSERT_CODE: &str = "INSERT INTO verification_codes \
     (id, phone_number, code, created_at, expires_at, used) VALUES (?, ?, ?, ?, ?, FALSE)";

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn bind_record<'q>(
        query: sqlx::query::Query<'q, MySql, MySqlArguments>,
        record: &VerificationCode,
    ) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
        query
            .bind(record.id.to_string())
            .bind(record.phone_number.clone())
            .bind(record.code.clone())
            .bind(record.created_at)
            .bind(record.expires_at)
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| decode_error("id", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| decode_error("phone_number", e))?,
            code: row.try_get("code").map_err(|e| decode_error("code", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| decode_error("expires_at", e))?,
            is_used: row.try_get("used").map_err(|e| decode_error("used", e))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn issue(&self, phone_number: &str, ttl: Duration) -> Result<VerificationCode, DomainError> {
        let record = VerificationCode::new(phone_number.to_string(), Utc::now(), ttl);

        let query = format!(
            "{} ON DUPLICATE KEY UPDATE \
             id = VALUES(id), code = VALUES(code), created_at = VALUES(created_at), \
             expires_at = VALUES(expires_at), used = FALSE",
            INSERT_CODE
        );
        Self::bind_record(sqlx::query(&query), &record)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("replace code", e))?;

        Ok(record)
    }

    async fn issue_unless_active(
        &self,
        phone_number: &str,
        ttl: Duration,
    ) -> Result<IssueOutcome, DomainError> {
        let record = VerificationCode::new(phone_number.to_string(), Utc::now(), ttl);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin issue", e))?;

        // Only a dead row (used, or expired as of the new row's creation) is
        // overwritten. `expires_at` is assigned before `used` so every
        // condition still sees the old values it depends on.
        let query = format!(
            "{} ON DUPLICATE KEY UPDATE \
             id = IF({dead}, VALUES(id), id), \
             code = IF({dead}, VALUES(code), code), \
             created_at = IF({dead}, VALUES(created_at), created_at), \
             expires_at = IF({dead}, VALUES(expires_at), expires_at), \
             used = IF({dead}, FALSE, used)",
            INSERT_CODE,
            dead = "used OR expires_at <= VALUES(created_at)"
        );
        Self::bind_record(sqlx::query(&query), &record)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("insert code", e))?;

        let query = format!(
            "SELECT {} FROM verification_codes WHERE phone_number = ? FOR UPDATE",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(phone_number)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| storage_error("read issued code", e))?;
        let stored = Self::row_to_code(&row)?;

        tx.commit()
            .await
            .map_err(|e| storage_error("commit issue", e))?;

        if stored.id == record.id {
            Ok(IssueOutcome::Issued(record))
        } else {
            Ok(IssueOutcome::Active(stored))
        }
    }

    async fn peek_active(&self, phone_number: &str) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes \
             WHERE phone_number = ? AND used = FALSE AND expires_at > ? \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(phone_number)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("peek active code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn verify(&self, phone_number: &str, code: &str) -> Result<VerifyOutcome, DomainError> {
        let now = Utc::now();
        let query = format!(
            "SELECT {} FROM verification_codes WHERE phone_number = ? \
             ORDER BY created_at DESC LIMIT 1 FOR UPDATE",
            SELECT_COLUMNS
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin verify", e))?;

        let row = sqlx::query(&query)
            .bind(phone_number)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| storage_error("lock code", e))?;

        let Some(row) = row else {
            return Ok(VerifyOutcome::NotFound);
        };

        let record = Self::row_to_code(&row)?;
        let outcome = record.check(code, now);

        if outcome.is_valid() {
            let result =
                sqlx::query("UPDATE verification_codes SET used = TRUE WHERE id = ? AND used = FALSE")
                    .bind(record.id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| storage_error("consume code", e))?;

            if result.rows_affected() == 0 {
                return Ok(VerifyOutcome::NotFound);
            }
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("commit verify", e))?;

        Ok(outcome)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result =
            sqlx::query("DELETE FROM verification_codes WHERE used = TRUE OR expires_at <= ?")
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| storage_error("purge codes", e))?;

        Ok(result.rows_affected())
    }
}
