use crate::DbError;
use crate::store::CustomerStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Customer, CustomerId, CustomerPatch, NewCustomer};
use sqlx::FromRow;
use sqlx::postgres::PgPool;
use uuid::Uuid;

/// The `DbRepository` is the PostgreSQL implementation of [`CustomerStore`].
/// It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow)]
struct DbCustomer {
    id: Uuid,
    name: String,
    date_of_birth: NaiveDate,
    member_number: i64,
    interests: Option<String>,
}

impl From<DbCustomer> for Customer {
    fn from(row: DbCustomer) -> Self {
        Customer {
            id: CustomerId::from(row.id),
            name: row.name,
            date_of_birth: row.date_of_birth,
            member_number: row.member_number,
            interests: row.interests,
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Closes the underlying pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CustomerStore for DbRepository {
    async fn list(&self) -> Result<Vec<Customer>, DbError> {
        let rows = sqlx::query_as::<_, DbCustomer>(
            r#"
            SELECT id, name, date_of_birth, member_number, interests
            FROM customers
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find(&self, id: CustomerId) -> Result<Option<Customer>, DbError> {
        let row = sqlx::query_as::<_, DbCustomer>(
            r#"
            SELECT id, name, date_of_birth, member_number, interests
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, DbError> {
        let row = sqlx::query_as::<_, DbCustomer>(
            r#"
            INSERT INTO customers (id, name, date_of_birth, member_number, interests)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, date_of_birth, member_number, interests
            "#,
        )
        .bind(CustomerId::generate().as_uuid())
        .bind(&new.name)
        .bind(new.date_of_birth)
        .bind(new.member_number)
        .bind(&new.interests)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(customer_id = %row.id, "Inserted customer.");
        Ok(row.into())
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, DbError> {
        // `$5` says whether `interests` is part of the patch at all, so that an
        // explicit clear can be told apart from an omitted field.
        let (set_interests, interests) = match patch.interests {
            Some(value) => (true, value),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, DbCustomer>(
            r#"
            UPDATE customers SET
                name          = COALESCE($2, name),
                date_of_birth = COALESCE($3, date_of_birth),
                member_number = COALESCE($4, member_number),
                interests     = CASE WHEN $5 THEN $6 ELSE interests END
            WHERE id = $1
            RETURNING id, name, date_of_birth, member_number, interests
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.date_of_birth)
        .bind(patch.member_number)
        .bind(set_interests)
        .bind(interests)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, DbError> {
        let row = sqlx::query_as::<_, DbCustomer>(
            r#"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, name, date_of_birth, member_number, interests
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }
}
