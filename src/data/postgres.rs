use crate::{
    config::DbConfig,
    data::{
        StudentStore,
        student::{Student, StudentFields},
    },
    error::{
        CommitTransactionSnafu, GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu,
        OpenDatabaseSnafu, StudentsResult,
    },
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

const COLUMNS: &str = "id, registration_number, name, last_name, status";

#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    /// Opens the pool and brings the schema up to date.
    pub async fn connect(options: PgPoolOptions, config: &DbConfig) -> StudentsResult<Self> {
        let pool = options
            .connect(config.database_url().expose_secret())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn get_all(&self) -> StudentsResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_by_id(&self, id: i32) -> StudentsResult<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn insert(&self, fields: StudentFields) -> StudentsResult<Student> {
        let StudentFields {
            registration_number,
            name,
            last_name,
            status,
        } = fields;

        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (registration_number, name, last_name, status) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(registration_number)
        .bind(name)
        .bind(last_name)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn save(&self, student: Student) -> StudentsResult<Student> {
        let Student {
            id,
            registration_number,
            name,
            last_name,
            status,
        } = student;

        let mut transaction = self.pool.begin().await.context(GetDatabaseConnectionSnafu)?;

        let saved = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (id, registration_number, name, last_name, status) VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET registration_number = excluded.registration_number, name = excluded.name, \
             last_name = excluded.last_name, status = excluded.status RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(registration_number)
        .bind(name)
        .bind(last_name)
        .bind(status)
        .fetch_one(&mut *transaction)
        .await
        .context(MakeQuerySnafu)?;

        //only moves the serial forward, and only when the saved id is past it
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('students', 'id'), $1::bigint) \
             WHERE $1::bigint > COALESCE(pg_sequence_last_value(pg_get_serial_sequence('students', 'id')::regclass), 0)",
        )
        .bind(i64::from(saved.id))
        .execute(&mut *transaction)
        .await
        .context(MakeQuerySnafu)?;

        transaction.commit().await.context(CommitTransactionSnafu)?;

        Ok(saved)
    }

    async fn remove(&self, id: i32) -> StudentsResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
