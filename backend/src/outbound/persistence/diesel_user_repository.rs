//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement: no transactions span calls and the
//! database alone arbitrates concurrent writes to the same email.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Name of the unique constraint guarding `users.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors, treating email unique violations as duplicates.
fn map_diesel_error(error: DieselError, draft: Option<&UserDraft>) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name();
            match (constraint, draft) {
                (None | Some(EMAIL_UNIQUE_CONSTRAINT), Some(draft)) => {
                    UserPersistenceError::duplicate_email(draft.email().as_ref())
                }
                _ => {
                    warn!(?constraint, "unexpected unique violation on users");
                    UserPersistenceError::query("unique constraint violated")
                }
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row).map_err(|err| {
        warn!(user_id = id, error = %err, "stored user row violates domain invariants");
        UserPersistenceError::query(format!("invalid user row {id}: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft)))?;

        row_to_user(row)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        };
        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(draft)))?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserPersistenceError::not_found(id)),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        if deleted == 0 {
            return Err(UserPersistenceError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; query behaviour is exercised against embedded
    //! PostgreSQL in `tests/diesel_user_repository.rs`.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft::try_from_strings("Ada", "ada@example.com").expect("valid draft")
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(String::from("driver message")))
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_on_write_maps_to_duplicate_email(draft: UserDraft) {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation),
            Some(&draft),
        );

        assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    fn unique_violation_without_draft_maps_to_query_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation), None);

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection), None);

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound, None);

        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn invalid_row_is_reported_as_query_error() {
        let row = UserRow {
            id: 1,
            name: "   ".to_owned(),
            email: "ada@example.com".to_owned(),
        };

        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
