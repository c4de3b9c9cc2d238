//! PostgreSQL-backed `RoleAssignmentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RoleAssignmentRepository, RoleAssignmentRepositoryError};
use crate::domain::{Role, RoleAssignment, UserId};

use super::models::{NewRoleAssignmentRow, RoleAssignmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::role_assignments;

/// Diesel-backed implementation of the `RoleAssignmentRepository` port.
#[derive(Clone)]
pub struct DieselRoleAssignmentRepository {
    pool: DbPool,
}

impl DieselRoleAssignmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoleAssignmentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RoleAssignmentRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RoleAssignmentRepositoryError {
    debug!(error = %error, "diesel operation failed");
    match error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            _,
        ) => RoleAssignmentRepositoryError::connection("database connection error"),
        _ => RoleAssignmentRepositoryError::query("database error"),
    }
}

fn row_to_assignment(row: RoleAssignmentRow) -> Result<RoleAssignment, RoleAssignmentRepositoryError>
{
    let role: Role = row.role.parse().map_err(|_| {
        RoleAssignmentRepositoryError::query(format!(
            "unrecognised role value stored for user {}",
            row.user_id
        ))
    })?;
    Ok(RoleAssignment::new(UserId::from_uuid(row.user_id), role))
}

#[async_trait]
impl RoleAssignmentRepository for DieselRoleAssignmentRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RoleAssignment>, RoleAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoleAssignmentRow> = role_assignments::table
            .filter(role_assignments::user_id.eq(user_id.as_uuid()))
            .select(RoleAssignmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_assignment).transpose()
    }

    async fn upsert(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<(), RoleAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRoleAssignmentRow {
            user_id: *assignment.user_id.as_uuid(),
            role: assignment.role.name(),
        };

        diesel::insert_into(role_assignments::table)
            .values(&new_row)
            .on_conflict(role_assignments::user_id)
            .do_update()
            .set((
                role_assignments::role.eq(assignment.role.name()),
                role_assignments::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            RoleAssignmentRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(
            repo_err,
            RoleAssignmentRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn rows_convert_to_assignments() {
        let row = RoleAssignmentRow {
            user_id: uuid::Uuid::new_v4(),
            role: "MANAGER".to_owned(),
            updated_at: Utc::now(),
        };
        let assignment = row_to_assignment(row).expect("row converts");
        assert_eq!(assignment.role, Role::Manager);
    }

    #[rstest]
    fn unknown_stored_roles_are_query_errors() {
        let row = RoleAssignmentRow {
            user_id: uuid::Uuid::new_v4(),
            role: "SCHEDULER".to_owned(),
            updated_at: Utc::now(),
        };
        let err = row_to_assignment(row).expect_err("unknown role must fail");
        assert!(matches!(err, RoleAssignmentRepositoryError::Query { .. }));
    }
}
