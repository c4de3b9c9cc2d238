//! Process-local adapters used when no database is configured.
//!
//! These back the same ports as the Diesel repositories with `Mutex`-guarded
//! maps, which keeps development servers and integration tests runnable
//! without PostgreSQL. Contents vanish with the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    AnchorRepository, AnchorRepositoryError, AttendanceRepository, AttendanceRepositoryError,
    RoleAssignmentRepository, RoleAssignmentRepositoryError,
};
use crate::domain::{AnchorLocation, RoleAssignment, ShiftSession, UserId};

/// In-memory `RoleAssignmentRepository`.
#[derive(Debug, Default)]
pub struct MemoryRoleAssignmentRepository {
    records: Mutex<HashMap<Uuid, RoleAssignment>>,
}

impl MemoryRoleAssignmentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with the given assignments.
    pub fn with_assignments(assignments: impl IntoIterator<Item = RoleAssignment>) -> Self {
        let records = assignments
            .into_iter()
            .map(|assignment| (*assignment.user_id.as_uuid(), assignment))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RoleAssignmentRepository for MemoryRoleAssignmentRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RoleAssignment>, RoleAssignmentRepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RoleAssignmentRepositoryError::connection("role store poisoned"))?;
        Ok(guard.get(user_id.as_uuid()).cloned())
    }

    async fn upsert(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<(), RoleAssignmentRepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RoleAssignmentRepositoryError::connection("role store poisoned"))?;
        guard.insert(*assignment.user_id.as_uuid(), assignment.clone());
        Ok(())
    }
}

/// In-memory `AttendanceRepository`.
#[derive(Debug, Default)]
pub struct MemoryAttendanceRepository {
    sessions: Mutex<HashMap<Uuid, ShiftSession>>,
}

impl MemoryAttendanceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn insert(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| AttendanceRepositoryError::connection("attendance store poisoned"))?;
        guard.insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_open_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ShiftSession>, AttendanceRepositoryError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| AttendanceRepositoryError::connection("attendance store poisoned"))?;
        Ok(guard
            .values()
            .find(|session| session.user_id() == user_id && session.is_open())
            .cloned())
    }

    async fn update(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| AttendanceRepositoryError::connection("attendance store poisoned"))?;
        guard.insert(session.id(), session.clone());
        Ok(())
    }

    async fn list_completed_between(
        &self,
        user_id: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ShiftSession>, AttendanceRepositoryError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| AttendanceRepositoryError::connection("attendance store poisoned"))?;
        let mut sessions: Vec<ShiftSession> = guard
            .values()
            .filter(|session| {
                session.user_id() == user_id
                    && !session.is_open()
                    && session.clock_in_at() >= from
                    && session.clock_in_at() < to
            })
            .cloned()
            .collect();
        sessions.sort_by_key(ShiftSession::clock_in_at);
        Ok(sessions)
    }
}

/// In-memory `AnchorRepository`.
#[derive(Debug, Default)]
pub struct MemoryAnchorRepository {
    anchor: Mutex<Option<AnchorLocation>>,
}

impl MemoryAnchorRepository {
    /// Create a repository with no anchor configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with an anchor.
    pub fn with_anchor(anchor: AnchorLocation) -> Self {
        Self {
            anchor: Mutex::new(Some(anchor)),
        }
    }
}

#[async_trait]
impl AnchorRepository for MemoryAnchorRepository {
    async fn get(&self) -> Result<Option<AnchorLocation>, AnchorRepositoryError> {
        let guard = self
            .anchor
            .lock()
            .map_err(|_| AnchorRepositoryError::connection("anchor store poisoned"))?;
        Ok(*guard)
    }

    async fn set(&self, anchor: &AnchorLocation) -> Result<(), AnchorRepositoryError> {
        let mut guard = self
            .anchor
            .lock()
            .map_err(|_| AnchorRepositoryError::connection("anchor store poisoned"))?;
        *guard = Some(*anchor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{GeoPoint, Role};

    #[fixture]
    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).single().expect("valid timestamp")
    }

    #[rstest]
    #[tokio::test]
    async fn role_assignments_round_trip() {
        let repo = MemoryRoleAssignmentRepository::new();
        let assignment = RoleAssignment::new(UserId::random(), Role::Manager);

        repo.upsert(&assignment).await.expect("upsert succeeds");
        let found = repo
            .find_by_user(&assignment.user_id)
            .await
            .expect("lookup succeeds");
        assert_eq!(found, Some(assignment));
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_the_existing_role() {
        let user = UserId::random();
        let repo = MemoryRoleAssignmentRepository::with_assignments([RoleAssignment::new(
            user.clone(),
            Role::Caretaker,
        )]);

        repo.upsert(&RoleAssignment::new(user.clone(), Role::Manager))
            .await
            .expect("upsert succeeds");
        let found = repo.find_by_user(&user).await.expect("lookup succeeds");
        assert_eq!(found.map(|assignment| assignment.role), Some(Role::Manager));
    }

    #[rstest]
    #[tokio::test]
    async fn open_sessions_are_found_and_closed_ones_listed(nine_am: DateTime<Utc>) {
        let repo = MemoryAttendanceRepository::new();
        let user = UserId::random();

        let mut session = ShiftSession::open(user.clone(), nine_am);
        repo.insert(&session).await.expect("insert succeeds");

        let open = repo
            .find_open_for_user(&user)
            .await
            .expect("lookup succeeds")
            .expect("session is open");
        assert_eq!(open.id(), session.id());

        session
            .close(nine_am + chrono::Duration::hours(8))
            .expect("closes");
        repo.update(&session).await.expect("update succeeds");

        assert!(repo
            .find_open_for_user(&user)
            .await
            .expect("lookup succeeds")
            .is_none());

        let listed = repo
            .list_completed_between(
                &user,
                nine_am - chrono::Duration::days(1),
                nine_am + chrono::Duration::days(1),
            )
            .await
            .expect("list succeeds");
        assert_eq!(listed.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn completed_sessions_outside_the_range_are_skipped(nine_am: DateTime<Utc>) {
        let repo = MemoryAttendanceRepository::new();
        let user = UserId::random();

        let mut session = ShiftSession::open(user.clone(), nine_am);
        session
            .close(nine_am + chrono::Duration::hours(8))
            .expect("closes");
        repo.insert(&session).await.expect("insert succeeds");

        let listed = repo
            .list_completed_between(
                &user,
                nine_am + chrono::Duration::days(1),
                nine_am + chrono::Duration::days(2),
            )
            .await
            .expect("list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn anchor_round_trips() {
        let repo = MemoryAnchorRepository::new();
        assert!(repo.get().await.expect("get succeeds").is_none());

        let center = GeoPoint::new(0.0, 0.0).expect("valid centre");
        let anchor = AnchorLocation::new(center, 1.0).expect("valid anchor");
        repo.set(&anchor).await.expect("set succeeds");

        assert_eq!(repo.get().await.expect("get succeeds"), Some(anchor));
    }
}
