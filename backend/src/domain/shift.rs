//! Shift session entities and timesheet summaries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Validation errors raised by shift session construction and closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftValidationError {
    /// Clock-out precedes clock-in.
    ClockOutBeforeClockIn,
    /// The session is already closed.
    AlreadyClosed,
    /// The session has no clock-out yet.
    StillOpen,
}

impl std::fmt::Display for ShiftValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClockOutBeforeClockIn => {
                write!(f, "clock-out must not precede clock-in")
            }
            Self::AlreadyClosed => write!(f, "shift session is already closed"),
            Self::StillOpen => write!(f, "shift session has not been closed"),
        }
    }
}

impl std::error::Error for ShiftValidationError {}

/// One attended shift: a clock-in, and eventually a clock-out.
///
/// ## Invariants
/// - `clock_out_at`, when present, is not before `clock_in_at`.
///
/// The caretaker's reported position gates the mutation but is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSession {
    id: Uuid,
    user_id: UserId,
    clock_in_at: DateTime<Utc>,
    clock_out_at: Option<DateTime<Utc>>,
}

impl ShiftSession {
    /// Open a new session clocked in at `clock_in_at`.
    pub fn open(user_id: UserId, clock_in_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            clock_in_at,
            clock_out_at: None,
        }
    }

    /// Rehydrate a session from storage.
    pub fn from_parts(
        id: Uuid,
        user_id: UserId,
        clock_in_at: DateTime<Utc>,
        clock_out_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ShiftValidationError> {
        if let Some(out) = clock_out_at {
            if out < clock_in_at {
                return Err(ShiftValidationError::ClockOutBeforeClockIn);
            }
        }
        Ok(Self {
            id,
            user_id,
            clock_in_at,
            clock_out_at,
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Clock-in timestamp.
    pub fn clock_in_at(&self) -> DateTime<Utc> {
        self.clock_in_at
    }

    /// Clock-out timestamp, when the session is closed.
    pub fn clock_out_at(&self) -> Option<DateTime<Utc>> {
        self.clock_out_at
    }

    /// Whether the session is still open.
    pub fn is_open(&self) -> bool {
        self.clock_out_at.is_none()
    }

    /// Close the session at `clock_out_at`.
    pub fn close(&mut self, clock_out_at: DateTime<Utc>) -> Result<(), ShiftValidationError> {
        if self.clock_out_at.is_some() {
            return Err(ShiftValidationError::AlreadyClosed);
        }
        if clock_out_at < self.clock_in_at {
            return Err(ShiftValidationError::ClockOutBeforeClockIn);
        }
        self.clock_out_at = Some(clock_out_at);
        Ok(())
    }

    /// Worked minutes of a closed session.
    pub fn worked_minutes(&self) -> Result<i64, ShiftValidationError> {
        let out = self.clock_out_at.ok_or(ShiftValidationError::StillOpen)?;
        Ok((out - self.clock_in_at).num_minutes())
    }
}

/// One completed session inside a timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetEntry {
    /// Originating session.
    pub session_id: Uuid,
    /// Clock-in timestamp.
    pub clock_in_at: DateTime<Utc>,
    /// Clock-out timestamp.
    pub clock_out_at: DateTime<Utc>,
    /// Worked minutes.
    pub minutes: i64,
}

/// Hours-worked summary over a set of completed sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetSummary {
    /// Owning user.
    pub user_id: UserId,
    /// Completed sessions in clock-in order.
    pub entries: Vec<TimesheetEntry>,
    /// Total worked minutes across the entries.
    pub total_minutes: i64,
}

impl TimesheetSummary {
    /// Summarise completed sessions. Open sessions are skipped.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ShiftSession, TimesheetSummary, UserId};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let user = UserId::random();
    /// let mut shift = ShiftSession::open(
    ///     user.clone(),
    ///     Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap(),
    /// );
    /// shift
    ///     .close(Utc.with_ymd_and_hms(2026, 7, 1, 17, 30, 0).unwrap())
    ///     .expect("closes");
    /// let summary = TimesheetSummary::from_sessions(user, &[shift]);
    /// assert_eq!(summary.total_minutes, 510);
    /// ```
    pub fn from_sessions(user_id: UserId, sessions: &[ShiftSession]) -> Self {
        let mut entries: Vec<TimesheetEntry> = sessions
            .iter()
            .filter_map(|session| {
                let clock_out_at = session.clock_out_at()?;
                let minutes = session.worked_minutes().ok()?;
                Some(TimesheetEntry {
                    session_id: session.id(),
                    clock_in_at: session.clock_in_at(),
                    clock_out_at,
                    minutes,
                })
            })
            .collect();
        entries.sort_by_key(|entry| entry.clock_in_at);
        let total_minutes = entries.iter().map(|entry| entry.minutes).sum();

        Self {
            user_id,
            entries,
            total_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).single().expect("valid timestamp")
    }

    #[rstest]
    fn open_sessions_have_no_clock_out(nine_am: DateTime<Utc>) {
        let session = ShiftSession::open(UserId::random(), nine_am);
        assert!(session.is_open());
        assert_eq!(
            session.worked_minutes().expect_err("open session"),
            ShiftValidationError::StillOpen
        );
    }

    #[rstest]
    fn closing_computes_worked_minutes(nine_am: DateTime<Utc>) {
        let mut session = ShiftSession::open(UserId::random(), nine_am);
        session
            .close(nine_am + chrono::Duration::minutes(475))
            .expect("closes");

        assert!(!session.is_open());
        assert_eq!(session.worked_minutes().expect("closed"), 475);
    }

    #[rstest]
    fn closing_twice_is_rejected(nine_am: DateTime<Utc>) {
        let mut session = ShiftSession::open(UserId::random(), nine_am);
        session.close(nine_am).expect("first close");
        let err = session.close(nine_am).expect_err("second close");
        assert_eq!(err, ShiftValidationError::AlreadyClosed);
    }

    #[rstest]
    fn clock_out_before_clock_in_is_rejected(nine_am: DateTime<Utc>) {
        let mut session = ShiftSession::open(UserId::random(), nine_am);
        let err = session
            .close(nine_am - chrono::Duration::minutes(1))
            .expect_err("negative duration");
        assert_eq!(err, ShiftValidationError::ClockOutBeforeClockIn);

        let rehydrate_err = ShiftSession::from_parts(
            Uuid::new_v4(),
            UserId::random(),
            nine_am,
            Some(nine_am - chrono::Duration::minutes(1)),
        )
        .expect_err("negative duration row");
        assert_eq!(rehydrate_err, ShiftValidationError::ClockOutBeforeClockIn);
    }

    #[rstest]
    fn summary_skips_open_sessions_and_sums_minutes(nine_am: DateTime<Utc>) {
        let user = UserId::random();
        let mut first = ShiftSession::open(user.clone(), nine_am);
        first
            .close(nine_am + chrono::Duration::minutes(60))
            .expect("closes");
        let mut second =
            ShiftSession::open(user.clone(), nine_am + chrono::Duration::hours(24));
        second
            .close(nine_am + chrono::Duration::hours(24) + chrono::Duration::minutes(90))
            .expect("closes");
        let still_open = ShiftSession::open(user.clone(), nine_am + chrono::Duration::hours(48));

        let summary =
            TimesheetSummary::from_sessions(user, &[second, still_open, first]);

        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.total_minutes, 150);
        assert!(summary.entries[0].clock_in_at < summary.entries[1].clock_in_at);
    }
}
