//! Row types mapping Diesel tables to domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{anchor_locations, role_assignments, shift_sessions};

/// Stored role record.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = role_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleAssignmentRow {
    /// Owning user.
    pub user_id: Uuid,
    /// Canonical upper-case role name.
    pub role: String,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insertable role record.
#[derive(Debug, Insertable)]
#[diesel(table_name = role_assignments)]
pub struct NewRoleAssignmentRow<'a> {
    /// Owning user.
    pub user_id: Uuid,
    /// Canonical upper-case role name.
    pub role: &'a str,
}

/// Stored shift session.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = shift_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShiftSessionRow {
    /// Session identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Clock-in timestamp.
    pub clock_in_at: DateTime<Utc>,
    /// Clock-out timestamp, null while open.
    pub clock_out_at: Option<DateTime<Utc>>,
}

/// Insertable shift session.
#[derive(Debug, Insertable)]
#[diesel(table_name = shift_sessions)]
pub struct NewShiftSessionRow {
    /// Session identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Clock-in timestamp.
    pub clock_in_at: DateTime<Utc>,
    /// Clock-out timestamp, null while open.
    pub clock_out_at: Option<DateTime<Utc>>,
}

/// Stored anchor record.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = anchor_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnchorLocationRow {
    /// Always 1.
    pub id: i16,
    /// Latitude of the geofence centre.
    pub latitude: f64,
    /// Longitude of the geofence centre.
    pub longitude: f64,
    /// Radius in kilometres.
    pub radius_km: f64,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insertable anchor record.
#[derive(Debug, Insertable)]
#[diesel(table_name = anchor_locations)]
pub struct NewAnchorLocationRow {
    /// Always 1.
    pub id: i16,
    /// Latitude of the geofence centre.
    pub latitude: f64,
    /// Longitude of the geofence centre.
    pub longitude: f64,
    /// Radius in kilometres.
    pub radius_km: f64,
}
