//! Diesel table definitions for the attendance store.
//!
//! Kept in lockstep with the SQL in `migrations/`.

diesel::table! {
    /// One locally authoritative role record per user.
    role_assignments (user_id) {
        /// Owning user.
        user_id -> Uuid,
        /// Canonical upper-case role name.
        role -> Text,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clock-in/clock-out records; open sessions have a null clock-out.
    shift_sessions (id) {
        /// Session identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Clock-in timestamp.
        clock_in_at -> Timestamptz,
        /// Clock-out timestamp, null while the session is open.
        clock_out_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Singleton geofence anchor; the check constraint pins id to 1.
    anchor_locations (id) {
        /// Always 1.
        id -> Int2,
        /// Latitude of the geofence centre.
        latitude -> Float8,
        /// Longitude of the geofence centre.
        longitude -> Float8,
        /// Radius in kilometres.
        radius_km -> Float8,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}
