//! Persistence adapters: Diesel/PostgreSQL and in-memory fallbacks.

mod diesel_anchor_repository;
mod diesel_attendance_repository;
mod diesel_role_assignment_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_anchor_repository::DieselAnchorRepository;
pub use diesel_attendance_repository::DieselAttendanceRepository;
pub use diesel_role_assignment_repository::DieselRoleAssignmentRepository;
pub use memory::{
    MemoryAnchorRepository, MemoryAttendanceRepository, MemoryRoleAssignmentRepository,
};
pub use pool::{DbPool, PoolConfig, PoolError};
