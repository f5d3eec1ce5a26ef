//! The attendance accounting engine and the roster operations around it.
//!
//! Every operation takes the database connection explicitly and, where the
//! result depends on the clock, an explicit `now`.

pub mod attendance;
pub mod contribution;
pub mod enrollment;
pub mod error;
pub mod policy;
pub mod quarter;
pub mod session;
pub mod student;
pub mod summary;
mod validate;

pub use error::{ServiceError, ServiceResult};
pub use policy::{AbsencePolicy, AttendanceStatus};
