pub mod check_in;
pub mod check_out;
pub mod contribution;
pub mod quarter;
pub mod quarter_enrollment;
pub mod session;
pub mod user;

pub use check_in::{CheckInStatus, Entity as CheckIn};
pub use check_out::Entity as CheckOut;
pub use contribution::{ContributionQuality, Entity as Contribution};
pub use quarter::Entity as Quarter;
pub use quarter_enrollment::Entity as QuarterEnrollment;
pub use session::Entity as Session;
pub use user::Entity as User;
