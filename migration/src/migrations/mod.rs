pub mod m202610010001_create_users;
pub mod m202610010002_create_quarters;
pub mod m202610010003_create_sessions;
pub mod m202610010004_create_quarter_enrollments;
pub mod m202610010005_create_check_ins;
pub mod m202610010006_create_check_outs;
pub mod m202610010007_create_contributions;
