//! Static health guidance and specialist search links.

pub mod doctors;
pub mod tips;

pub use doctors::{doctor_links, quote_plus, specialist_for, DistanceRange, DoctorLinks};
pub use tips::{tips_for, Condition, HealthTips};
