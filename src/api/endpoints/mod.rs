//! API endpoint handlers.
//!
//! Each module corresponds to one dashboard page or panel.

pub mod advice;
pub mod forms;
pub mod health;
pub mod history;
pub mod models;
pub mod notices;
pub mod predict;
pub mod report;
pub mod session;
