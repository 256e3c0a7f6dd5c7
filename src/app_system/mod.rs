//! System orchestration, startup, and shutdown logic.

pub mod dashboard_system;
pub mod demo_data;
pub mod telemetry;

pub use dashboard_system::*;
pub use telemetry::*;
