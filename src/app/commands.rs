//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the cloud
//! attribute channel) that the [`AppService`](super::service::AppService)
//! interprets and acts upon.

use super::model::Level;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A manual brightness value pushed from the dashboard.
    SetManualLevel(Level),
}
