//! Status-based guards for order actions
//!
//! The order list consults these before navigating to the editor, asking for
//! delete confirmation, or advancing a status. A violation carries the
//! message shown to the user.

use orderdesk_api::OrderStatus;
use thiserror::Error;

/// An order action refused because of the order's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardViolation {
    /// Only pending orders can be edited
    #[error("Orders that are in progress or completed cannot be edited")]
    NotEditable {
        /// Status the order is in
        status: OrderStatus,
    },

    /// In-progress orders cannot be deleted
    #[error("Orders that are in progress cannot be deleted")]
    DeleteInProgress,

    /// Completed orders are final
    #[error("Completed orders cannot change status")]
    AlreadyCompleted,
}

/// Editing is allowed only while the order is pending
///
/// # Errors
///
/// Returns [`GuardViolation::NotEditable`] for any other status.
pub const fn check_edit(status: OrderStatus) -> Result<(), GuardViolation> {
    match status {
        OrderStatus::Pending => Ok(()),
        OrderStatus::InProgress | OrderStatus::Completed => {
            Err(GuardViolation::NotEditable { status })
        },
    }
}

/// Deleting is blocked while the order is in progress
///
/// # Errors
///
/// Returns [`GuardViolation::DeleteInProgress`] for in-progress orders.
pub const fn check_delete(status: OrderStatus) -> Result<(), GuardViolation> {
    match status {
        OrderStatus::InProgress => Err(GuardViolation::DeleteInProgress),
        OrderStatus::Pending | OrderStatus::Completed => Ok(()),
    }
}

/// Advancing is blocked once the order is completed; returns the target status
///
/// # Errors
///
/// Returns [`GuardViolation::AlreadyCompleted`] for completed orders.
pub const fn check_advance(status: OrderStatus) -> Result<OrderStatus, GuardViolation> {
    match status.next() {
        Ok(next) => Ok(next),
        Err(_) => Err(GuardViolation::AlreadyCompleted),
    }
}
