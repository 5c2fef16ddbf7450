//! Multi-step order workflows.
//!
//! A workflow composes several async fetches into one user-facing
//! transaction. At most one workflow session may be active per dashboard;
//! [`WorkflowGate`] enforces that only one of them is ever non-idle.

pub mod augment;
pub mod create;

pub use augment::{AugmentationStage, OrderAugmentationWorkflow};
pub use create::{CreationStage, OrderCreationWorkflow};

use crate::error::ActionError;

const GATE_BUSY: &str = "Finish the open workflow before starting another.";

/// Which workflow holds the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Creation,
    Augmentation,
}

/// Ensures at most one creation/augmentation workflow is open at a time.
#[derive(Debug, Default)]
pub struct WorkflowGate {
    active: Option<WorkflowKind>,
}

impl WorkflowGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// The currently open workflow, if any.
    #[must_use]
    pub const fn active(&self) -> Option<WorkflowKind> {
        self.active
    }

    /// Claim the gate for `kind`.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` when another workflow is already open.
    pub fn open(&mut self, kind: WorkflowKind) -> Result<(), ActionError> {
        match self.active {
            Some(current) if current != kind => {
                Err(ActionError::Validation(GATE_BUSY.to_string()))
            }
            Some(_) => Ok(()),
            None => {
                self.active = Some(kind);
                Ok(())
            }
        }
    }

    /// Release the gate.
    pub fn close(&mut self) {
        self.active = None;
    }
}
