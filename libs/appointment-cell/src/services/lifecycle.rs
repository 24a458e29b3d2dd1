// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed. Staying in the same status
    /// is not a transition and always passes.
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        if current_status == new_status {
            return Ok(());
        }

        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => {
                vec![AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            // Terminal states
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn is_terminal(&self, status: AppointmentStatus) -> bool {
        self.get_valid_transitions(status).is_empty()
    }

    /// Statuses an edit form should offer for an appointment in `current_status`.
    pub fn editable_statuses(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        let mut statuses = vec![current_status];
        statuses.extend(self.get_valid_transitions(current_status));
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn scheduled_can_finish_either_way() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Completed)
            .is_ok());
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
            .is_ok());
    }

    #[test]
    fn terminal_states_stay_put() {
        let lifecycle = AppointmentLifecycleService::new();
        for terminal in [AppointmentStatus::Completed, AppointmentStatus::Cancelled] {
            assert!(lifecycle.is_terminal(terminal));
            assert_matches!(
                lifecycle.validate_status_transition(terminal, AppointmentStatus::Scheduled),
                Err(AppointmentError::InvalidStatusTransition { .. })
            );
            assert!(lifecycle.validate_status_transition(terminal, terminal).is_ok());
            assert_eq!(lifecycle.editable_statuses(terminal), vec![terminal]);
        }
        assert_matches!(
            lifecycle.validate_status_transition(AppointmentStatus::Cancelled, AppointmentStatus::Completed),
            Err(AppointmentError::InvalidStatusTransition {
                from: AppointmentStatus::Cancelled,
                to: AppointmentStatus::Completed,
            })
        );
    }

    #[test]
    fn scheduled_edit_form_offers_all_three() {
        let lifecycle = AppointmentLifecycleService::new();
        assert_eq!(
            lifecycle.editable_statuses(AppointmentStatus::Scheduled),
            vec![
                AppointmentStatus::Scheduled,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ]
        );
    }
}
