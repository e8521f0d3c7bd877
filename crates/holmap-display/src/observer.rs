use holmap_core::models::CheckboxChange;

use crate::controller::DisplayController;

/// Receives every programmatic checkbox mutation, the way a DOM fires a
/// `change` event when a checkbox is set from code.
///
/// The callback may call back into the controller. Handlers are gated on
/// [`DisplayStatus::Idle`](holmap_core::models::DisplayStatus::Idle), so
/// such nested calls are no-ops while the controller is mid-operation.
pub trait NavObserver {
    fn checkbox_changed(&mut self, controller: &mut DisplayController, change: CheckboxChange);
}

impl<F> NavObserver for F
where
    F: FnMut(&mut DisplayController, CheckboxChange),
{
    fn checkbox_changed(&mut self, controller: &mut DisplayController, change: CheckboxChange) {
        self(controller, change)
    }
}
