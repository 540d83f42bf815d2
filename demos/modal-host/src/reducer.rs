//! Reducer - (state, action) -> changed?

use crate::action::Action;
use crate::state::AppState;

/// Apply an action; returns `true` if the UI should re-render
///
/// Opening an open dialog or closing a closed one changes nothing.
pub fn reducer(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::ModalOpen => set_open(state, true),
        Action::ModalClose => set_open(state, false),

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                true
            } else {
                false
            }
        }

        // Handled by the runtime loop
        Action::Quit => false,
    }
}

fn set_open(state: &mut AppState, open: bool) -> bool {
    if state.modal_open == open {
        return false;
    }
    state.modal_open = open;
    true
}
