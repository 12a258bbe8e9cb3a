//! Lifecycle enums with checked transitions.

use super::ValidationError;

/// A lifecycle enum whose legal moves are listed per state.
///
/// Implementors only list successors; checking and performing a move come
/// from the provided methods.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// States reachable in one step from `self`.
    fn next_states(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.next_states().contains(target)
    }

    /// Returns `target` if the move is legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "state_transition",
            format!("Cannot transition from {:?} to {:?}", self, target),
        ))
    }

    /// No further moves possible.
    fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }
}
