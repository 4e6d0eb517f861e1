//! Dialogue manager contract
//!
//! A dialogue manager consumes acts from the interlocutor and, on request,
//! produces the next act of the system. Callers decide the turn order: a
//! manager may be driven strictly turn by turn or asked for several acts
//! without new input in between. Internal state belongs to the concrete
//! policy.

use thiserror::Error;

use crate::value_objects::{Concepts, DialogueAct};

pub mod strategies;

pub use strategies::{ResponseRule, RuleBasedDialogueManager, RuleSet, ScriptedDialogueManager};

/// Result type for dialogue manager operations
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Errors raised by dialogue policies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    /// The policy has nothing to say in its current state
    #[error("no act available in the current dialogue state")]
    NoPendingAct,

    /// The policy cannot handle the incoming act
    #[error("act {act:?} is not handled by this dialogue policy")]
    UnexpectedAct { act: String },

    /// The policy is misconfigured
    #[error("dialogue policy failed: {reason}")]
    Policy { reason: String },
}

/// Turn processor implemented by every dialogue policy
pub trait DialogueManager {
    /// Process an act and its concepts received from the interlocutor
    fn process_act(&mut self, act: &str, concepts: Concepts) -> DialogueResult<()> {
        self.process_dialogue_act(DialogueAct::with_concepts(act, concepts))
    }

    /// Update the internal state with an act received from the interlocutor
    fn process_dialogue_act(&mut self, dialogue_act: DialogueAct) -> DialogueResult<()>;

    /// Next act of the system, chosen from the current state. The state
    /// includes at least the last processed act.
    fn next_act(&mut self) -> DialogueResult<DialogueAct>;

    /// Process one incoming act and answer it with exactly one act
    fn take_turn(&mut self, act: &str, concepts: Concepts) -> DialogueResult<DialogueAct> {
        self.process_act(act, concepts)?;
        self.next_act()
    }
}
