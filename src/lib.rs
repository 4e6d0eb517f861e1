//! Incremental dialogue domain module
//!
//! Incremental units (IUs) are timestamped, attributed pieces of partial
//! information passed between the components of a dialogue pipeline. This
//! crate provides:
//! - The closed family of IU variants (dialogue acts, text, speech recognition)
//! - Recorders that persist consumed IUs as flat, tab separated lines
//! - The dialogue manager contract and a few concrete policies
//!
//! Wiring modules into a pipeline and delivering IUs is left to the runtime
//! that hosts them.

pub mod error;
pub mod manager;
pub mod recorders;
pub mod units;
pub mod value_objects;

// Re-export main types
pub use error::{RecorderError, RecorderResult};

pub use manager::{
    DialogueError, DialogueManager, DialogueResult, ResponseRule, RuleBasedDialogueManager,
    RuleSet, ScriptedDialogueManager,
};

pub use recorders::{
    ConsumingModule, DEFAULT_SEPARATOR, DialogueActFormat, DialogueActRecorder, RecordFormat,
    Recorder, RecorderConfig, TextFormat, TextRecorder,
};

pub use units::{
    DialogueActIu, DispatchableActIu, GeneratedTextIu, IncrementalUnit, IuBase, IuKind,
    SpeechRecognitionIu, TextIu,
};

pub use value_objects::{Concepts, CreatedAt, DialogueAct, GroundingRef, ModuleId};
