//! Incremental units flowing through the dialogue pipeline
//!
//! Every unit carries a common base (identifier, creator, creation time) set
//! by its producer. The variant family is closed: consumers dispatch on
//! [`IncrementalUnit`] with an exhaustive match.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::value_objects::{Concepts, CreatedAt, GroundingRef, ModuleId};

/// Fields shared by every incremental unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IuBase {
    iu_id: Uuid,
    creator: ModuleId,
    created_at: CreatedAt,
}

impl IuBase {
    /// Create a base stamped with the current time
    pub fn new(creator: ModuleId) -> Self {
        Self::at(creator, CreatedAt::now())
    }

    /// Create a base with an explicit creation time
    pub fn at(creator: ModuleId, created_at: CreatedAt) -> Self {
        Self {
            iu_id: Uuid::new_v4(),
            creator,
            created_at,
        }
    }

    pub fn iu_id(&self) -> Uuid {
        self.iu_id
    }

    pub fn creator(&self) -> &ModuleId {
        &self.creator
    }

    pub fn created_at(&self) -> CreatedAt {
        self.created_at
    }
}

/// Kind tag of an incremental unit variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IuKind {
    DialogueAct,
    DispatchableAct,
    Text,
    GeneratedText,
    SpeechRecognition,
}

impl IuKind {
    pub fn name(&self) -> &'static str {
        match self {
            IuKind::DialogueAct => "DialogueActIU",
            IuKind::DispatchableAct => "DispatchableActIU",
            IuKind::Text => "TextIU",
            IuKind::GeneratedText => "GeneratedTextIU",
            IuKind::SpeechRecognition => "SpeechRecognitionIU",
        }
    }
}

impl fmt::Display for IuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dialogue act produced by a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueActIu {
    base: IuBase,
    pub act: String,
    pub concepts: Concepts,
}

impl DialogueActIu {
    pub fn new(base: IuBase, act: impl Into<String>, concepts: Concepts) -> Self {
        Self {
            base,
            act: act.into(),
            concepts,
        }
    }

    pub fn base(&self) -> &IuBase {
        &self.base
    }

    /// Replace the act and its concepts
    pub fn set_act(&mut self, act: impl Into<String>, concepts: Concepts) {
        self.act = act.into();
        self.concepts = concepts;
    }
}

/// A dialogue act that records whether it was sent to the interlocutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchableActIu {
    pub dialogue_act: DialogueActIu,
    pub dispatch: bool,
}

impl DispatchableActIu {
    pub fn new(dialogue_act: DialogueActIu, dispatch: bool) -> Self {
        Self {
            dialogue_act,
            dispatch,
        }
    }

    pub fn base(&self) -> &IuBase {
        self.dialogue_act.base()
    }
}

/// Text derived from an upstream unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextIu {
    base: IuBase,
    grounded_in: GroundingRef,
    text: String,
}

impl TextIu {
    pub fn new(base: IuBase, grounded_in: GroundingRef, text: impl Into<String>) -> Self {
        Self {
            base,
            grounded_in,
            text: text.into(),
        }
    }

    pub fn base(&self) -> &IuBase {
        &self.base
    }

    pub fn grounded_in(&self) -> &GroundingRef {
        &self.grounded_in
    }

    /// Current text of the unit. May change until the unit is final.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text with a newer hypothesis
    pub fn revise(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Text produced by a generation component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTextIu {
    pub text: TextIu,
    pub dispatch: bool,
}

impl GeneratedTextIu {
    pub fn new(text: TextIu, dispatch: bool) -> Self {
        Self { text, dispatch }
    }
}

/// Incremental speech recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecognitionIu {
    pub text: TextIu,
    /// Alternative hypotheses, best first
    pub predictions: Vec<String>,
    /// How unlikely the current hypothesis is to change
    pub stability: f64,
    pub confidence: f64,
    /// Set once no further revision will occur
    pub is_final: bool,
}

impl SpeechRecognitionIu {
    /// Create an empty hypothesis grounded in an upstream unit
    pub fn new(base: IuBase, grounded_in: GroundingRef) -> Self {
        Self {
            text: TextIu::new(base, grounded_in, ""),
            predictions: Vec::new(),
            stability: 0.0,
            confidence: 0.0,
            is_final: false,
        }
    }

    /// Update the unit with the latest recognizer output
    pub fn set_asr_results(
        &mut self,
        predictions: Vec<String>,
        text: impl Into<String>,
        stability: f64,
        confidence: f64,
        is_final: bool,
    ) {
        self.predictions = predictions;
        self.text.revise(text);
        self.stability = stability;
        self.confidence = confidence;
        self.is_final = is_final;
    }
}

/// The closed family of incremental units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IncrementalUnit {
    DialogueAct(DialogueActIu),
    DispatchableAct(DispatchableActIu),
    Text(TextIu),
    GeneratedText(GeneratedTextIu),
    SpeechRecognition(SpeechRecognitionIu),
}

impl IncrementalUnit {
    pub fn kind(&self) -> IuKind {
        match self {
            IncrementalUnit::DialogueAct(_) => IuKind::DialogueAct,
            IncrementalUnit::DispatchableAct(_) => IuKind::DispatchableAct,
            IncrementalUnit::Text(_) => IuKind::Text,
            IncrementalUnit::GeneratedText(_) => IuKind::GeneratedText,
            IncrementalUnit::SpeechRecognition(_) => IuKind::SpeechRecognition,
        }
    }

    pub fn base(&self) -> &IuBase {
        match self {
            IncrementalUnit::DialogueAct(iu) => iu.base(),
            IncrementalUnit::DispatchableAct(iu) => iu.base(),
            IncrementalUnit::Text(iu) => iu.base(),
            IncrementalUnit::GeneratedText(iu) => iu.text.base(),
            IncrementalUnit::SpeechRecognition(iu) => iu.text.base(),
        }
    }
}

impl From<DialogueActIu> for IncrementalUnit {
    fn from(iu: DialogueActIu) -> Self {
        IncrementalUnit::DialogueAct(iu)
    }
}

impl From<DispatchableActIu> for IncrementalUnit {
    fn from(iu: DispatchableActIu) -> Self {
        IncrementalUnit::DispatchableAct(iu)
    }
}

impl From<TextIu> for IncrementalUnit {
    fn from(iu: TextIu) -> Self {
        IncrementalUnit::Text(iu)
    }
}

impl From<GeneratedTextIu> for IncrementalUnit {
    fn from(iu: GeneratedTextIu) -> Self {
        IncrementalUnit::GeneratedText(iu)
    }
}

impl From<SpeechRecognitionIu> for IncrementalUnit {
    fn from(iu: SpeechRecognitionIu) -> Self {
        IncrementalUnit::SpeechRecognition(iu)
    }
}
