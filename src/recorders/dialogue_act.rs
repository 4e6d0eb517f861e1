//! Recorder for dialogue act units
//!
//! Line layout: `creator`, `created_at`, `act`, `concepts` (JSON) and, for
//! dispatchable acts only, the `dispatch` flag.

use super::{RecordFormat, Recorder, render};
use crate::error::{RecorderError, RecorderResult};
use crate::units::{DialogueActIu, IncrementalUnit, IuKind};

/// Writes dialogue acts to file
pub type DialogueActRecorder = Recorder<DialogueActFormat>;

/// Record layout for dialogue acts
#[derive(Debug, Clone, Copy)]
pub struct DialogueActFormat;

impl DialogueActFormat {
    fn act_fields(iu: &DialogueActIu) -> RecorderResult<Vec<String>> {
        Ok(vec![
            iu.base().creator().to_string(),
            iu.base().created_at().to_string(),
            iu.act.clone(),
            render::concepts_json(&iu.concepts)?,
        ])
    }
}

impl RecordFormat for DialogueActFormat {
    const NAME: &'static str = "Dialogue Act Recorder Module";
    const DESCRIPTION: &'static str = "A module that writes dialogue acts into a file.";
    const INPUT_IUS: &'static [IuKind] = &[IuKind::DialogueAct, IuKind::DispatchableAct];

    fn fields(unit: &IncrementalUnit) -> RecorderResult<Vec<String>> {
        match unit {
            IncrementalUnit::DialogueAct(iu) => Self::act_fields(iu),
            IncrementalUnit::DispatchableAct(iu) => {
                let mut fields = Self::act_fields(&iu.dialogue_act)?;
                fields.push(render::flag(iu.dispatch).to_string());
                Ok(fields)
            }
            other => Err(RecorderError::UnacceptedUnit {
                module: Self::NAME,
                kind: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorders::{ConsumingModule, RecorderConfig};
    use crate::units::{DispatchableActIu, IuBase, TextIu};
    use crate::value_objects::{Concepts, CreatedAt, GroundingRef, ModuleId};
    use serde_json::json;
    use uuid::Uuid;

    fn inform(creator: &str) -> DialogueActIu {
        let mut concepts = Concepts::new();
        concepts.insert("topic".to_string(), json!("weather"));
        DialogueActIu::new(
            IuBase::at(ModuleId::new(creator), CreatedAt::from_secs(100.0)),
            "inform",
            concepts,
        )
    }

    #[test]
    fn test_dispatchable_line_with_custom_separator() {
        let recorder =
            DialogueActRecorder::new(RecorderConfig::new("unused.csv").with_separator(","))
                .unwrap();
        let unit = IncrementalUnit::from(DispatchableActIu::new(inform("A"), true));

        assert_eq!(
            recorder.format_record(&unit).unwrap(),
            "A,100,inform,{\"topic\": \"weather\"},True\n"
        );
    }

    #[test]
    fn test_plain_act_has_four_fields() {
        let fields = DialogueActFormat::fields(&inform("nlu").into()).unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[3], r#"{"topic": "weather"}"#);
    }

    #[test]
    fn test_text_units_are_rejected() {
        let unit = IncrementalUnit::from(TextIu::new(
            IuBase::new(ModuleId::new("asr")),
            GroundingRef::new(Uuid::new_v4(), ModuleId::new("microphone")),
            "hello",
        ));

        let result = DialogueActFormat::fields(&unit);
        assert!(matches!(
            result,
            Err(RecorderError::UnacceptedUnit { kind: IuKind::Text, .. })
        ));
    }

    #[test]
    fn test_metadata() {
        let recorder = DialogueActRecorder::at_path("unused.tsv").unwrap();
        assert_eq!(recorder.name(), "Dialogue Act Recorder Module");
        assert!(recorder.accepts(IuKind::DispatchableAct));
        assert!(!recorder.accepts(IuKind::GeneratedText));
    }
}
