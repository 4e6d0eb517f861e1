//! Recorder for text units
//!
//! Line layout: creator of the grounding unit, `created_at`, current text,
//! then the variant's trailing fields: `dispatch` for generated text;
//! `predictions`, `stability`, `confidence` and `final` for speech
//! recognition results.

use super::{RecordFormat, Recorder, render};
use crate::error::{RecorderError, RecorderResult};
use crate::units::{IncrementalUnit, IuKind, TextIu};

/// Writes received text units to file
pub type TextRecorder = Recorder<TextFormat>;

/// Record layout for text units
#[derive(Debug, Clone, Copy)]
pub struct TextFormat;

impl TextFormat {
    fn text_fields(iu: &TextIu) -> Vec<String> {
        vec![
            iu.grounded_in().creator.to_string(),
            iu.base().created_at().to_string(),
            iu.text().to_string(),
        ]
    }
}

impl RecordFormat for TextFormat {
    const NAME: &'static str = "Text Recorder Module";
    const DESCRIPTION: &'static str = "A module that writes received TextIUs to file";
    const INPUT_IUS: &'static [IuKind] = &[
        IuKind::Text,
        IuKind::GeneratedText,
        IuKind::SpeechRecognition,
    ];

    fn fields(unit: &IncrementalUnit) -> RecorderResult<Vec<String>> {
        match unit {
            IncrementalUnit::Text(iu) => Ok(Self::text_fields(iu)),
            IncrementalUnit::GeneratedText(iu) => {
                let mut fields = Self::text_fields(&iu.text);
                fields.push(render::flag(iu.dispatch).to_string());
                Ok(fields)
            }
            IncrementalUnit::SpeechRecognition(iu) => {
                let mut fields = Self::text_fields(&iu.text);
                fields.push(render::sequence(&iu.predictions));
                fields.push(render::number(iu.stability));
                fields.push(render::number(iu.confidence));
                fields.push(render::flag(iu.is_final).to_string());
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
    use crate::units::{GeneratedTextIu, IuBase, SpeechRecognitionIu};
    use crate::value_objects::{CreatedAt, GroundingRef, ModuleId};
    use uuid::Uuid;

    fn grounding(creator: &str) -> GroundingRef {
        GroundingRef::new(Uuid::new_v4(), ModuleId::new(creator))
    }

    #[test]
    fn test_speech_recognition_line() {
        let recorder = TextRecorder::at_path("unused.tsv").unwrap();
        let mut iu = SpeechRecognitionIu::new(
            IuBase::at(ModuleId::new("asr"), CreatedAt::from_secs(200.0)),
            grounding("B"),
        );
        iu.set_asr_results(vec!["hi".into(), "hey".into()], "hi", 0.8, 0.95, false);

        assert_eq!(
            recorder.format_record(&iu.into()).unwrap(),
            "B\t200\thi\t['hi', 'hey']\t0.8\t0.95\tFalse\n"
        );
    }

    #[test]
    fn test_creator_comes_from_grounding() {
        let text = TextIu::new(
            IuBase::at(ModuleId::new("nlg"), CreatedAt::from_secs(3.25)),
            grounding("dialogue-manager"),
            "hello there",
        );
        let fields = TextFormat::fields(&GeneratedTextIu::new(text, false).into()).unwrap();

        assert_eq!(fields, vec!["dialogue-manager", "3.25", "hello there", "False"]);
    }

    #[test]
    fn test_field_counts_per_variant() {
        let text = TextIu::new(IuBase::new(ModuleId::new("asr")), grounding("mic"), "a");
        let asr = SpeechRecognitionIu::new(IuBase::new(ModuleId::new("asr")), grounding("mic"));

        assert_eq!(TextFormat::fields(&text.clone().into()).unwrap().len(), 3);
        assert_eq!(
            TextFormat::fields(&GeneratedTextIu::new(text, true).into()).unwrap().len(),
            4
        );
        assert_eq!(TextFormat::fields(&asr.into()).unwrap().len(), 7);
    }
}
