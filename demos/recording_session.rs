//! Recording Session Example
//!
//! This example demonstrates how to:
//! - Configure and open dialogue act and text recorders
//! - Drive a rule based dialogue manager turn by turn
//! - Record recognized speech and the manager's answers
//! - Shut the recorders down at teardown

use anyhow::Result;
use cim_domain_incremental::{
    ConsumingModule, DialogueActIu, DialogueActRecorder, DialogueManager, DispatchableActIu,
    GroundingRef, IncrementalUnit, IuBase, ModuleId, RecorderConfig, ResponseRule,
    RuleBasedDialogueManager, RuleSet, SpeechRecognitionIu, TextRecorder,
};
use serde_json::json;
use std::env;
use std::fs;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Incremental Dialogue Recording Example ===\n");

    let out_dir = env::temp_dir().join("incremental-recording-demo");
    fs::create_dir_all(&out_dir)?;

    // Step 1: Open the recorders
    println!("1. Opening recorders in {}", out_dir.display());
    let mut act_recorder = DialogueActRecorder::new(RecorderConfig::new(out_dir.join("acts.tsv")))?;
    let mut text_recorder =
        TextRecorder::new(RecorderConfig::new(out_dir.join("text.csv")).with_separator(","))?;
    act_recorder.setup()?;
    text_recorder.setup()?;

    // Step 2: Configure the dialogue policy
    let rules = RuleSet::new()
        .with_rule("greet", ResponseRule::new("greet"))
        .with_rule("request", ResponseRule::new("inform").carrying("topic"))
        .with_fallback("clarify");
    let mut manager = RuleBasedDialogueManager::new(rules)?;

    let asr = ModuleId::new("asr");
    let nlu = ModuleId::new("nlu");
    let dm = ModuleId::new("dm");
    let microphone = ModuleId::new("microphone");

    let utterances = [
        ("hello", "greet", json!({})),
        ("weather please", "request", json!({"topic": "weather"})),
        ("hmm", "mumble", json!({})),
    ];

    // Step 3: Run the turns
    println!("2. Running {} turns...", utterances.len());
    for (text, act, concepts) in utterances {
        let mut hypothesis = SpeechRecognitionIu::new(
            IuBase::new(asr.clone()),
            GroundingRef::new(uuid::Uuid::new_v4(), microphone.clone()),
        );
        hypothesis.set_asr_results(vec![text.to_string()], text, 1.0, 0.9, true);
        let recognized = IncrementalUnit::from(hypothesis);
        text_recorder.process_iu(&recognized)?;

        let concepts = serde_json::from_value(concepts)?;
        let understood = DialogueActIu::new(IuBase::new(nlu.clone()), act, concepts);
        act_recorder.process_iu(&understood.clone().into())?;

        let answer = manager.take_turn(&understood.act, understood.concepts)?;
        println!("   {text:>16} -> {answer}");

        let produced = DispatchableActIu::new(
            DialogueActIu::new(IuBase::new(dm.clone()), answer.act, answer.concepts),
            true,
        );
        act_recorder.process_iu(&produced.into())?;
    }

    // Step 4: Teardown
    println!("\n3. Shutting down recorders...");
    act_recorder.shutdown();
    text_recorder.shutdown();

    println!("\n--- acts.tsv ---\n{}", fs::read_to_string(act_recorder.path())?);
    println!("--- text.csv ---\n{}", fs::read_to_string(text_recorder.path())?);

    Ok(())
}
