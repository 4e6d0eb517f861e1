//! Concrete dialogue policies

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use super::{DialogueError, DialogueManager, DialogueResult};
use crate::value_objects::{Concepts, DialogueAct};

/// How to answer one incoming act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRule {
    /// Act label of the answer
    pub respond_with: String,
    /// Concepts always attached to the answer
    #[serde(default)]
    pub concepts: Concepts,
    /// Concepts copied from the incoming act when present
    #[serde(default)]
    pub carry_concepts: Vec<String>,
}

impl ResponseRule {
    pub fn new(respond_with: impl Into<String>) -> Self {
        Self {
            respond_with: respond_with.into(),
            concepts: Concepts::new(),
            carry_concepts: Vec::new(),
        }
    }

    pub fn with_concept(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.concepts.insert(key.into(), value);
        self
    }

    pub fn carrying(mut self, key: impl Into<String>) -> Self {
        self.carry_concepts.push(key.into());
        self
    }

    fn answer(&self, incoming: &DialogueAct) -> DialogueAct {
        let mut concepts = self.concepts.clone();
        for key in &self.carry_concepts {
            if let Some(value) = incoming.concept(key) {
                concepts.insert(key.clone(), value.clone());
            }
        }
        DialogueAct::with_concepts(self.respond_with.clone(), concepts)
    }
}

/// Rule table of a [`RuleBasedDialogueManager`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Answers keyed by incoming act label
    #[serde(default)]
    pub rules: HashMap<String, ResponseRule>,
    /// Act used for incoming acts without a rule
    #[serde(default)]
    pub fallback: Option<String>,
    /// Act used before anything was processed
    #[serde(default)]
    pub opening: Option<DialogueAct>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, incoming: impl Into<String>, rule: ResponseRule) -> Self {
        self.rules.insert(incoming.into(), rule);
        self
    }

    pub fn with_fallback(mut self, act: impl Into<String>) -> Self {
        self.fallback = Some(act.into());
        self
    }

    pub fn with_opening(mut self, act: DialogueAct) -> Self {
        self.opening = Some(act);
        self
    }

    /// Reject tables that would answer with an empty act label
    pub fn validate(&self) -> DialogueResult<()> {
        if let Some((incoming, _)) = self
            .rules
            .iter()
            .find(|(_, rule)| rule.respond_with.trim().is_empty())
        {
            return Err(DialogueError::Policy {
                reason: format!("rule for {incoming:?} has an empty response act"),
            });
        }
        if self.fallback.as_deref().is_some_and(|act| act.trim().is_empty()) {
            return Err(DialogueError::Policy {
                reason: "fallback act is empty".to_string(),
            });
        }
        if self
            .opening
            .as_ref()
            .is_some_and(|act| act.act.trim().is_empty())
        {
            return Err(DialogueError::Policy {
                reason: "opening act is empty".to_string(),
            });
        }
        Ok(())
    }

    fn handles(&self, act: &str) -> bool {
        self.rules.contains_key(act) || self.fallback.is_some()
    }
}

/// Answers the last processed act from a table of rules.
///
/// The answer depends only on the last processed act, so asking for the next
/// act repeatedly without new input yields the same answer.
#[derive(Debug, Clone)]
pub struct RuleBasedDialogueManager {
    rules: RuleSet,
    last_act: Option<DialogueAct>,
    turns_processed: u64,
}

impl RuleBasedDialogueManager {
    pub fn new(rules: RuleSet) -> DialogueResult<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            last_act: None,
            turns_processed: 0,
        })
    }

    pub fn last_act(&self) -> Option<&DialogueAct> {
        self.last_act.as_ref()
    }

    pub fn turns_processed(&self) -> u64 {
        self.turns_processed
    }
}

impl DialogueManager for RuleBasedDialogueManager {
    fn process_dialogue_act(&mut self, dialogue_act: DialogueAct) -> DialogueResult<()> {
        if !self.rules.handles(&dialogue_act.act) {
            return Err(DialogueError::UnexpectedAct {
                act: dialogue_act.act,
            });
        }

        debug!(act = %dialogue_act, "processing dialogue act");
        self.last_act = Some(dialogue_act);
        self.turns_processed += 1;
        Ok(())
    }

    fn next_act(&mut self) -> DialogueResult<DialogueAct> {
        let next = match &self.last_act {
            None => self.rules.opening.clone().ok_or(DialogueError::NoPendingAct)?,
            Some(last) => match (self.rules.rules.get(&last.act), &self.rules.fallback) {
                (Some(rule), _) => rule.answer(last),
                (None, Some(fallback)) => DialogueAct::new(fallback.clone()),
                (None, None) => {
                    return Err(DialogueError::UnexpectedAct {
                        act: last.act.clone(),
                    });
                }
            },
        };

        debug!(act = %next, "next dialogue act");
        Ok(next)
    }
}

/// Plays back a fixed script of acts regardless of the input.
///
/// Every call to `next_act` consumes one scripted act, so the manager can
/// speak several times without hearing back from the interlocutor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogueManager {
    script: VecDeque<DialogueAct>,
    history: Vec<DialogueAct>,
}

impl ScriptedDialogueManager {
    pub fn new(script: impl IntoIterator<Item = DialogueAct>) -> Self {
        Self {
            script: script.into_iter().collect(),
            history: Vec::new(),
        }
    }

    /// Acts received from the interlocutor so far
    pub fn history(&self) -> &[DialogueAct] {
        &self.history
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DialogueManager for ScriptedDialogueManager {
    fn process_dialogue_act(&mut self, dialogue_act: DialogueAct) -> DialogueResult<()> {
        debug!(act = %dialogue_act, "recording dialogue act");
        self.history.push(dialogue_act);
        Ok(())
    }

    fn next_act(&mut self) -> DialogueResult<DialogueAct> {
        let next = self.script.pop_front().ok_or(DialogueError::NoPendingAct)?;
        debug!(act = %next, remaining = self.script.len(), "next scripted act");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_rules() -> RuleSet {
        RuleSet::new()
            .with_rule("greet", ResponseRule::new("greet"))
            .with_rule(
                "request",
                ResponseRule::new("inform")
                    .carrying("topic")
                    .with_concept("source", json!("forecast")),
            )
    }

    #[test]
    fn test_rule_answers_last_act() {
        let mut manager = RuleBasedDialogueManager::new(weather_rules()).unwrap();

        let mut concepts = Concepts::new();
        concepts.insert("topic".to_string(), json!("weather"));
        concepts.insert("mood".to_string(), json!("curious"));
        manager.process_act("request", concepts).unwrap();

        let next = manager.next_act().unwrap();
        assert_eq!(next.act, "inform");
        assert_eq!(next.concept("topic"), Some(&json!("weather")));
        assert_eq!(next.concept("source"), Some(&json!("forecast")));
        assert_eq!(next.concept("mood"), None);
    }

    #[test]
    fn test_unknown_act_without_fallback_is_rejected() {
        let mut manager = RuleBasedDialogueManager::new(weather_rules()).unwrap();
        manager.process_act("greet", Concepts::new()).unwrap();

        let result = manager.process_act("insult", Concepts::new());
        assert_eq!(
            result,
            Err(DialogueError::UnexpectedAct {
                act: "insult".to_string()
            })
        );
        // state untouched
        assert_eq!(manager.last_act().map(|a| a.act.as_str()), Some("greet"));
        assert_eq!(manager.turns_processed(), 1);
    }

    #[test]
    fn test_fallback_and_opening() {
        let mut manager = RuleBasedDialogueManager::new(
            weather_rules()
                .with_fallback("clarify")
                .with_opening(DialogueAct::new("greet").with_concept("name", json!("Ada"))),
        )
        .unwrap();

        let opening = manager.next_act().unwrap();
        assert_eq!(opening.act, "greet");

        manager.process_act("mumble", Concepts::new()).unwrap();
        assert_eq!(manager.next_act().unwrap(), DialogueAct::new("clarify"));
    }

    #[test]
    fn test_no_opening_means_nothing_to_say() {
        let mut manager = RuleBasedDialogueManager::new(weather_rules()).unwrap();
        assert_eq!(manager.next_act(), Err(DialogueError::NoPendingAct));
    }

    #[test]
    fn test_rule_set_from_json() {
        let rules: RuleSet = serde_json::from_value(json!({
            "rules": {
                "request": {"respond_with": "inform", "carry_concepts": ["topic"]}
            },
            "fallback": "clarify"
        }))
        .unwrap();

        assert_eq!(rules.rules["request"].respond_with, "inform");
        assert!(rules.rules["request"].concepts.is_empty());
        assert_eq!(rules.fallback.as_deref(), Some("clarify"));
        assert!(rules.opening.is_none());
    }

    #[test]
    fn test_empty_response_acts_are_rejected() {
        let result = RuleBasedDialogueManager::new(
            weather_rules().with_rule("bye", ResponseRule::new(" ")),
        );
        assert!(matches!(result, Err(DialogueError::Policy { .. })));

        let result = RuleBasedDialogueManager::new(weather_rules().with_fallback(""));
        assert_eq!(
            result.err(),
            Some(DialogueError::Policy {
                reason: "fallback act is empty".to_string()
            })
        );

        let result =
            RuleBasedDialogueManager::new(weather_rules().with_opening(DialogueAct::new("")));
        assert!(matches!(result, Err(DialogueError::Policy { .. })));
    }

    #[test]
    fn test_script_runs_out() {
        let mut manager = ScriptedDialogueManager::new([DialogueAct::new("greet")]);
        assert_eq!(manager.remaining(), 1);
        assert_eq!(manager.next_act().unwrap().act, "greet");
        assert_eq!(manager.next_act(), Err(DialogueError::NoPendingAct));
    }
}
