//! Declarative machine descriptions.
//!
//! Hosts that load their UI from data describe each element's states as
//! JSON. Durations accept plain seconds or suffixed strings (`"200ms"`,
//! `"0.2s"`); attribute values accept numbers, percentages, channel arrays
//! and hex colors.

use crate::builder::template::reject_failures;
use crate::builder::{DefinitionCheck, MachineTemplateBuilder};
use crate::core::{AttributeSet, AttributeValue, DEFAULT_HISTORY_LIMIT};
use crate::engine::{MachineTemplate, Rebound, StateMachine, StateMachineError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use stillwater::validation::Validation;

/// A transition duration as written in a definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationDefinition {
    Seconds(f64),
    Text(String),
}

/// An attribute value as written in a definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDefinition {
    Number(f64),
    Channels(Vec<f64>),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub from: String,
    pub to: String,
    pub duration: DurationDefinition,
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
}

/// Complete description of one element's state machine.
///
/// # Example
///
/// ```rust
/// use blendstate::host::MachineDefinition;
///
/// let definition = MachineDefinition::from_json(r#"{
///     "initial": "standby",
///     "states": {
///         "standby": { "opacity": "50%" },
///         "present": { "opacity": 1.0 }
///     },
///     "transitions": [
///         { "from": "standby", "to": "present", "duration": "200ms" }
///     ]
/// }"#)?;
///
/// let mut machine = definition.build()?;
/// machine.set_state("present")?;
/// assert!(machine.drive(0.1)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    pub initial: String,
    pub states: BTreeMap<String, BTreeMap<String, ValueDefinition>>,
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
    #[serde(default)]
    pub trigger: Option<Rebound>,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_interpolation() -> String {
    "linear".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl MachineDefinition {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse every value and duration, then build the shared template.
    ///
    /// All malformed values are logged; the first one is returned.
    pub fn template(&self) -> Result<Arc<MachineTemplate>, StateMachineError> {
        let mut checks: Vec<DefinitionCheck> = Vec::new();
        let mut builder = MachineTemplateBuilder::new().history_limit(self.history_limit);

        for (id, values) in &self.states {
            let mut attributes = AttributeSet::new();
            for (name, value) in values {
                match value.parse(name) {
                    Ok(value) => {
                        attributes.insert(name.clone(), value);
                    }
                    Err(error) => checks.push(Validation::fail(error)),
                }
            }
            builder = builder.state(id.clone(), attributes);
        }

        for transition in &self.transitions {
            match transition.duration.seconds(&transition.from, &transition.to) {
                Ok(seconds) => {
                    builder = builder.transition(
                        transition.from.clone(),
                        transition.to.clone(),
                        seconds,
                        transition.interpolation.clone(),
                    );
                }
                Err(error) => checks.push(Validation::fail(error)),
            }
        }

        if let Some(rebound) = &self.trigger {
            builder = builder.trigger(rebound.clone());
        }

        reject_failures(Validation::all_vec(checks).map(|_| ()))?;
        builder.build()
    }

    /// Build an engine settled on the initial state.
    pub fn build(&self) -> Result<StateMachine, StateMachineError> {
        StateMachine::new(self.template()?, &self.initial)
    }
}

impl DurationDefinition {
    /// Duration in seconds. Sign and finiteness are checked by the builder.
    pub fn seconds(&self, from: &str, to: &str) -> Result<f64, StateMachineError> {
        match self {
            DurationDefinition::Seconds(seconds) => Ok(*seconds),
            DurationDefinition::Text(text) => {
                parse_duration(text).ok_or_else(|| StateMachineError::InvalidValue {
                    attribute: format!("{from} -> {to}"),
                    value: text.clone(),
                })
            }
        }
    }
}

impl ValueDefinition {
    pub fn parse(&self, attribute: &str) -> Result<AttributeValue, StateMachineError> {
        match self {
            ValueDefinition::Number(value) => Ok(AttributeValue::number(*value)),
            ValueDefinition::Channels(values) => Ok(AttributeValue::channels(values)),
            ValueDefinition::Text(text) => {
                parse_value(text).ok_or_else(|| StateMachineError::InvalidValue {
                    attribute: attribute.to_string(),
                    value: text.clone(),
                })
            }
        }
    }
}

/// Parse `"200ms"`, `"0.2s"` or `"0.2"` into seconds.
pub fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Some(millis) = text.strip_suffix("ms") {
        return millis.trim().parse::<f64>().ok().map(|ms| ms / 1000.0);
    }
    let seconds = text.strip_suffix('s').unwrap_or(text);
    seconds.trim().parse().ok()
}

/// Parse a textual attribute value: a number, a percentage or a hex color.
pub fn parse_value(text: &str) -> Option<AttributeValue> {
    let text = text.trim();
    if let Some(percent) = text.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f64>()
            .ok()
            .map(|p| AttributeValue::number(p / 100.0));
    }
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex_color(hex).map(|rgba| AttributeValue::channels(&rgba));
    }
    text.parse().ok().map(AttributeValue::number)
}

/// `rrggbb` or `rrggbbaa` into RGBA channels in `[0, 1]`.
fn parse_hex_color(hex: &str) -> Option<[f64; 4]> {
    if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut rgba = [1.0; 4];
    for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        let digits = hex.get(i * 2..i * 2 + 2)?;
        *channel = f64::from(u8::from_str_radix(digits, 16).ok()?) / 255.0;
    }
    Some(rgba)
}
