//! Free-text pattern generation.
//!
//! An interpreter turns a prompt into a [`PatternPatch`]; [`apply_pattern`]
//! turns the patch into a full replacement grid. Interpretation is delegated
//! to an external text model in production and to a fixed stub in tests.

pub mod gemini;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::units::{DisplayUnit, UnitId};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service returned an empty response")]
    EmptyResponse,
    #[error("could not parse pattern: {0}")]
    Malformed(String),
    #[error("generation worker exited without a result")]
    WorkerLost,
}

/// Sparse result of interpreting a prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternPatch {
    pub activate: BTreeSet<UnitId>,
    pub overrides: BTreeMap<UnitId, String>,
}

pub trait PatternInterpreter: Send + Sync {
    fn interpret(&self, prompt: &str, unit_count: usize) -> Result<PatternPatch, GenerationError>;
}

/// Full overwrite: units missing from `activate` are switched off.
pub fn apply_pattern(patch: &PatternPatch, units: &[DisplayUnit]) -> Vec<DisplayUnit> {
    units
        .iter()
        .map(|unit| DisplayUnit {
            is_on: patch.activate.contains(&unit.id),
            value: patch
                .overrides
                .get(&unit.id)
                .cloned()
                .unwrap_or_else(|| unit.value.clone()),
            ..unit.clone()
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPattern {
    active_indices: Vec<i64>,
    #[serde(default)]
    values: Option<Vec<RawValue>>,
}

#[derive(Deserialize)]
struct RawValue {
    id: i64,
    #[serde(default)]
    val: Value,
}

/// Parses `{ "activeIndices": [..], "values": [{ "id", "val" }] }`.
pub fn parse_pattern_response(text: &str) -> Result<PatternPatch, GenerationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let raw: RawPattern =
        serde_json::from_str(text).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let activate = raw.active_indices.into_iter().filter_map(to_unit_id).collect();
    let overrides = raw
        .values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| {
            let id = to_unit_id(v.id)?;
            let val = match v.val {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((id, val))
        })
        .collect();

    Ok(PatternPatch { activate, overrides })
}

fn to_unit_id(raw: i64) -> Option<UnitId> {
    u16::try_from(raw).ok().and_then(UnitId::new)
}

/// A generation call running on a worker thread.
pub struct PendingGeneration {
    rx: Receiver<Result<PatternPatch, GenerationError>>,
}

impl PendingGeneration {
    pub fn spawn(interpreter: Arc<dyn PatternInterpreter>, prompt: String, unit_count: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = interpreter.interpret(&prompt, unit_count);
            // The receiver is gone only if the app already quit.
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// `None` while the call is still running.
    pub fn poll(&self) -> Option<Result<PatternPatch, GenerationError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GenerationError::WorkerLost)),
        }
    }
}
