use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::automaton::{
    Letter, State,
    dpda::{DefinitionError, Dpda},
    transition::Transition,
};

pub const CURRENT_VERSION: &str = "1.0";
const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// The serialization mirror of a [Dpda]. Sets become sorted vectors so the
/// output is stable, and converting back re-runs the construction-time
/// invariant checks, so a loaded definition is always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableDpda<Q: State, S: Letter> {
    pub states: Vec<Q>,
    pub input_alphabet: Vec<S>,
    pub stack_alphabet: Vec<S>,
    pub initial_state: Q,
    pub initial_stack_symbol: S,
    pub accept_states: Vec<Q>,
    pub transitions: Vec<Transition<Q, S>>,
}

impl<Q: State, S: Letter> From<&Dpda<Q, S>> for SerializableDpda<Q, S> {
    fn from(dpda: &Dpda<Q, S>) -> Self {
        SerializableDpda {
            states: dpda.states().iter().cloned().sorted().collect(),
            input_alphabet: dpda.input_alphabet().iter().cloned().sorted().collect(),
            stack_alphabet: dpda.stack_alphabet().iter().cloned().sorted().collect(),
            initial_state: dpda.initial_state().clone(),
            initial_stack_symbol: dpda.initial_stack_symbol().clone(),
            accept_states: dpda.accept_states().iter().cloned().sorted().collect(),
            transitions: dpda.transitions().to_vec(),
        }
    }
}

impl<Q: State, S: Letter> TryFrom<SerializableDpda<Q, S>> for Dpda<Q, S> {
    type Error = DefinitionError;

    fn try_from(dpda: SerializableDpda<Q, S>) -> Result<Self, Self::Error> {
        Dpda::new(
            dpda.states.into_iter().collect(),
            dpda.input_alphabet.into_iter().collect(),
            dpda.stack_alphabet.into_iter().collect(),
            dpda.initial_state,
            dpda.initial_stack_symbol,
            dpda.accept_states.into_iter().collect(),
            dpda.transitions,
        )
    }
}

/// The on-disk envelope around a serialized definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpdaFile<Q: State, S: Letter> {
    pub version: String,
    pub dpda: SerializableDpda<Q, S>,
}

pub fn to_json<Q, S>(dpda: &Dpda<Q, S>) -> anyhow::Result<String>
where
    Q: State + Serialize,
    S: Letter + Serialize,
{
    let file = DpdaFile {
        version: CURRENT_VERSION.to_string(),
        dpda: dpda.into(),
    };

    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn from_json<Q, S>(json: &str) -> anyhow::Result<Dpda<Q, S>>
where
    Q: State + DeserializeOwned,
    S: Letter + DeserializeOwned,
{
    let file: DpdaFile<Q, S> =
        serde_json::from_str(json).context("failed to parse DPDA definition")?;

    if !SUPPORTED_VERSIONS.contains(&file.version.as_str()) {
        anyhow::bail!("unsupported format version: {}", file.version);
    }

    Ok(Dpda::try_from(file.dpda)?)
}

pub fn save_to_file<Q, S>(dpda: &Dpda<Q, S>, path: impl AsRef<Path>) -> anyhow::Result<()>
where
    Q: State + Serialize,
    S: Letter + Serialize,
{
    let path = path.as_ref();
    std::fs::write(path, to_json(dpda)?)
        .with_context(|| format!("failed to write '{}'", path.display()))
}

pub fn load_from_file<Q, S>(path: impl AsRef<Path>) -> anyhow::Result<Dpda<Q, S>>
where
    Q: State + DeserializeOwned,
    S: Letter + DeserializeOwned,
{
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    from_json(&json).with_context(|| format!("invalid DPDA definition in '{}'", path.display()))
}
