use std::{fmt::Display, path::Path};

use anyhow::Context;
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        dpda::{DefinitionError, Dpda, builder::DpdaBuilder},
        transition::Transition,
    },
    validation::{self, ValidationReport},
};

const SESSION_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    DuplicateName(String),
    UnknownName(String),
    NoCurrentDpda,
    /// A referenced state is not in the current builder's state set.
    UnknownState(String),
    /// A referenced symbol is not in the current builder's stack alphabet.
    UnknownSymbol(String),
    TransitionIndexOutOfRange(usize),
    Definition(DefinitionError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::DuplicateName(name) => {
                write!(f, "DPDA '{}' already exists in session", name)
            }
            SessionError::UnknownName(name) => write!(f, "DPDA '{}' not found in session", name),
            SessionError::NoCurrentDpda => write!(f, "no current DPDA selected"),
            SessionError::UnknownState(state) => write!(f, "state '{}' not in states", state),
            SessionError::UnknownSymbol(symbol) => {
                write!(f, "symbol '{}' not in stack alphabet", symbol)
            }
            SessionError::TransitionIndexOutOfRange(index) => {
                write!(f, "transition index {} out of range", index)
            }
            SessionError::Definition(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<DefinitionError> for SessionError {
    fn from(e: DefinitionError) -> Self {
        SessionError::Definition(e)
    }
}

/// A named store of definitions under construction.
///
/// This is the keyed registry the calling layer owns: builders live here by
/// name, one of them may be selected as current, and building snapshots an
/// immutable [Dpda] that the engine can use. The engine itself never touches
/// a session.
#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    dpdas: HashMap<String, DpdaBuilder<String, String>>,
    current: Option<String>,
    modified: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    version: String,
    session_name: String,
    current_dpda: Option<String>,
    dpdas: HashMap<String, DpdaBuilder<String, String>>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Session {
            name: name.into(),
            dpdas: HashMap::new(),
            current: None,
            modified: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// All DPDA names in the session, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.dpdas.keys().map(String::as_str).sorted().collect()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Creates a new empty builder under `name` and selects it.
    pub fn new_dpda(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        let name = name.into();
        if self.dpdas.contains_key(&name) {
            return Err(SessionError::DuplicateName(name));
        }

        self.dpdas.insert(name.clone(), DpdaBuilder::new());
        self.current = Some(name);
        self.modified = true;
        Ok(())
    }

    pub fn switch_to(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.dpdas.contains_key(name) {
            return Err(SessionError::UnknownName(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn delete_dpda(&mut self, name: &str) -> Result<(), SessionError> {
        if self.dpdas.remove(name).is_none() {
            return Err(SessionError::UnknownName(name.to_string()));
        }

        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        self.modified = true;
        Ok(())
    }

    pub fn rename_dpda(&mut self, old_name: &str, new_name: &str) -> Result<(), SessionError> {
        if self.dpdas.contains_key(new_name) {
            return Err(SessionError::DuplicateName(new_name.to_string()));
        }
        let builder = self
            .dpdas
            .remove(old_name)
            .ok_or_else(|| SessionError::UnknownName(old_name.to_string()))?;

        self.dpdas.insert(new_name.to_string(), builder);
        if self.current.as_deref() == Some(old_name) {
            self.current = Some(new_name.to_string());
        }
        self.modified = true;
        Ok(())
    }

    pub fn copy_dpda(&mut self, source: &str, target: &str) -> Result<(), SessionError> {
        if self.dpdas.contains_key(target) {
            return Err(SessionError::DuplicateName(target.to_string()));
        }
        let builder = self
            .dpdas
            .get(source)
            .ok_or_else(|| SessionError::UnknownName(source.to_string()))?
            .clone();

        self.dpdas.insert(target.to_string(), builder);
        self.modified = true;
        Ok(())
    }

    pub fn current(&self) -> Result<&DpdaBuilder<String, String>, SessionError> {
        self.current
            .as_ref()
            .and_then(|name| self.dpdas.get(name))
            .ok_or(SessionError::NoCurrentDpda)
    }

    fn current_mut(&mut self) -> Result<&mut DpdaBuilder<String, String>, SessionError> {
        let builder = self
            .current
            .as_ref()
            .and_then(|name| self.dpdas.get_mut(name))
            .ok_or(SessionError::NoCurrentDpda)?;
        self.modified = true;
        Ok(builder)
    }

    pub fn set_states(&mut self, states: HashSet<String>) -> Result<(), SessionError> {
        self.current_mut()?.states = states;
        Ok(())
    }

    pub fn set_input_alphabet(&mut self, alphabet: HashSet<String>) -> Result<(), SessionError> {
        self.current_mut()?.input_alphabet = alphabet;
        Ok(())
    }

    pub fn set_stack_alphabet(&mut self, alphabet: HashSet<String>) -> Result<(), SessionError> {
        self.current_mut()?.stack_alphabet = alphabet;
        Ok(())
    }

    pub fn set_initial_state(&mut self, state: String) -> Result<(), SessionError> {
        let builder = self.current_mut()?;
        if !builder.states.contains(&state) {
            return Err(SessionError::UnknownState(state));
        }
        builder.initial_state = Some(state);
        Ok(())
    }

    pub fn set_initial_stack_symbol(&mut self, symbol: String) -> Result<(), SessionError> {
        let builder = self.current_mut()?;
        if !builder.stack_alphabet.contains(&symbol) {
            return Err(SessionError::UnknownSymbol(symbol));
        }
        builder.initial_stack_symbol = Some(symbol);
        Ok(())
    }

    pub fn set_accept_states(&mut self, states: HashSet<String>) -> Result<(), SessionError> {
        let builder = self.current_mut()?;
        if let Some(unknown) = states.iter().find(|s| !builder.states.contains(*s)) {
            return Err(SessionError::UnknownState(unknown.clone()));
        }
        builder.accept_states = states;
        Ok(())
    }

    pub fn add_transition(
        &mut self,
        transition: Transition<String, String>,
    ) -> Result<(), SessionError> {
        self.current_mut()?.add_transition(transition);
        Ok(())
    }

    pub fn remove_transition(&mut self, index: usize) -> Result<(), SessionError> {
        self.current_mut()?
            .remove_transition(index)
            .map(|_| ())
            .ok_or(SessionError::TransitionIndexOutOfRange(index))
    }

    pub fn clear_current(&mut self) -> Result<(), SessionError> {
        self.current_mut()?.clear();
        Ok(())
    }

    /// Builds an immutable definition snapshot from the current builder.
    pub fn build_current(&self) -> Result<Dpda<String, String>, SessionError> {
        Ok(self.current()?.build()?)
    }

    /// Builds the current definition and runs the determinism validator on
    /// it.
    pub fn validate_current(&self) -> Result<ValidationReport<String, String>, SessionError> {
        let dpda = self.build_current()?;
        Ok(validation::validate(&dpda))
    }

    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = SessionFile {
            version: SESSION_VERSION.to_string(),
            session_name: self.name.clone(),
            current_dpda: self.current.clone(),
            dpdas: self.dpdas.clone(),
        };

        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session file '{}'", path.display()))?;

        self.modified = false;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Session> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file '{}'", path.display()))?;
        let file: SessionFile = serde_json::from_str(&json)
            .with_context(|| format!("invalid session file '{}'", path.display()))?;

        if file.version != SESSION_VERSION {
            anyhow::bail!("unsupported session version: {}", file.version);
        }

        let current = file
            .current_dpda
            .filter(|name| file.dpdas.contains_key(name));

        Ok(Session {
            name: file.session_name,
            dpdas: file.dpdas,
            current,
            modified: false,
        })
    }
}
