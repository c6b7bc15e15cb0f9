use crate::scripting::value::{format_args, ScriptValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptId(pub i32);

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("call stack overflow")]
    CallStackOverflow,
    #[error("script file {0} not found")]
    ScriptNotFound(PathBuf),
    #[error("event {event} not found in {path}")]
    EventNotFound { path: PathBuf, event: String },
    #[error("unknown script id {0:?}")]
    UnknownScript(ScriptId),
}

/// The scripting runtime as the action engine sees it.
///
/// A call is `reserve_env` followed by exactly one `call_function`. The
/// runtime has a single environment slot; `reserve_env` fails while a call
/// is in flight, and `call_function` releases the slot before returning.
pub trait ScriptInterface {
    /// Loads `event_name` from the script file and returns its handle.
    fn load_event(&mut self, script: &Path, event_name: &str) -> Result<ScriptId, ScriptError>;

    fn reserve_env(&mut self) -> Result<(), ScriptError>;

    /// Runs the callback and returns its boolean result. Errors inside the
    /// script count as `false`.
    fn call_function(&mut self, script: ScriptId, args: &[ScriptValue]) -> bool;

    /// Drops all loaded scripts, used on reload.
    fn reinit(&mut self);
}

/// Exclusive reservation of the runtime's call slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEnvSlot {
    reserved: bool,
}

impl ScriptEnvSlot {
    pub fn reserve(&mut self) -> Result<(), ScriptError> {
        if self.reserved {
            return Err(ScriptError::CallStackOverflow);
        }
        self.reserved = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.reserved = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub path: PathBuf,
    pub event: String,
}

/// Script interface that only records which scripts the rules reference.
/// It checks that files exist and hands out ids but never runs anything, so
/// every call reports failure.
#[derive(Debug, Default)]
pub struct ScriptCatalog {
    base_dir: PathBuf,
    entries: HashMap<ScriptId, ScriptEntry>,
    by_path: HashMap<(PathBuf, String), ScriptId>,
    slot: ScriptEnvSlot,
    next_id: i32,
}

impl ScriptCatalog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScriptInterface for ScriptCatalog {
    fn load_event(&mut self, script: &Path, event_name: &str) -> Result<ScriptId, ScriptError> {
        let path = self.base_dir.join(script);
        let key = (path.clone(), event_name.to_string());
        if let Some(id) = self.by_path.get(&key) {
            return Ok(*id);
        }
        if !path.is_file() {
            return Err(ScriptError::ScriptNotFound(path));
        }
        self.next_id += 1;
        let id = ScriptId(self.next_id);
        self.entries.insert(
            id,
            ScriptEntry {
                path,
                event: event_name.to_string(),
            },
        );
        self.by_path.insert(key, id);
        Ok(id)
    }

    fn reserve_env(&mut self) -> Result<(), ScriptError> {
        self.slot.reserve()
    }

    fn call_function(&mut self, script: ScriptId, args: &[ScriptValue]) -> bool {
        self.slot.release();
        match self.entries.get(&script) {
            Some(entry) => tracing::debug!(
                "script catalog cannot run {} {}({})",
                entry.path.display(),
                entry.event,
                format_args(args)
            ),
            None => tracing::error!("{}", ScriptError::UnknownScript(script)),
        }
        false
    }

    fn reinit(&mut self) {
        self.entries.clear();
        self.by_path.clear();
        self.slot.release();
        self.next_id = 0;
    }
}
