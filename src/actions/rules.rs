use crate::actions::action::Action;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("failed to read action rules {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse action rules {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("rule #{0} names no itemid, uniqueid or actionid")]
    MissingTarget(usize),
    #[error("rule #{0} has neither a function nor a script")]
    MissingHandler(usize),
}

/// A rule as written in the rules file. Key names match the classic
/// `actions.xml` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawActionRule {
    pub itemid: Option<u16>,
    pub fromid: Option<u16>,
    pub toid: Option<u16>,
    pub uniqueid: Option<u16>,
    pub fromuid: Option<u16>,
    pub touid: Option<u16>,
    pub actionid: Option<u16>,
    pub fromaid: Option<u16>,
    pub toaid: Option<u16>,
    pub allowfaruse: Option<bool>,
    pub blockwalls: Option<bool>,
    pub checkfloor: Option<bool>,
    pub ownerrorhandler: Option<bool>,
    pub function: Option<String>,
    pub script: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdTable {
    ItemId,
    UniqueId,
    ActionId,
}

impl IdTable {
    /// Attribute names of the range bounds for this table.
    pub fn range_keys(self) -> (&'static str, &'static str) {
        match self {
            IdTable::ItemId => ("fromid", "toid"),
            IdTable::UniqueId => ("fromuid", "touid"),
            IdTable::ActionId => ("fromaid", "toaid"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IdTable::ItemId => "id",
            IdTable::UniqueId => "unique id",
            IdTable::ActionId => "action id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Single { table: IdTable, id: u16 },
    /// `to` is `None` when the rule forgot its upper bound.
    Range {
        table: IdTable,
        from: u16,
        to: Option<u16>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleHandler {
    Function(String),
    Script(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRule {
    pub index: usize,
    pub target: RuleTarget,
    pub allow_far_use: Option<bool>,
    pub check_line_of_sight: Option<bool>,
    pub check_floor: Option<bool>,
    pub own_error_handler: Option<bool>,
    pub handler: RuleHandler,
}

impl ActionRule {
    pub fn from_raw(raw: &RawActionRule, index: usize) -> Result<Self, RuleError> {
        let target = rule_target(raw).ok_or(RuleError::MissingTarget(index))?;
        // A function wins over a script.
        let handler = match (&raw.function, &raw.script) {
            (Some(function), _) => RuleHandler::Function(function.trim().to_string()),
            (None, Some(script)) => RuleHandler::Script(PathBuf::from(script.trim())),
            (None, None) => return Err(RuleError::MissingHandler(index)),
        };
        Ok(Self {
            index,
            target,
            allow_far_use: raw.allowfaruse,
            check_line_of_sight: raw.blockwalls,
            check_floor: raw.checkfloor,
            own_error_handler: raw.ownerrorhandler,
            handler,
        })
    }

    /// Applies the rule's flags to a freshly created action. Unset flags keep
    /// the action defaults.
    pub fn configure(&self, action: &mut Action) {
        if let Some(value) = self.allow_far_use {
            action.allow_far_use = value;
        }
        if let Some(value) = self.check_line_of_sight {
            action.check_line_of_sight = value;
        }
        if let Some(value) = self.check_floor {
            action.check_floor = value;
        }
        if let Some(value) = self.own_error_handler {
            action.own_error_handler = value;
        }
    }
}

fn rule_target(raw: &RawActionRule) -> Option<RuleTarget> {
    if let Some(id) = raw.itemid {
        return Some(RuleTarget::Single {
            table: IdTable::ItemId,
            id,
        });
    }
    if let Some(from) = raw.fromid {
        return Some(RuleTarget::Range {
            table: IdTable::ItemId,
            from,
            to: raw.toid,
        });
    }
    if let Some(id) = raw.uniqueid {
        return Some(RuleTarget::Single {
            table: IdTable::UniqueId,
            id,
        });
    }
    if let Some(from) = raw.fromuid {
        return Some(RuleTarget::Range {
            table: IdTable::UniqueId,
            from,
            to: raw.touid,
        });
    }
    if let Some(id) = raw.actionid {
        return Some(RuleTarget::Single {
            table: IdTable::ActionId,
            id,
        });
    }
    raw.fromaid.map(|from| RuleTarget::Range {
        table: IdTable::ActionId,
        from,
        to: raw.toaid,
    })
}

pub fn parse_rules(content: &str, path: &Path) -> Result<Vec<RawActionRule>, RuleError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content).map_err(|source| RuleError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_rules(path: &Path) -> Result<Vec<RawActionRule>, RuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| RuleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content, path)
}
