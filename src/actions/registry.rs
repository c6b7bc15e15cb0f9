use crate::actions::action::{native_function, Action, ActionHandler, SCRIPT_EVENT_NAME};
use crate::actions::rules::{ActionRule, IdTable, RawActionRule, RuleHandler, RuleTarget};
use crate::entities::item::Item;
use crate::entities::spells::RuneSpellLookup;
use crate::scripting::interface::ScriptInterface;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Lookup tables from item identifiers to actions. Several ids, possibly in
/// different tables, may share one action.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    use_item_map: HashMap<u16, Arc<Action>>,
    unique_item_map: HashMap<u16, Arc<Action>>,
    action_item_map: HashMap<u16, Arc<Action>>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rules: usize,
    pub registered: usize,
    pub skipped: usize,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the action to the rule's ids. Ids already taken keep their
    /// action. A range succeeds when it claimed at least one id.
    pub fn register(&mut self, target: RuleTarget, action: Arc<Action>) -> bool {
        match target {
            RuleTarget::Single { table, id } => {
                let map = self.table_mut(table);
                if map.contains_key(&id) {
                    tracing::warn!(
                        "duplicate registered item with {}: {}",
                        table.label(),
                        id
                    );
                    return false;
                }
                map.insert(id, action);
                true
            }
            RuleTarget::Range {
                table,
                from,
                to: None,
            } => {
                let (from_key, to_key) = table.range_keys();
                tracing::warn!("missing {} in {}: {}", to_key, from_key, from);
                false
            }
            RuleTarget::Range {
                table,
                from,
                to: Some(to),
            } => {
                let (from_key, to_key) = table.range_keys();
                let map = self.table_mut(table);
                let mut success = false;
                // The first id is always attempted, even for an inverted range.
                let rest = (u32::from(from) + 1)..=u32::from(to);
                for id in std::iter::once(from).chain(rest.map(|id| id as u16)) {
                    if map.contains_key(&id) {
                        tracing::warn!(
                            "duplicate registered item with {}: {} in {}: {}, {}: {}",
                            table.label(),
                            id,
                            from_key,
                            from,
                            to_key,
                            to
                        );
                        continue;
                    }
                    map.insert(id, Arc::clone(&action));
                    success = true;
                }
                success
            }
        }
    }

    /// Builds actions from raw rules and registers them. Broken rules are
    /// logged and skipped.
    pub fn load(
        &mut self,
        rules: &[RawActionRule],
        scripts: &mut dyn ScriptInterface,
    ) -> LoadReport {
        let mut report = LoadReport {
            rules: rules.len(),
            ..LoadReport::default()
        };
        for (index, raw) in rules.iter().enumerate() {
            let registered = match ActionRule::from_raw(raw, index) {
                Ok(rule) => self.load_rule(&rule, scripts),
                Err(err) => {
                    tracing::warn!("skipping action rule: {}", err);
                    false
                }
            };
            if registered {
                report.registered += 1;
            } else {
                report.skipped += 1;
            }
        }
        report
    }

    fn load_rule(&mut self, rule: &ActionRule, scripts: &mut dyn ScriptInterface) -> bool {
        let handler = match &rule.handler {
            RuleHandler::Function(name) => match native_function(name) {
                Some(native) => ActionHandler::Native(native),
                None => {
                    tracing::warn!("action function \"{}\" does not exist", name);
                    return false;
                }
            },
            RuleHandler::Script(path) => match scripts.load_event(path, SCRIPT_EVENT_NAME) {
                Ok(script) => ActionHandler::Script(script),
                Err(err) => {
                    tracing::warn!("cannot load action script {}: {}", path.display(), err);
                    return false;
                }
            },
        };
        let mut action = Action::new(handler);
        rule.configure(&mut action);
        self.register(rule.target, Arc::new(action))
    }

    /// Finds the action for an item: unique id first, then action id, then
    /// item type, then rune spells.
    pub fn get_action(&self, item: &Item, runes: &dyn RuneSpellLookup) -> Option<Arc<Action>> {
        let unique_id = item.unique_id();
        if unique_id != 0 {
            if let Some(action) = self.unique_item_map.get(&unique_id) {
                return Some(Arc::clone(action));
            }
        }

        let action_id = item.action_id();
        if action_id != 0 {
            if let Some(action) = self.action_item_map.get(&action_id) {
                return Some(Arc::clone(action));
            }
        }

        if let Some(action) = self.use_item_map.get(&item.type_id.0) {
            return Some(Arc::clone(action));
        }

        runes.rune_spell(item.type_id)
    }

    pub fn has_action(&self, item: &Item, runes: &dyn RuneSpellLookup) -> bool {
        self.get_action(item, runes).is_some()
    }

    /// Empties all tables and returns how many distinct actions were dropped.
    /// Actions shared between slots are counted and released once.
    pub fn clear(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for map in [
            &mut self.use_item_map,
            &mut self.unique_item_map,
            &mut self.action_item_map,
        ] {
            for (_, action) in map.drain() {
                if seen.insert(Arc::as_ptr(&action)) {
                    distinct.push(action);
                }
            }
        }
        let dropped = distinct.len();
        drop(distinct);
        dropped
    }

    pub fn len(&self, table: IdTable) -> usize {
        self.table(table).len()
    }

    pub fn is_empty(&self) -> bool {
        self.use_item_map.is_empty()
            && self.unique_item_map.is_empty()
            && self.action_item_map.is_empty()
    }

    pub fn distinct_actions(&self) -> usize {
        self.use_item_map
            .values()
            .chain(self.unique_item_map.values())
            .chain(self.action_item_map.values())
            .map(Arc::as_ptr)
            .collect::<HashSet<_>>()
            .len()
    }

    fn table(&self, table: IdTable) -> &HashMap<u16, Arc<Action>> {
        match table {
            IdTable::ItemId => &self.use_item_map,
            IdTable::UniqueId => &self.unique_item_map,
            IdTable::ActionId => &self.action_item_map,
        }
    }

    fn table_mut(&mut self, table: IdTable) -> &mut HashMap<u16, Arc<Action>> {
        match table {
            IdTable::ItemId => &mut self.use_item_map,
            IdTable::UniqueId => &mut self.unique_item_map,
            IdTable::ActionId => &mut self.action_item_map,
        }
    }
}
