use crate::actions::action::Action;
use crate::entities::item::ItemTypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Rune spells double as item actions: using a rune casts its spell.
pub trait RuneSpellLookup {
    fn rune_spell(&self, type_id: ItemTypeId) -> Option<Arc<Action>>;
}

#[derive(Debug, Default, Clone)]
pub struct RuneSpellBook {
    runes: HashMap<ItemTypeId, Arc<Action>>,
}

impl RuneSpellBook {
    pub fn insert(&mut self, type_id: ItemTypeId, action: Action) -> Result<(), String> {
        if self.runes.contains_key(&type_id) {
            return Err(format!("rune {:?} already registered", type_id));
        }
        self.runes.insert(type_id, Arc::new(action));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }
}

impl RuneSpellLookup for RuneSpellBook {
    fn rune_spell(&self, type_id: ItemTypeId) -> Option<Arc<Action>> {
        self.runes.get(&type_id).cloned()
    }
}
