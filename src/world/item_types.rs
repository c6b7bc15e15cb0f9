use crate::entities::item::ItemTypeId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemType {
    pub id: ItemTypeId,
    pub name: String,
    pub plural_name: Option<String>,
    /// Whether the client displays a count for this type.
    pub show_count: bool,
}

impl ItemType {
    pub fn new(id: ItemTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            plural_name: None,
            show_count: true,
        }
    }

    pub fn plural_name(&self) -> String {
        match &self.plural_name {
            Some(plural) => plural.clone(),
            None if self.name.is_empty() => String::new(),
            None => format!("{}s", self.name),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ItemTypeIndex {
    types: HashMap<ItemTypeId, ItemType>,
}

impl ItemTypeIndex {
    pub fn get(&self, id: ItemTypeId) -> Option<&ItemType> {
        self.types.get(&id)
    }

    pub fn insert(&mut self, item: ItemType) -> Result<(), String> {
        if self.types.contains_key(&item.id) {
            return Err(format!("item type {:?} already exists", item.id));
        }
        self.types.insert(item.id, item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
