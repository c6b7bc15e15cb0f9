use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

static NEXT_ITEM_ID: AtomicU32 = AtomicU32::new(1);

impl ItemId {
    pub fn next() -> Self {
        let id = NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed);
        ItemId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemTypeId(pub u16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAttribute {
    UniqueId(u16),
    ActionId(u16),
    /// Player id of whoever owns the corpse. Zero means nobody.
    CorpseOwner(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Set when this container is a depot locker for that depot.
    pub depot_id: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readable {
    pub writable: bool,
    pub max_write_length: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Door whose access is decided by the world, e.g. a house door.
    Door,
    /// Bed a player can sleep in.
    Bed,
    Container(Container),
    Readable(Readable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub type_id: ItemTypeId,
    pub count: u16,
    pub attributes: Vec<ItemAttribute>,
    pub capabilities: Vec<Capability>,
}

impl Item {
    pub fn new(type_id: ItemTypeId, count: u16) -> Self {
        Self {
            id: ItemId::next(),
            type_id,
            count,
            attributes: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: ItemAttribute) -> Self {
        self.set_attribute(attribute);
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Replaces an attribute of the same kind, if any.
    pub fn set_attribute(&mut self, attribute: ItemAttribute) {
        let kind = std::mem::discriminant(&attribute);
        self.attributes
            .retain(|existing| std::mem::discriminant(existing) != kind);
        self.attributes.push(attribute);
    }

    pub fn unique_id(&self) -> u16 {
        self.attributes
            .iter()
            .find_map(|attr| match attr {
                ItemAttribute::UniqueId(id) => Some(*id),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn action_id(&self) -> u16 {
        self.attributes
            .iter()
            .find_map(|attr| match attr {
                ItemAttribute::ActionId(id) => Some(*id),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn corpse_owner(&self) -> u32 {
        self.attributes
            .iter()
            .find_map(|attr| match attr {
                ItemAttribute::CorpseOwner(owner) => Some(*owner),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn is_door(&self) -> bool {
        self.capabilities.contains(&Capability::Door)
    }

    pub fn is_bed(&self) -> bool {
        self.capabilities.contains(&Capability::Bed)
    }

    pub fn as_container(&self) -> Option<Container> {
        self.capabilities.iter().find_map(|cap| match cap {
            Capability::Container(container) => Some(*container),
            _ => None,
        })
    }

    pub fn as_readable(&self) -> Option<Readable> {
        self.capabilities.iter().find_map(|cap| match cap {
            Capability::Readable(readable) => Some(*readable),
            _ => None,
        })
    }
}
