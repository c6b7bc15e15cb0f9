use crate::entities::creature::CreatureId;
use crate::entities::item::{Item, ItemId, ItemTypeId};
use crate::entities::player::{PlayerId, PlayerState};
use crate::world::item_types::ItemType;
use crate::world::position::{Position, PositionEx};

/// Something that can be addressed by a position and stack index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thing {
    Item(ItemId),
    Creature(CreatureId),
}

/// The parts of the game world the action engine reads and mutates. Storage,
/// house rules and map geometry live behind this trait.
pub trait GameWorld {
    fn player(&self, id: PlayerId) -> Option<&PlayerState>;

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState>;

    fn item(&self, id: ItemId) -> Option<&Item>;

    fn item_type(&self, type_id: ItemTypeId) -> Option<&ItemType>;

    /// Index of the item inside whatever holds it (tile or container).
    fn stack_index(&self, item: ItemId) -> Option<u8>;

    /// Resolves an address as seen by the given player. Inventory positions
    /// are resolved against that player's equipment and containers.
    fn thing_at(&self, player: PlayerId, position: PositionEx) -> Option<Thing>;

    /// Changes the item's type in place or replaces it. Returns the item that
    /// now stands for it.
    fn transform_item(&mut self, item: ItemId, new_type: ItemTypeId) -> Option<ItemId>;

    fn start_decay(&mut self, item: ItemId);

    /// Whether a thrown object could travel from `from` to `to` without
    /// hitting something that blocks projectiles.
    fn can_throw_object_to(&self, from: Position, to: Position) -> bool;

    fn can_use_door(&self, player: PlayerId, door: ItemId) -> bool;

    fn can_use_bed(&self, player: PlayerId, bed: ItemId) -> bool;

    /// Starts sleeping in the bed. False when the bed cannot take the player.
    fn try_sleep(&mut self, player: PlayerId, bed: ItemId) -> bool;

    /// The player's own locker for the depot, placed on the tile of the
    /// locker the player just used.
    fn player_depot_locker(
        &mut self,
        player: PlayerId,
        depot_id: u16,
        locker: ItemId,
    ) -> Option<ItemId>;
}
