//! In-memory world and script runtime for unit tests.

use crate::entities::item::{Capability, Container, Item, ItemId, ItemTypeId};
use crate::entities::player::{PlayerId, PlayerState};
use crate::scripting::interface::{ScriptEnvSlot, ScriptError, ScriptId, ScriptInterface};
use crate::scripting::value::ScriptValue;
use crate::world::game::{GameWorld, Thing};
use crate::world::item_types::{ItemType, ItemTypeIndex};
use crate::world::position::{Position, PositionEx};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const LOCKER_TYPE: ItemTypeId = ItemTypeId(2594);

pub(crate) struct TestWorld {
    pub player_id: PlayerId,
    pub players: HashMap<PlayerId, PlayerState>,
    pub items: HashMap<ItemId, Item>,
    pub item_types: ItemTypeIndex,
    pub item_positions: HashMap<ItemId, Position>,
    pub tiles: HashMap<Position, Vec<ItemId>>,
    pub decaying: Vec<ItemId>,
    pub depot_lockers: HashMap<(PlayerId, u16), ItemId>,
    pub locker_tiles: HashMap<ItemId, Position>,
    /// Doors and beds the player has no access to.
    pub denied: HashSet<ItemId>,
    pub sleep_allowed: bool,
    pub blocked_sight: HashSet<Position>,
}

impl TestWorld {
    pub fn new() -> Self {
        let player_id = PlayerId(1);
        let mut players = HashMap::new();
        players.insert(
            player_id,
            PlayerState::new(player_id, "Tester".to_string(), Position::new(100, 100, 7)),
        );
        Self {
            player_id,
            players,
            items: HashMap::new(),
            item_types: ItemTypeIndex::default(),
            item_positions: HashMap::new(),
            tiles: HashMap::new(),
            decaying: Vec::new(),
            depot_lockers: HashMap::new(),
            locker_tiles: HashMap::new(),
            denied: HashSet::new(),
            sleep_allowed: true,
            blocked_sight: HashSet::new(),
        }
    }

    /// Puts the item on top of the tile's stack.
    pub fn place_item(&mut self, item: Item, position: Position) -> ItemId {
        let id = item.id;
        self.items.insert(id, item);
        self.item_positions.insert(id, position);
        self.tiles.entry(position).or_default().push(id);
        id
    }

    pub fn player_mut_state(&mut self) -> &mut PlayerState {
        self.players
            .get_mut(&self.player_id)
            .expect("test player exists")
    }

    pub fn add_item_type(&mut self, item_type: ItemType) {
        self.item_types.insert(item_type).expect("unique item type");
    }
}

impl GameWorld for TestWorld {
    fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    fn item_type(&self, type_id: ItemTypeId) -> Option<&ItemType> {
        self.item_types.get(type_id)
    }

    fn stack_index(&self, item: ItemId) -> Option<u8> {
        let position = self.item_positions.get(&item)?;
        self.tiles
            .get(position)?
            .iter()
            .position(|id| *id == item)
            .and_then(|index| u8::try_from(index).ok())
    }

    fn thing_at(&self, _player: PlayerId, position: PositionEx) -> Option<Thing> {
        let stack = self.tiles.get(&position.position)?;
        stack
            .get(usize::from(position.stack_pos))
            .or_else(|| stack.last())
            .map(|id| Thing::Item(*id))
    }

    fn transform_item(&mut self, item: ItemId, new_type: ItemTypeId) -> Option<ItemId> {
        let item = self.items.get_mut(&item)?;
        item.type_id = new_type;
        Some(item.id)
    }

    fn start_decay(&mut self, item: ItemId) {
        self.decaying.push(item);
    }

    fn can_throw_object_to(&self, _from: Position, to: Position) -> bool {
        !self.blocked_sight.contains(&to)
    }

    fn can_use_door(&self, _player: PlayerId, door: ItemId) -> bool {
        !self.denied.contains(&door)
    }

    fn can_use_bed(&self, _player: PlayerId, bed: ItemId) -> bool {
        !self.denied.contains(&bed)
    }

    fn try_sleep(&mut self, _player: PlayerId, _bed: ItemId) -> bool {
        self.sleep_allowed
    }

    fn player_depot_locker(
        &mut self,
        player: PlayerId,
        depot_id: u16,
        locker: ItemId,
    ) -> Option<ItemId> {
        let tile = *self.item_positions.get(&locker)?;
        let personal = match self.depot_lockers.get(&(player, depot_id)) {
            Some(personal) => *personal,
            None => {
                let item = Item::new(LOCKER_TYPE, 1)
                    .with_capability(Capability::Container(Container { depot_id: None }));
                let id = item.id;
                self.items.insert(id, item);
                self.depot_lockers.insert((player, depot_id), id);
                id
            }
        };
        self.locker_tiles.insert(personal, tile);
        Some(personal)
    }
}

/// Script runtime that records calls and answers with a fixed result.
pub(crate) struct FakeScripts {
    pub result: bool,
    pub slot: ScriptEnvSlot,
    pub loaded: Vec<PathBuf>,
    pub calls: Vec<(ScriptId, Vec<ScriptValue>)>,
    pub reinits: usize,
}

impl FakeScripts {
    pub fn returning(result: bool) -> Self {
        Self {
            result,
            slot: ScriptEnvSlot::default(),
            loaded: Vec::new(),
            calls: Vec::new(),
            reinits: 0,
        }
    }
}

impl ScriptInterface for FakeScripts {
    fn load_event(&mut self, script: &Path, _event_name: &str) -> Result<ScriptId, ScriptError> {
        self.loaded.push(script.to_path_buf());
        Ok(ScriptId(self.loaded.len() as i32))
    }

    fn reserve_env(&mut self) -> Result<(), ScriptError> {
        self.slot.reserve()
    }

    fn call_function(&mut self, script: ScriptId, args: &[ScriptValue]) -> bool {
        self.slot.release();
        self.calls.push((script, args.to_vec()));
        self.result
    }

    fn reinit(&mut self) {
        self.reinits += 1;
        self.loaded.clear();
        self.slot.release();
    }
}
