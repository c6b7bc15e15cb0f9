use crate::entities::item::{ItemId, ItemTypeId};
use crate::world::position::{Direction, Position};
use crate::world::return_value::ReturnValue;
use crate::world::time::{Cooldown, GameClock};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

/// Most containers a client can show at once.
pub const MAX_OPEN_CONTAINERS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    /// Info line in the game window.
    InfoDescr,
}

/// Something the network layer has to deliver to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    CancelMessage(ReturnValue),
    TextMessage {
        class: MessageClass,
        message: String,
    },
    TextWindow {
        item: ItemId,
        max_length: u16,
        can_write: bool,
    },
    ContainerOpened {
        container_id: u8,
        item: ItemId,
    },
    ContainerClosed {
        container_id: u8,
    },
    MarketEnter {
        depot_id: u16,
    },
    OfflineTrainingDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteItem {
    pub item: ItemId,
    pub max_length: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenContainer {
    pub container_id: u8,
    pub item: ItemId,
}

/// Handle of a delayed action queued for the player, e.g. a use that waits
/// for the player to walk up to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub next_action: Cooldown,
    pub next_action_task: Option<TaskId>,
    pub autowalk_steps: VecDeque<Direction>,
    pub open_containers: BTreeMap<u8, OpenContainer>,
    pub last_depot_id: Option<u16>,
    pub write_item: Option<WriteItem>,
    pub bed_item: Option<ItemId>,
    /// Group flag allowing to open any corpse.
    pub can_open_any_corpse: bool,
    pub carried: HashMap<ItemTypeId, u32>,
    pub outbox: Vec<PlayerEvent>,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: String, position: Position) -> Self {
        Self {
            id,
            name,
            position,
            next_action: Cooldown::default(),
            next_action_task: None,
            autowalk_steps: VecDeque::new(),
            open_containers: BTreeMap::new(),
            last_depot_id: None,
            write_item: None,
            bed_item: None,
            can_open_any_corpse: false,
            carried: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    pub fn can_do_action(&self, clock: &GameClock) -> bool {
        self.next_action.is_ready(clock)
    }

    pub fn set_next_action(&mut self, clock: &GameClock, delay: Duration) {
        self.next_action.extend_from_now(clock, delay);
    }

    pub fn set_next_action_task(&mut self, task: Option<TaskId>) {
        self.next_action_task = task;
    }

    pub fn stop_walk(&mut self) {
        self.autowalk_steps.clear();
    }

    /// How many items of the given type the player carries.
    pub fn item_type_count(&self, type_id: ItemTypeId) -> u32 {
        self.carried.get(&type_id).copied().unwrap_or(0)
    }

    pub fn container_id(&self, item: ItemId) -> Option<u8> {
        self.open_containers
            .values()
            .find(|open| open.item == item)
            .map(|open| open.container_id)
    }

    /// Opens a container window in the given slot. A slot outside the client
    /// range falls back to the first free slot. A container already shown in
    /// the requested slot is closed first.
    pub fn add_container(&mut self, index: u8, item: ItemId) -> Option<u8> {
        let container_id = if index < MAX_OPEN_CONTAINERS {
            index
        } else {
            self.next_container_id()?
        };
        self.close_container(container_id);
        self.open_containers.insert(
            container_id,
            OpenContainer {
                container_id,
                item,
            },
        );
        self.outbox.push(PlayerEvent::ContainerOpened { container_id, item });
        Some(container_id)
    }

    pub fn close_container(&mut self, container_id: u8) -> bool {
        if self.open_containers.remove(&container_id).is_none() {
            return false;
        }
        self.outbox.push(PlayerEvent::ContainerClosed { container_id });
        true
    }

    pub fn next_container_id(&self) -> Option<u8> {
        (0..MAX_OPEN_CONTAINERS).find(|id| !self.open_containers.contains_key(id))
    }

    pub fn can_open_corpse(&self, owner: u32) -> bool {
        self.can_open_any_corpse || owner == self.id.0
    }

    pub fn set_write_item(&mut self, write_item: Option<WriteItem>) {
        self.write_item = write_item;
    }

    pub fn send_cancel_message(&mut self, ret: ReturnValue) {
        self.outbox.push(PlayerEvent::CancelMessage(ret));
    }

    pub fn send_text_message(&mut self, class: MessageClass, message: impl Into<String>) {
        self.outbox.push(PlayerEvent::TextMessage {
            class,
            message: message.into(),
        });
    }

    pub fn send_text_window(&mut self, item: ItemId, max_length: u16, can_write: bool) {
        self.outbox.push(PlayerEvent::TextWindow {
            item,
            max_length,
            can_write,
        });
    }

    pub fn send_market_enter(&mut self, depot_id: u16) {
        self.outbox.push(PlayerEvent::MarketEnter { depot_id });
    }

    pub fn send_offline_training_dialog(&mut self) {
        self.outbox.push(PlayerEvent::OfflineTrainingDialog);
    }

    pub fn drain_outbox(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.outbox)
    }
}
