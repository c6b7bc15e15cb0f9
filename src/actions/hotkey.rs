use crate::entities::item::ItemId;
use crate::entities::player::{MessageClass, PlayerId};
use crate::world::game::GameWorld;
use crate::world::item_types::ItemType;

pub fn use_hotkey_message(item_type: &ItemType, count: u32) -> String {
    if !item_type.show_count {
        format!("Using one of {}...", item_type.name)
    } else if count == 1 {
        format!("Using the last {}...", item_type.name)
    } else {
        format!("Using one of {} {}...", count, item_type.plural_name())
    }
}

/// Tells the player what a hotkey use consumed. Unknown item types get no
/// message.
pub fn show_use_hotkey_message(world: &mut dyn GameWorld, player: PlayerId, item: ItemId) {
    let Some(type_id) = world.item(item).map(|item| item.type_id) else {
        return;
    };
    let Some(count) = world
        .player(player)
        .map(|state| state.item_type_count(type_id))
    else {
        return;
    };
    let Some(message) = world
        .item_type(type_id)
        .map(|item_type| use_hotkey_message(item_type, count))
    else {
        tracing::debug!(
            "no hotkey message for item {}: unknown item type {}",
            item.0,
            type_id.0
        );
        return;
    };
    if let Some(state) = world.player_mut(player) {
        state.send_text_message(MessageClass::InfoDescr, message);
    }
}
