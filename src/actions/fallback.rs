//! What using an item does when no rule overrides it: doors, beds,
//! containers and books.

use crate::actions::action::ActionUse;
use crate::actions::dispatch::ActionContext;
use crate::actions::registry::ActionRegistry;
use crate::entities::item::{Container, Item, Readable};
use crate::entities::player::{PlayerId, WriteItem};
use crate::world::position::Position;
use crate::world::return_value::ReturnValue;

/// Runs the item's action if it has one and falls back to the built-in
/// behaviour when there is none or it fails.
pub fn internal_use_item(
    registry: &ActionRegistry,
    ctx: &mut ActionContext<'_>,
    player: PlayerId,
    position: Position,
    index: u8,
    item: &Item,
    is_hotkey: bool,
) -> ReturnValue {
    if item.is_door() && !ctx.world.can_use_door(player, item.id) {
        return ReturnValue::CannotUseThisObject;
    }

    if let Some(action) = registry.get_action(item, ctx.runes) {
        let stack_pos = ctx.world.stack_index(item.id).unwrap_or(0);
        let position = position.with_stack_pos(stack_pos);
        let usage = ActionUse {
            player,
            item: item.id,
            from: position,
            to: position,
            extended: false,
            creature: None,
            is_hotkey,
        };
        if action.execute_use(ctx.world, ctx.scripts, &usage) {
            return ReturnValue::NoError;
        }
    }

    if item.is_bed() {
        return use_bed(ctx, player, item);
    }

    if let Some(container) = item.as_container() {
        return use_container(ctx, player, index, item, container);
    }

    if let Some(readable) = item.as_readable() {
        return use_readable(ctx, player, item, readable);
    }

    ReturnValue::CannotUseThisObject
}

fn use_bed(ctx: &mut ActionContext<'_>, player: PlayerId, item: &Item) -> ReturnValue {
    if !ctx.world.can_use_bed(player, item.id) {
        return ReturnValue::CannotUseThisObject;
    }

    if ctx.world.try_sleep(player, item.id) {
        if let Some(state) = ctx.world.player_mut(player) {
            state.bed_item = Some(item.id);
            state.send_offline_training_dialog();
        }
    }
    ReturnValue::NoError
}

fn use_container(
    ctx: &mut ActionContext<'_>,
    player: PlayerId,
    index: u8,
    item: &Item,
    container: Container,
) -> ReturnValue {
    let open_container = match container.depot_id {
        Some(depot_id) => {
            let Some(locker) = ctx.world.player_depot_locker(player, depot_id, item.id) else {
                return ReturnValue::NotPossible;
            };
            if let Some(state) = ctx.world.player_mut(player) {
                state.last_depot_id = Some(depot_id);
            }
            locker
        }
        None => item.id,
    };

    let Some(state) = ctx.world.player_mut(player) else {
        return ReturnValue::NotPossible;
    };

    let corpse_owner = item.corpse_owner();
    if corpse_owner != 0 && !state.can_open_corpse(corpse_owner) {
        return ReturnValue::YouAreNotTheOwner;
    }

    match state.container_id(open_container) {
        Some(container_id) => {
            state.close_container(container_id);
        }
        None => {
            if state.add_container(index, open_container).is_none() {
                return ReturnValue::NotPossible;
            }
        }
    }
    ReturnValue::NoError
}

fn use_readable(
    ctx: &mut ActionContext<'_>,
    player: PlayerId,
    item: &Item,
    readable: Readable,
) -> ReturnValue {
    let Some(state) = ctx.world.player_mut(player) else {
        return ReturnValue::NotPossible;
    };
    if readable.writable {
        state.set_write_item(Some(WriteItem {
            item: item.id,
            max_length: readable.max_write_length,
        }));
        state.send_text_window(item.id, readable.max_write_length, true);
    } else {
        state.set_write_item(None);
        state.send_text_window(item.id, 0, false);
    }
    ReturnValue::NoError
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::action::{native_function, Action, ActionHandler};
    use crate::actions::rules::{IdTable, RuleTarget};
    use crate::entities::item::{Capability, ItemAttribute, ItemId, ItemTypeId};
    use crate::entities::player::PlayerEvent;
    use crate::entities::spells::RuneSpellBook;
    use crate::scripting::interface::ScriptId;
    use crate::testing::{FakeScripts, TestWorld};
    use crate::world::time::GameClock;
    use std::sync::Arc;
    use std::time::Duration;

    const TILE: Position = Position::new(100, 101, 7);

    fn run(world: &mut TestWorld, registry: &ActionRegistry, item: ItemId, index: u8) -> ReturnValue {
        run_with_scripts(world, registry, item, index, &mut FakeScripts::returning(true))
    }

    fn run_with_scripts(
        world: &mut TestWorld,
        registry: &ActionRegistry,
        item: ItemId,
        index: u8,
        scripts: &mut FakeScripts,
    ) -> ReturnValue {
        let runes = RuneSpellBook::default();
        let clock = GameClock::new(Duration::from_millis(50));
        let snapshot = world.items[&item].clone();
        let player = world.player_id;
        let mut ctx = ActionContext {
            world,
            scripts,
            runes: &runes,
            clock: &clock,
        };
        internal_use_item(registry, &mut ctx, player, TILE, index, &snapshot, false)
    }

    fn bag(world: &mut TestWorld) -> ItemId {
        world.place_item(
            Item::new(ItemTypeId(1987), 1)
                .with_capability(Capability::Container(Container { depot_id: None })),
            TILE,
        )
    }

    #[test]
    fn container_toggles_open_and_closed() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let bag = bag(&mut world);

        assert_eq!(run(&mut world, &registry, bag, 2), ReturnValue::NoError);
        assert_eq!(world.player_mut_state().container_id(bag), Some(2));

        assert_eq!(run(&mut world, &registry, bag, 2), ReturnValue::NoError);
        assert_eq!(world.player_mut_state().container_id(bag), None);
        assert_eq!(
            world.player_mut_state().drain_outbox(),
            vec![
                PlayerEvent::ContainerOpened {
                    container_id: 2,
                    item: bag
                },
                PlayerEvent::ContainerClosed { container_id: 2 },
            ]
        );
    }

    #[test]
    fn second_bag_in_same_slot_closes_first() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let first = bag(&mut world);
        let second = bag(&mut world);

        assert_eq!(run(&mut world, &registry, first, 0), ReturnValue::NoError);
        assert_eq!(run(&mut world, &registry, second, 0), ReturnValue::NoError);
        let state = world.player_mut_state();
        assert_eq!(state.container_id(first), None);
        assert_eq!(state.container_id(second), Some(0));
        assert_eq!(
            state.drain_outbox(),
            vec![
                PlayerEvent::ContainerOpened {
                    container_id: 0,
                    item: first
                },
                PlayerEvent::ContainerClosed { container_id: 0 },
                PlayerEvent::ContainerOpened {
                    container_id: 0,
                    item: second
                },
            ]
        );
    }

    #[test]
    fn depot_locker_opens_personal_locker() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let locker = world.place_item(
            Item::new(ItemTypeId(2589), 1)
                .with_capability(Capability::Container(Container { depot_id: Some(3) })),
            TILE,
        );

        assert_eq!(run(&mut world, &registry, locker, 0), ReturnValue::NoError);
        let personal = world.depot_lockers[&(world.player_id, 3)];
        assert_ne!(personal, locker);
        assert_eq!(world.locker_tiles[&personal], TILE);
        let state = world.player_mut_state();
        assert_eq!(state.last_depot_id, Some(3));
        assert_eq!(state.container_id(personal), Some(0));
        assert_eq!(state.container_id(locker), None);
    }

    #[test]
    fn foreign_corpse_is_refused() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let corpse = world.place_item(
            Item::new(ItemTypeId(3058), 1)
                .with_attribute(ItemAttribute::CorpseOwner(999))
                .with_capability(Capability::Container(Container { depot_id: None })),
            TILE,
        );
        assert_eq!(
            run(&mut world, &registry, corpse, 0),
            ReturnValue::YouAreNotTheOwner
        );

        world.player_mut_state().can_open_any_corpse = true;
        assert_eq!(run(&mut world, &registry, corpse, 0), ReturnValue::NoError);
    }

    #[test]
    fn writable_item_opens_edit_window() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let letter = world.place_item(
            Item::new(ItemTypeId(2597), 1).with_capability(Capability::Readable(Readable {
                writable: true,
                max_write_length: 512,
            })),
            TILE,
        );
        assert_eq!(run(&mut world, &registry, letter, 0), ReturnValue::NoError);
        let state = world.player_mut_state();
        assert_eq!(
            state.write_item,
            Some(WriteItem {
                item: letter,
                max_length: 512
            })
        );
        assert_eq!(
            state.drain_outbox(),
            vec![PlayerEvent::TextWindow {
                item: letter,
                max_length: 512,
                can_write: true
            }]
        );
    }

    #[test]
    fn read_only_item_clears_write_item() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let sign = world.place_item(
            Item::new(ItemTypeId(1815), 1).with_capability(Capability::Readable(Readable {
                writable: false,
                max_write_length: 0,
            })),
            TILE,
        );
        world.player_mut_state().write_item = Some(WriteItem {
            item: ItemId(1),
            max_length: 10,
        });
        assert_eq!(run(&mut world, &registry, sign, 0), ReturnValue::NoError);
        let state = world.player_mut_state();
        assert_eq!(state.write_item, None);
        assert_eq!(
            state.drain_outbox(),
            vec![PlayerEvent::TextWindow {
                item: sign,
                max_length: 0,
                can_write: false
            }]
        );
    }

    #[test]
    fn bed_binds_sleeper_and_offers_training() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let bed = world.place_item(
            Item::new(ItemTypeId(7811), 1).with_capability(Capability::Bed),
            TILE,
        );
        assert_eq!(run(&mut world, &registry, bed, 0), ReturnValue::NoError);
        let state = world.player_mut_state();
        assert_eq!(state.bed_item, Some(bed));
        assert_eq!(state.drain_outbox(), vec![PlayerEvent::OfflineTrainingDialog]);
    }

    #[test]
    fn occupied_bed_is_still_a_successful_use() {
        let mut world = TestWorld::new();
        world.sleep_allowed = false;
        let registry = ActionRegistry::new();
        let bed = world.place_item(
            Item::new(ItemTypeId(7811), 1).with_capability(Capability::Bed),
            TILE,
        );
        assert_eq!(run(&mut world, &registry, bed, 0), ReturnValue::NoError);
        assert_eq!(world.player_mut_state().bed_item, None);
    }

    #[test]
    fn bed_without_access_is_refused() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let bed = world.place_item(
            Item::new(ItemTypeId(7811), 1).with_capability(Capability::Bed),
            TILE,
        );
        world.denied.insert(bed);
        assert_eq!(
            run(&mut world, &registry, bed, 0),
            ReturnValue::CannotUseThisObject
        );
    }

    #[test]
    fn locked_door_blocks_before_its_action() {
        let mut world = TestWorld::new();
        let door = world.place_item(
            Item::new(ItemTypeId(1209), 1).with_capability(Capability::Door),
            TILE,
        );
        world.denied.insert(door);
        let mut registry = ActionRegistry::new();
        registry.register(
            RuleTarget::Single {
                table: IdTable::ItemId,
                id: 1209,
            },
            Arc::new(Action::new(ActionHandler::Script(ScriptId(5)))),
        );
        let mut scripts = FakeScripts::returning(true);
        assert_eq!(
            run_with_scripts(&mut world, &registry, door, 0, &mut scripts),
            ReturnValue::CannotUseThisObject
        );
        assert!(scripts.calls.is_empty());
    }

    #[test]
    fn successful_action_skips_builtins() {
        let mut world = TestWorld::new();
        let bag = bag(&mut world);
        let mut registry = ActionRegistry::new();
        registry.register(
            RuleTarget::Single {
                table: IdTable::ItemId,
                id: 1987,
            },
            Arc::new(Action::new(ActionHandler::Native(
                native_function("increaseitemid").expect("builtin"),
            ))),
        );
        assert_eq!(run(&mut world, &registry, bag, 0), ReturnValue::NoError);
        assert_eq!(world.player_mut_state().container_id(bag), None);
        assert_eq!(world.items[&bag].type_id, ItemTypeId(1988));
    }

    #[test]
    fn failed_action_falls_through_to_builtins() {
        let mut world = TestWorld::new();
        let bag = bag(&mut world);
        let mut registry = ActionRegistry::new();
        registry.register(
            RuleTarget::Single {
                table: IdTable::ItemId,
                id: 1987,
            },
            Arc::new(Action::new(ActionHandler::Script(ScriptId(1)))),
        );
        let mut scripts = FakeScripts::returning(false);
        assert_eq!(
            run_with_scripts(&mut world, &registry, bag, 1, &mut scripts),
            ReturnValue::NoError
        );
        assert_eq!(scripts.calls.len(), 1);
        assert_eq!(world.player_mut_state().container_id(bag), Some(1));
    }

    #[test]
    fn plain_item_cannot_be_used() {
        let mut world = TestWorld::new();
        let registry = ActionRegistry::new();
        let stone = world.place_item(Item::new(ItemTypeId(1285), 1), TILE);
        assert_eq!(
            run(&mut world, &registry, stone, 0),
            ReturnValue::CannotUseThisObject
        );
    }
}
