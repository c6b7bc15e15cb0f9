use crate::actions::action::{Action, ActionUse};
use crate::actions::fallback::internal_use_item;
use crate::actions::hotkey::show_use_hotkey_message;
use crate::actions::registry::{ActionRegistry, LoadReport};
use crate::actions::rules::RawActionRule;
use crate::actions::throttle::{ActionThrottle, UseKind};
use crate::config::ActionsConfig;
use crate::entities::creature::CreatureId;
use crate::entities::item::{Item, ItemId};
use crate::entities::player::PlayerId;
use crate::entities::spells::RuneSpellLookup;
use crate::scripting::interface::ScriptInterface;
use crate::world::game::GameWorld;
use crate::world::position::Position;
use crate::world::return_value::ReturnValue;
use crate::world::time::GameClock;
use std::sync::Arc;

/// Everything a use request touches outside the action engine.
pub struct ActionContext<'a> {
    pub world: &'a mut dyn GameWorld,
    pub scripts: &'a mut dyn ScriptInterface,
    pub runes: &'a dyn RuneSpellLookup,
    pub clock: &'a GameClock,
}

/// The item action engine: registered rules plus the use entry points.
#[derive(Debug, Default)]
pub struct Actions {
    registry: ActionRegistry,
    throttle: ActionThrottle,
}

impl Actions {
    pub fn new(config: &ActionsConfig) -> Self {
        Self {
            registry: ActionRegistry::new(),
            throttle: ActionThrottle::from_config(config),
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    pub fn throttle(&self) -> ActionThrottle {
        self.throttle
    }

    pub fn load(
        &mut self,
        rules: &[RawActionRule],
        scripts: &mut dyn ScriptInterface,
    ) -> LoadReport {
        let report = self.registry.load(rules, scripts);
        tracing::info!(
            "loaded {} of {} action rules ({} skipped)",
            report.registered,
            report.rules,
            report.skipped
        );
        report
    }

    /// Drops every action and script, then loads the rules again.
    pub fn reload(
        &mut self,
        rules: &[RawActionRule],
        scripts: &mut dyn ScriptInterface,
    ) -> LoadReport {
        self.clear(scripts);
        self.load(rules, scripts)
    }

    pub fn clear(&mut self, scripts: &mut dyn ScriptInterface) -> usize {
        let dropped = self.registry.clear();
        scripts.reinit();
        tracing::debug!("cleared {} actions", dropped);
        dropped
    }

    pub fn get_action(&self, item: &Item, runes: &dyn RuneSpellLookup) -> Option<Arc<Action>> {
        self.registry.get_action(item, runes)
    }

    pub fn has_action(&self, item: &Item, runes: &dyn RuneSpellLookup) -> bool {
        self.registry.has_action(item, runes)
    }

    /// Whether the player may use the item at `position` right now, judged by
    /// the item's own action. Items without an action are always fine here.
    pub fn can_use_item(
        &self,
        world: &dyn GameWorld,
        runes: &dyn RuneSpellLookup,
        player: PlayerId,
        position: Position,
        item: ItemId,
    ) -> ReturnValue {
        let (Some(state), Some(item)) = (world.player(player), world.item(item)) else {
            return ReturnValue::NotPossible;
        };
        match self.registry.get_action(item, runes) {
            Some(action) => action.can_execute(world, state.position, position),
            None => ReturnValue::NoError,
        }
    }

    /// Uses an item by itself, e.g. opening a bag or pulling a lever.
    pub fn use_item(
        &self,
        ctx: &mut ActionContext<'_>,
        player: PlayerId,
        position: Position,
        index: u8,
        item: ItemId,
        is_hotkey: bool,
    ) -> bool {
        if !self.begin_use(ctx, player, UseKind::Plain) {
            return false;
        }

        if is_hotkey {
            show_use_hotkey_message(ctx.world, player, item);
        }

        let ret = match ctx.world.item(item).cloned() {
            Some(item) => internal_use_item(
                &self.registry,
                ctx,
                player,
                position,
                index,
                &item,
                is_hotkey,
            ),
            None => ReturnValue::NotPossible,
        };
        if ret != ReturnValue::NoError {
            send_cancel(ctx.world, player, ret);
            return false;
        }
        true
    }

    /// Uses an item on something else: a tile, another item or a creature.
    /// Only items with a registered action can be used this way.
    #[allow(clippy::too_many_arguments)]
    pub fn use_item_ex(
        &self,
        ctx: &mut ActionContext<'_>,
        player: PlayerId,
        from: Position,
        to: Position,
        to_stack_pos: u8,
        item: ItemId,
        is_hotkey: bool,
        creature_id: u32,
    ) -> bool {
        if !self.begin_use(ctx, player, UseKind::Extended) {
            return false;
        }

        let action = ctx
            .world
            .item(item)
            .and_then(|item| self.registry.get_action(item, ctx.runes));
        let Some(action) = action else {
            send_cancel(ctx.world, player, ReturnValue::CannotUseThisObject);
            return false;
        };

        let Some(player_position) = ctx.world.player(player).map(|state| state.position) else {
            return false;
        };
        let ret = action.can_execute(ctx.world, player_position, to);
        if ret != ReturnValue::NoError {
            tracing::debug!("player {} cannot use item {} at {}: {}", player.0, item.0, to, ret);
            send_cancel(ctx.world, player, ret);
            return false;
        }

        if is_hotkey {
            show_use_hotkey_message(ctx.world, player, item);
        }

        let from_stack_pos = ctx.world.stack_index(item).unwrap_or(0);
        let usage = ActionUse {
            player,
            item,
            from: from.with_stack_pos(from_stack_pos),
            to: to.with_stack_pos(to_stack_pos),
            extended: true,
            creature: Some(CreatureId(creature_id)).filter(|id| id.is_assigned()),
            is_hotkey,
        };
        if !action.execute_use(ctx.world, ctx.scripts, &usage) {
            if !action.own_error_handler {
                send_cancel(ctx.world, player, ReturnValue::CannotUseThisObject);
            }
            return false;
        }
        true
    }

    /// Throttle gate shared by both entry points. Charges the cooldown and
    /// stops the player walking when the attempt is accepted.
    fn begin_use(&self, ctx: &mut ActionContext<'_>, player: PlayerId, kind: UseKind) -> bool {
        let Some(state) = ctx.world.player_mut(player) else {
            return false;
        };
        if !self.throttle.can_act_now(state, ctx.clock) {
            return false;
        }
        self.throttle.charge(state, ctx.clock, kind);
        state.stop_walk();
        true
    }
}

fn send_cancel(world: &mut dyn GameWorld, player: PlayerId, ret: ReturnValue) {
    if let Some(state) = world.player_mut(player) {
        state.send_cancel_message(ret);
    }
}
