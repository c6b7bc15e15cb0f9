use crate::actions::usability::{can_use, can_use_far};
use crate::entities::creature::CreatureId;
use crate::entities::item::{ItemId, ItemTypeId};
use crate::entities::player::PlayerId;
use crate::scripting::interface::{ScriptId, ScriptInterface};
use crate::scripting::value::ScriptValue;
use crate::world::game::{GameWorld, Thing};
use crate::world::position::{Position, PositionEx};
use crate::world::return_value::ReturnValue;

/// Name of the script entry point bound by action rules.
pub const SCRIPT_EVENT_NAME: &str = "onUse";

/// One attempt to use an item, as handed to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionUse {
    pub player: PlayerId,
    pub item: ItemId,
    pub from: PositionEx,
    pub to: PositionEx,
    /// Set when the item is used on something else.
    pub extended: bool,
    pub creature: Option<CreatureId>,
    pub is_hotkey: bool,
}

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub function: fn(&mut dyn GameWorld, &ActionUse) -> bool,
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NativeFunction {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHandler {
    Native(NativeFunction),
    Script(ScriptId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub allow_far_use: bool,
    pub check_floor: bool,
    pub check_line_of_sight: bool,
    /// The handler tells the player itself why a use failed.
    pub own_error_handler: bool,
    pub handler: ActionHandler,
}

impl Action {
    pub fn new(handler: ActionHandler) -> Self {
        Self {
            allow_far_use: false,
            check_floor: true,
            check_line_of_sight: true,
            own_error_handler: false,
            handler,
        }
    }

    pub fn can_execute(
        &self,
        world: &dyn GameWorld,
        player_position: Position,
        to: Position,
    ) -> ReturnValue {
        if self.allow_far_use {
            can_use_far(
                world,
                player_position,
                to,
                self.check_line_of_sight,
                self.check_floor,
            )
        } else {
            can_use(player_position, to)
        }
    }

    pub fn execute_use(
        &self,
        world: &mut dyn GameWorld,
        scripts: &mut dyn ScriptInterface,
        usage: &ActionUse,
    ) -> bool {
        match self.handler {
            ActionHandler::Native(native) => (native.function)(world, usage),
            ActionHandler::Script(script) => execute_script(world, scripts, script, usage),
        }
    }
}

fn execute_script(
    world: &dyn GameWorld,
    scripts: &mut dyn ScriptInterface,
    script: ScriptId,
    usage: &ActionUse,
) -> bool {
    if let Err(err) = scripts.reserve_env() {
        tracing::error!("action script {:?} not run: {}", script, err);
        return false;
    }

    let target = if usage.extended {
        world
            .thing_at(usage.player, usage.to)
            .or(usage.creature.map(Thing::Creature))
            .filter(|thing| *thing != Thing::Item(usage.item))
    } else {
        None
    };
    let target_position = match target {
        Some(_) => usage.to,
        None => PositionEx::default(),
    };

    let args = [
        ScriptValue::Player(usage.player),
        ScriptValue::Thing(Some(Thing::Item(usage.item))),
        ScriptValue::Position(usage.from),
        ScriptValue::Thing(target),
        ScriptValue::Position(target_position),
        ScriptValue::Boolean(usage.is_hotkey),
    ];
    scripts.call_function(script, &args)
}

/// Looks up a built-in handler by its rule name. Names are case-insensitive.
pub fn native_function(name: &str) -> Option<NativeFunction> {
    NATIVE_FUNCTIONS
        .iter()
        .find(|native| native.name.eq_ignore_ascii_case(name))
        .copied()
}

const NATIVE_FUNCTIONS: [NativeFunction; 3] = [
    NativeFunction {
        name: "increaseitemid",
        function: increase_item_id,
    },
    NativeFunction {
        name: "decreaseitemid",
        function: decrease_item_id,
    },
    NativeFunction {
        name: "market",
        function: enter_market,
    },
];

fn increase_item_id(world: &mut dyn GameWorld, usage: &ActionUse) -> bool {
    shift_item_id(world, usage.item, 1)
}

fn decrease_item_id(world: &mut dyn GameWorld, usage: &ActionUse) -> bool {
    shift_item_id(world, usage.item, -1)
}

fn shift_item_id(world: &mut dyn GameWorld, item: ItemId, delta: i32) -> bool {
    let Some(current) = world.item(item).map(|item| item.type_id) else {
        return false;
    };
    let Ok(next) = u16::try_from(i32::from(current.0) + delta) else {
        return false;
    };
    match world.transform_item(item, ItemTypeId(next)) {
        Some(transformed) => {
            world.start_decay(transformed);
            true
        }
        None => false,
    }
}

fn enter_market(world: &mut dyn GameWorld, usage: &ActionUse) -> bool {
    let Some(player) = world.player_mut(usage.player) else {
        return false;
    };
    let Some(depot_id) = player.last_depot_id else {
        return false;
    };
    player.send_market_enter(depot_id);
    true
}
