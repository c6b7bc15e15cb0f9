//! Range, floor and line-of-sight rules for using things in the world.

use crate::world::game::GameWorld;
use crate::world::position::Position;
use crate::world::return_value::ReturnValue;

/// Horizontal reach of a far use.
pub const FAR_USE_RANGE_X: u16 = 7;
/// Vertical reach of a far use.
pub const FAR_USE_RANGE_Y: u16 = 5;

/// Check for uses that need the player standing next to the target.
pub fn can_use(player: Position, target: Position) -> ReturnValue {
    if target.is_inventory() {
        return ReturnValue::NoError;
    }
    if player.z != target.z {
        return floor_mismatch(player, target);
    }
    if !player.in_range(target, 1, 1) {
        return ReturnValue::TooFarAway;
    }
    ReturnValue::NoError
}

/// Check for uses at a distance, such as runes or fishing rods.
pub fn can_use_far(
    world: &dyn GameWorld,
    player: Position,
    target: Position,
    check_line_of_sight: bool,
    check_floor: bool,
) -> ReturnValue {
    if target.is_inventory() {
        return ReturnValue::NoError;
    }
    if check_floor && player.z != target.z {
        return floor_mismatch(player, target);
    }
    if !target.in_range(player, FAR_USE_RANGE_X, FAR_USE_RANGE_Y) {
        return ReturnValue::TooFarAway;
    }
    if check_line_of_sight && !world.can_throw_object_to(player, target) {
        return ReturnValue::CannotThrow;
    }
    ReturnValue::NoError
}

fn floor_mismatch(player: Position, target: Position) -> ReturnValue {
    if player.z > target.z {
        ReturnValue::FirstGoUpstairs
    } else {
        ReturnValue::FirstGoDownstairs
    }
}
