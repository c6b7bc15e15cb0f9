use crate::entities::player::PlayerId;
use crate::world::game::Thing;
use crate::world::position::PositionEx;

/// A value marshaled onto the script stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptValue {
    Player(PlayerId),
    /// `None` pushes the runtime's empty thing.
    Thing(Option<Thing>),
    Position(PositionEx),
    Boolean(bool),
}

impl std::fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptValue::Player(id) => write!(f, "Player({})", id.0),
            ScriptValue::Thing(Some(Thing::Item(id))) => write!(f, "Item({})", id.0),
            ScriptValue::Thing(Some(Thing::Creature(id))) => write!(f, "Creature({})", id.0),
            ScriptValue::Thing(None) => f.write_str("nil"),
            ScriptValue::Position(pos) => write!(
                f,
                "Position({}, {}, {}, stackpos={})",
                pos.position.x, pos.position.y, pos.position.z, pos.stack_pos
            ),
            ScriptValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

/// Formats an argument list the way it would appear in a script call trace.
pub fn format_args(args: &[ScriptValue]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
