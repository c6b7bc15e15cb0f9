/// X coordinate used for inventory and container addressing. Positions carrying
/// it do not refer to a map tile.
pub const INVENTORY_X: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

/// A position plus the index of the addressed thing within its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionEx {
    pub position: Position,
    pub stack_pos: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Position {
    pub const fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    pub fn is_inventory(self) -> bool {
        self.x == INVENTORY_X
    }

    pub fn with_stack_pos(self, stack_pos: u8) -> PositionEx {
        PositionEx {
            position: self,
            stack_pos,
        }
    }

    /// True when both horizontal offsets are within the given reach. The
    /// floor is not compared.
    pub fn in_range(self, other: Position, reach_x: u16, reach_y: u16) -> bool {
        let dx = i32::from(self.x) - i32::from(other.x);
        let dy = i32::from(self.y) - i32::from(other.y);
        dx.unsigned_abs() <= u32::from(reach_x) && dy.unsigned_abs() <= u32::from(reach_y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
