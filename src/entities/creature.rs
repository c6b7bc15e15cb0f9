#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatureId(pub u32);

impl CreatureId {
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}
