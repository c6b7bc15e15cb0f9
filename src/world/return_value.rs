/// Outcome of a legality check or a use attempt. Every check yields exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnValue {
    NoError,
    NotPossible,
    TooFarAway,
    FirstGoUpstairs,
    FirstGoDownstairs,
    CannotThrow,
    CannotUseThisObject,
    YouAreNotTheOwner,
}

impl ReturnValue {
    /// Text shown to the player in the cancel line.
    pub fn message(self) -> &'static str {
        match self {
            ReturnValue::NoError => "",
            ReturnValue::NotPossible => "Sorry, not possible.",
            ReturnValue::TooFarAway => "Too far away.",
            ReturnValue::FirstGoUpstairs => "First go upstairs.",
            ReturnValue::FirstGoDownstairs => "First go downstairs.",
            ReturnValue::CannotThrow => "You cannot throw there.",
            ReturnValue::CannotUseThisObject => "You cannot use this object.",
            ReturnValue::YouAreNotTheOwner => "You are not the owner.",
        }
    }
}

impl std::fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
