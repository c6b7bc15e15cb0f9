use crate::config::ActionsConfig;
use crate::entities::player::PlayerState;
use crate::world::time::GameClock;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseKind {
    /// Using an item by itself.
    Plain,
    /// Using an item on something else.
    Extended,
}

/// Per-player cooldown between use attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionThrottle {
    pub actions_delay: Duration,
    pub ex_actions_delay: Duration,
}

impl ActionThrottle {
    pub fn from_config(config: &ActionsConfig) -> Self {
        Self {
            actions_delay: Duration::from_millis(config.actions_delay_ms),
            ex_actions_delay: Duration::from_millis(config.ex_actions_delay_ms),
        }
    }

    pub fn can_act_now(&self, player: &PlayerState, clock: &GameClock) -> bool {
        player.can_do_action(clock)
    }

    /// Charges the cooldown for an accepted attempt. Any queued delayed
    /// action is dropped first.
    pub fn charge(&self, player: &mut PlayerState, clock: &GameClock, kind: UseKind) {
        let delay = match kind {
            UseKind::Plain => self.actions_delay,
            UseKind::Extended => self.ex_actions_delay,
        };
        player.set_next_action_task(None);
        player.set_next_action(clock, delay);
    }
}

impl Default for ActionThrottle {
    fn default() -> Self {
        Self::from_config(&ActionsConfig::default())
    }
}
