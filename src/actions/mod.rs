pub mod action;
pub mod dispatch;
pub mod fallback;
pub mod hotkey;
pub mod registry;
pub mod rules;
pub mod throttle;
pub mod usability;
