//! Side channels read by the view: the event stream and the battle log.

pub mod battle_log;
pub mod event;

pub use battle_log::BattleLog;
pub use event::GameEvent;
