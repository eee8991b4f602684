//! Trading logic: journal configuration and position sizing.

mod config;
mod position_sizer;

pub use config::JournalConfig;
pub use position_sizer::{PositionSizer, SizingResult};
