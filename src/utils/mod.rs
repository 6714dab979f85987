//! Utility modules.

pub mod frame_clock;
pub mod persistence;
