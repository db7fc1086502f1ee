//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside cache callers.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
