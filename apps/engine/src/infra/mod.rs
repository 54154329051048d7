//! Store infrastructure: the session-store seam and its implementations.

pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;
