//! Orchestration domain
//!
//! Result records returned by every outward operation, and the debate
//! turn-order state machine.

pub mod debate;
pub mod phase;
pub mod value_objects;
