//! Orchestration engine
//!
//! The shared machinery underneath every use case:
//!
//! | Component | Role |
//! |-----------|------|
//! | [`ConcurrencyGate`] | Caps in-flight provider calls |
//! | [`ModelResolver`] | Identifier → provider endpoint, router fallback |
//! | [`OrchestrationContext`] | Owns both; passed into every use case |

pub mod context;
pub mod gate;
pub mod resolver;

pub use context::OrchestrationContext;
pub use gate::{ConcurrencyGate, GateError, GatePermit};
pub use resolver::{ModelResolver, ResolutionPlan, ResolveError, ResolvedEndpoint};
