//! # skibidi-runtime
//!
//! Process-wide runtime state for the skibidi phrase engine.
//!
//! Every generation call consults this crate (read-only) to learn which
//! execution tier to run. The state is:
//! - **Capabilities** (`caps`): CPU vector-instruction tiers reported by the probe
//! - **Strategy** (`strategy`): the selected tier plus the user configuration,
//!   packed into a single atomic word so readers never block and never observe
//!   a partially applied reconfiguration

#![deny(unsafe_code)]

pub mod caps;
pub mod strategy;

pub use caps::{Capabilities, probe};
pub use strategy::{
    BUILD_CEILING, Config, StrategySnapshot, Tier, active_tier, capabilities, config, configure,
    host_ceiling, select_tier, snapshot,
};
#[cfg(any(test, feature = "test-support"))]
pub use strategy::{reset_for_tests, serial_guard};
