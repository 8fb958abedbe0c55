//! Deciding which classified records reach the terminal

pub mod aggregator;
pub mod identity;
pub mod policy;

pub use aggregator::{RunEvent, TestRunAggregator};
pub use identity::ProcessIdentity;
pub use policy::{FilterDecision, FilterPolicy, FilterRule};
