//! Validation Rules
//!
//! Rules are grouped by what they check:
//!
//! - `structure.rs` - Empty processes, duplicate ids
//! - `events.rs` - Start, end and boundary events
//! - `connectivity.rs` - Nodes cut off from the flow
//! - `flows.rs` - Dangling references, self-loops, default flows
//! - `gateways.rs` - Conditions, direction, split/join pairing
//! - `messages.rs` - Message flows across participants
//! - `data.rs` - Data and artifact associations
//! - `activities.rs` - Scripts, agents and review configuration

mod activities;
mod connectivity;
mod data;
mod events;
mod flows;
mod gateways;
mod messages;
mod structure;

pub use activities::{AgentAssignmentRule, ReviewConfigRule, ScriptTaskRule, UserTaskAgentRule};
pub use connectivity::OrphanNodeRule;
pub use data::DataAssociationRule;
pub use events::{BoundaryEventRule, EndEventRule, StartEventRule};
pub use flows::{DanglingFlowRule, DefaultFlowRule, SelfLoopRule};
pub use gateways::{
    EventBasedGatewayRule, GatewayConditionRule, GatewayDirectionRule, GatewayPairingRule,
    ParallelConditionRule,
};
pub use messages::MessageFlowRule;
pub use structure::{DuplicateIdRule, EmptyProcessRule};
