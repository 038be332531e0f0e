//! 计划节点模块

#[macro_use]
pub mod macros;

pub mod aggregate_node;
pub mod filter_node;
pub mod plan_node_enum;
pub mod plan_node_traits;
pub mod project_node;
pub mod scan_node;
pub mod sort_node;

pub use aggregate_node::AggregateNode;
pub use filter_node::FilterNode;
pub use plan_node_enum::PlanNodeEnum;
pub use plan_node_traits::{PlanNode, SingleInputNode};
pub use project_node::ProjectNode;
pub use scan_node::ScanNode;
pub use sort_node::{LimitNode, OrderKey, TopNNode};
