pub mod explain;
pub mod nodes;
pub mod node_id_generator;

pub use explain::{Pair, PlanDescription, PlanNodeDescription};
pub use node_id_generator::{next_node_id, NodeIdGenerator};
pub use nodes::plan_node_enum::PlanNodeEnum;
pub use nodes::plan_node_traits::{PlanNode, SingleInputNode};
pub use nodes::{
    AggregateNode, FilterNode, LimitNode, OrderKey, ProjectNode, ScanNode, TopNNode,
};
