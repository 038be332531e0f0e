//! 计划模块
//!
//! 计划节点定义与基于规则的计划重写。

pub mod plan;
pub mod planner;
pub mod rewrite;

pub use plan::PlanNodeEnum;
pub use planner::PlannerError;
