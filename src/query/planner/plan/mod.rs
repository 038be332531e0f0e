//! 执行计划
pub mod core;

pub use self::core::nodes::*;
pub use self::core::{PlanDescription, PlanNodeDescription};
