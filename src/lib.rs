//! topn-agg - LIMIT/TopN 与聚合组合的计划重写
//!
//! 启发式计划重写器中的一组规则：聚合之上的 LIMIT 转换为按分组键排序的 TopN，
//! 聚合之上的 TopN 用剩余分组键补全排序键，从而让执行器可以使用有界的
//! TopN 缓冲区并把阈值下推到局部聚合。

pub mod config;
pub mod core;
pub mod query;
pub mod utils;

pub use crate::core::{AggregateFunction, BinaryOperator, Expression, UnaryOperator, Value, YieldColumn};
pub use config::{Config, ConfigError, OptimizerConfig};
pub use query::context::SessionVariables;
pub use query::planner::plan::PlanNodeEnum;
pub use query::planner::rewrite::{rewrite_plan, PlanRewriter, RewriteContext, RewriteError};
