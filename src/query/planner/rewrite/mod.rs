//! 计划重写模块
//!
//! 启发式重写规则在计划生成之后直接应用，不依赖代价计算。
//!
//! # 模块结构
//!
//! - `context`: 重写上下文（会话变量、规则触发计数）
//! - `pattern`: 模式匹配定义
//! - `result`: 重写结果与错误定义
//! - `rule`: 重写规则 trait 与规则族
//! - `rule_enum`: 静态分发的规则枚举与注册表
//! - `rule_config`: 按名称启用/禁用规则
//! - `plan_rewriter`: 计划重写器
//! - `aggregate`: 聚合优化规则
//!
//! # 使用示例
//!
//! ```ignore
//! use topn_agg::config::OptimizerConfig;
//! use topn_agg::query::planner::rewrite::rewrite_plan;
//!
//! let (optimized, ctx) = rewrite_plan(plan, &OptimizerConfig::default())?;
//! ```

pub mod context;
pub mod pattern;
pub mod result;
pub mod rule;

pub mod plan_rewriter;
pub mod rule_config;
pub mod rule_enum;

pub mod aggregate;

pub use context::RewriteContext;
pub use pattern::{MatchNode, Pattern};
pub use plan_rewriter::{rewrite_plan, PlanRewriter, DEFAULT_MAX_ITERATIONS};
pub use result::{RewriteError, RewriteResult, TransformResult};
pub use rule::{RewriteRule, RuleFamily};
pub use rule_config::RuleConfig;
pub use rule_enum::{RewriteRule as RewriteRuleEnum, RuleRegistry};

pub use aggregate::*;
