//! 重写规则 trait 定义
//!
//! 规则通过模式匹配识别计划树的特定结构，再经过守卫检查后应用转换。

use std::fmt;

use crate::query::planner::plan::PlanNodeEnum;
use crate::query::planner::rewrite::context::RewriteContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{RewriteResult, TransformResult};

/// 规则族
///
/// 同一族的规则共享诊断标签，可以整体启用或禁用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// LIMIT/TopN 与聚合组合时转换为 TopN 聚合
    LimitAggToTopNAgg,
}

impl RuleFamily {
    pub fn name(&self) -> &'static str {
        match self {
            RuleFamily::LimitAggToTopNAgg => "LIMIT_AGG_TO_TOPN_AGG",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LIMIT_AGG_TO_TOPN_AGG" => Some(RuleFamily::LimitAggToTopNAgg),
            _ => None,
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 重写规则 trait
///
/// # 示例
/// ```ignore
/// #[derive(Debug)]
/// struct MyRule;
///
/// impl RewriteRule for MyRule {
///     fn name(&self) -> &'static str { "MyRule" }
///     fn family(&self) -> RuleFamily { RuleFamily::LimitAggToTopNAgg }
///     fn pattern(&self) -> Pattern { Pattern::new_with_name("Limit") }
///     fn apply(&self, ctx: &mut RewriteContext, node: &PlanNodeEnum)
///         -> RewriteResult<Option<TransformResult>> {
///         Ok(None)
///     }
/// }
/// ```
pub trait RewriteRule: fmt::Debug + Send + Sync {
    /// 规则名称
    fn name(&self) -> &'static str;

    /// 规则所属的族
    fn family(&self) -> RuleFamily;

    /// 返回规则的模式
    fn pattern(&self) -> Pattern;

    /// 模式匹配之后、转换之前的前置条件，默认总是通过
    fn guard(&self, _ctx: &RewriteContext, _node: &PlanNodeEnum) -> bool {
        true
    }

    /// 应用重写规则
    ///
    /// # 返回
    /// - `Ok(Some(result))`: 规则已触发，`result` 描述替换（或不变）
    /// - `Ok(None)`: 规则放弃转换，保持原节点
    /// - `Err(e)`: 计划结构与模式不符等缺陷
    fn apply(
        &self,
        ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<Option<TransformResult>>;

    /// 检查规则是否匹配
    fn matches(&self, node: &PlanNodeEnum) -> bool {
        self.pattern().matches(node)
    }

    /// 依次执行模式匹配、守卫检查和转换
    fn rewrite(
        &self,
        ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<Option<TransformResult>> {
        if !self.matches(node) || !self.guard(ctx, node) {
            return Ok(None);
        }
        self.apply(ctx, node)
    }
}
