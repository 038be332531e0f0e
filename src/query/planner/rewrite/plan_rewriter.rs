//! 计划重写器实现
//!
//! 自底向上遍历计划树，对每个节点按注册顺序尝试所有启用的规则，
//! 重复整轮遍历直到计划不再变化或达到迭代上限。

use crate::config::OptimizerConfig;
use crate::query::planner::plan::PlanNodeEnum;
use crate::query::planner::rewrite::context::RewriteContext;
use crate::query::planner::rewrite::result::RewriteResult;
use crate::query::planner::rewrite::rule::RewriteRule;
use crate::query::planner::rewrite::rule_config::RuleConfig;
use crate::query::planner::rewrite::rule_enum::RuleRegistry;

/// 默认迭代上限
pub const DEFAULT_MAX_ITERATIONS: usize = 16;

/// 计划重写器
#[derive(Debug)]
pub struct PlanRewriter {
    registry: RuleRegistry,
    max_iterations: usize,
}

impl PlanRewriter {
    /// 使用全部默认规则创建重写器
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// 按优化器配置创建重写器，配置中禁用的规则不会注册
    pub fn from_config(config: &OptimizerConfig) -> Self {
        let mut registry = RuleRegistry::default();
        registry.retain_enabled(&RuleConfig::from_disabled(config.disabled_rules.iter().cloned()));
        Self {
            registry,
            max_iterations: config.max_iterations.max(1),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// 重写整棵计划树直到不动点
    pub fn rewrite(
        &self,
        ctx: &mut RewriteContext,
        plan: PlanNodeEnum,
    ) -> RewriteResult<PlanNodeEnum> {
        log::trace!("rewrite input plan:\n{}", plan.explain());

        let mut plan = plan;
        for iteration in 1..=self.max_iterations {
            let (new_plan, changed) = self.rewrite_node(ctx, &plan)?;
            plan = new_plan;
            if !changed {
                log::debug!(
                    "plan rewrite converged after {} iteration(s), {} rule firing(s)",
                    iteration,
                    ctx.total_firings()
                );
                log::trace!("rewrite output plan:\n{}", plan.explain());
                return Ok(plan);
            }
        }

        log::warn!(
            "plan rewrite stopped at the iteration limit ({})",
            self.max_iterations
        );
        Ok(plan)
    }

    /// 先重写输入，再在当前节点上依次尝试规则
    ///
    /// 返回新的节点以及本轮是否有规则替换了节点。
    fn rewrite_node(
        &self,
        ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<(PlanNodeEnum, bool)> {
        let (mut current, mut changed) = match node.input() {
            Some(input) => {
                let (new_input, input_changed) = self.rewrite_node(ctx, input)?;
                if input_changed {
                    (node.with_input(new_input), true)
                } else {
                    (node.clone(), false)
                }
            }
            None => (node.clone(), false),
        };

        for rule in self.registry.iter() {
            let Some(result) = rule.rewrite(ctx, &current)? else {
                continue;
            };
            ctx.record_firing(rule.name());
            if let Some(replacement) = result.into_replacement() {
                log::debug!(
                    "rule {} ({}) replaced {} with {}",
                    rule.name(),
                    rule.family(),
                    current.name(),
                    replacement.name()
                );
                current = replacement;
                changed = true;
            }
        }

        Ok((current, changed))
    }
}

impl Default for PlanRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 按优化器配置重写计划
///
/// 会话变量取自配置；返回重写后的计划和本次重写使用的上下文。
pub fn rewrite_plan(
    plan: PlanNodeEnum,
    config: &OptimizerConfig,
) -> RewriteResult<(PlanNodeEnum, RewriteContext)> {
    let mut ctx = RewriteContext::with_session(config.session_variables());
    let plan = PlanRewriter::from_config(config).rewrite(&mut ctx, plan)?;
    Ok((plan, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AggregateFunction, Expression, YieldColumn};
    use crate::query::context::SessionVariables;
    use crate::query::planner::plan::core::nodes::{
        AggregateNode, FilterNode, LimitNode, ScanNode,
    };
    use crate::core::BinaryOperator;

    fn limit_over_agg(limit: u64) -> PlanNodeEnum {
        let scan = PlanNodeEnum::Scan(ScanNode::new(
            "t",
            vec!["a".to_string(), "b".to_string(), "v".to_string()],
        ));
        let agg = AggregateNode::new(
            scan,
            vec![Expression::column("a"), Expression::column("b")],
            vec![
                YieldColumn::column("a"),
                YieldColumn::column("b"),
                YieldColumn::new(
                    Expression::aggregate(AggregateFunction::Sum, Expression::column("v")),
                    "s",
                ),
            ],
        )
        .expect("aggregate");
        PlanNodeEnum::Limit(LimitNode::new(PlanNodeEnum::Aggregate(agg), limit, 0))
    }

    #[test]
    fn test_rewrite_reaches_fixpoint() {
        let mut ctx = RewriteContext::with_session(SessionVariables::default());
        let plan = PlanRewriter::new()
            .rewrite(&mut ctx, limit_over_agg(10))
            .expect("rewrite");

        assert_eq!(
            plan.explain(),
            "TopN(order_keys=[a ASC NULLS LAST, b ASC NULLS LAST], limit=10, offset=0)\n\
             \x20 Aggregate(group_keys=[a, b], columns=[a, b, SUM(v) AS s])\n\
             \x20   Scan(table=t, columns=[a, b, v])"
        );
        assert_eq!(ctx.firing_count("LimitAggToTopNAggRule"), 1);
        assert!(ctx.firing_count("ExtendTopNKeysByGroupKeysRule") >= 2);
    }

    #[test]
    fn test_rewrite_below_other_nodes() {
        let condition = Expression::binary(
            Expression::column("s"),
            BinaryOperator::GreaterThan,
            Expression::literal(0i64),
        );
        let plan = PlanNodeEnum::Filter(FilterNode::new(limit_over_agg(5), condition));
        let mut ctx = RewriteContext::with_session(SessionVariables::default());

        let plan = PlanRewriter::new().rewrite(&mut ctx, plan).expect("rewrite");
        assert!(plan.is_filter());
        assert!(plan.input().map_or(false, |n| n.is_topn()));
    }

    #[test]
    fn test_no_session_leaves_plan_unchanged() {
        let plan = limit_over_agg(10);
        let before = plan.explain();
        let mut ctx = RewriteContext::new();

        let plan = PlanRewriter::new().rewrite(&mut ctx, plan).expect("rewrite");
        assert_eq!(plan.explain(), before);
        assert_eq!(ctx.total_firings(), 0);
    }

    #[test]
    fn test_from_config_respects_disabled_rules() {
        let config = OptimizerConfig {
            disabled_rules: vec!["LimitAggToTopNAggRule".to_string()],
            max_iterations: 0,
            ..OptimizerConfig::default()
        };
        let rewriter = PlanRewriter::from_config(&config);
        assert_eq!(rewriter.registry().len(), 2);
        assert_eq!(rewriter.max_iterations(), 1);

        let (plan, ctx) = rewrite_plan(limit_over_agg(10), &config).expect("rewrite");
        assert!(plan.is_limit());
        assert_eq!(ctx.total_firings(), 0);
    }
}
