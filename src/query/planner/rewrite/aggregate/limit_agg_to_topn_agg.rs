//! LIMIT 与聚合组合转换为 TopN 聚合的规则族
//!
//! 聚合之上的 LIMIT 若能转换为按分组键排序的 TopN，执行器就可以用
//! 有界的 TopN 缓冲区完成计算，并把 TopN 的阈值下推到局部聚合。
//! 没有排序的 LIMIT 本身不约定返回哪些分组，按分组键排序的 TopN 是它的一种合法实现。
//!
//! # 转换示例
//!
//! Limit -> Aggregate:
//! ```text
//! Limit(10, 0)                      TopN([k1 ASC NULLS LAST], 10, 0)
//!     |                       =>        |
//! Aggregate(group_keys=[k1, k2])    Aggregate(group_keys=[k1, k2])
//! ```
//!
//! Limit -> Project -> Aggregate，且投影未输出第一个分组键:
//! ```text
//! Limit(10, 0)                      Project([cnt])
//!     |                                 |
//! Project([cnt])              =>    TopN([k1 ASC NULLS LAST], 10, 0)
//!     |                                 |
//! Aggregate(group_keys=[k1])        Project([cnt, k1])
//!                                       |
//!                                   Aggregate(group_keys=[k1])
//! ```
//!
//! TopN -> Aggregate，排序键是分组键的前缀:
//! ```text
//! TopN([k1 DESC], 10, 0)            TopN([k1 DESC, k2 ASC NULLS LAST], 10, 0)
//!     |                       =>        |
//! Aggregate(group_keys=[k1, k2])    Aggregate(group_keys=[k1, k2])
//! ```
//!
//! # 适用条件
//!
//! - 存在会话变量，且 `push_topn_to_agg` 开启
//! - `limit + offset` 不超过 `topn_opt_limit_threshold`
//! - 聚合至少有一个分组键

use crate::core::{Expression, YieldColumn};
use crate::query::planner::plan::core::nodes::plan_node_traits::{PlanNode, SingleInputNode};
use crate::query::planner::plan::core::nodes::{
    AggregateNode, LimitNode, OrderKey, ProjectNode, TopNNode,
};
use crate::query::planner::plan::PlanNodeEnum;
use crate::query::planner::rewrite::context::RewriteContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{RewriteError, RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::{RewriteRule, RuleFamily};

/// 会话是否允许对给定的 limit/offset 做 TopN 聚合转换
///
/// 没有会话时返回 false。`limit + offset` 饱和相加，溢出时视为超过阈值。
pub fn topn_to_agg_enabled(ctx: &RewriteContext, limit: u64, offset: u64) -> bool {
    match ctx.session() {
        Some(vars) => {
            vars.push_topn_to_agg
                && limit.saturating_add(offset) <= vars.topn_opt_limit_threshold
        }
        None => false,
    }
}

/// 由第一个分组键生成升序、空值在后的排序键
///
/// 全局聚合（无分组键）返回 None。
pub fn try_generate_order_key_by_first_group_key(agg: &AggregateNode) -> Option<OrderKey> {
    agg.group_keys()
        .first()
        .map(|key| OrderKey::asc(key.clone()))
}

/// 用分组键补全 TopN 的排序键
///
/// TopN 的排序表达式必须逐位等于分组键的前缀（方向和空值位置不参与比较，
/// 并原样保留），之后依次追加剩余分组键的升序排序键。
/// 排序键多于分组键或前缀不一致时返回空列表。
pub fn try_generate_order_keys_by_group_keys_and_topn_keys(
    topn: &TopNNode,
    agg: &AggregateNode,
) -> Vec<OrderKey> {
    let order_keys = topn.order_keys();
    let group_keys = agg.group_keys();
    if order_keys.len() > group_keys.len() {
        return Vec::new();
    }

    let is_prefix = order_keys
        .iter()
        .zip(group_keys)
        .all(|(order_key, group_key)| order_key.expr() == group_key);
    if !is_prefix {
        return Vec::new();
    }

    let mut new_keys = Vec::with_capacity(group_keys.len());
    new_keys.extend(order_keys.iter().cloned());
    new_keys.extend(
        group_keys[order_keys.len()..]
            .iter()
            .map(|key| OrderKey::asc(key.clone())),
    );
    new_keys
}

/// LIMIT 的输出列是否覆盖了全部分组键
pub fn output_all_group_keys(limit: &LimitNode, agg: &AggregateNode) -> bool {
    let output = limit.output();
    agg.group_keys().iter().all(|key| output.contains(key))
}

/// 投影是否把分组键原样透传到上层
///
/// 同名但改绑到其他表达式的输出列（如 `cnt AS k1`）不算透传。
fn project_passes_group_key(
    project: &ProjectNode,
    agg: &AggregateNode,
    key: &Expression,
) -> bool {
    project.columns().iter().any(|c| c.passes_through(key))
        && agg.columns().iter().any(|c| c.passes_through(key))
}

fn expect_limit(node: &PlanNodeEnum) -> RewriteResult<&LimitNode> {
    node.as_limit().ok_or_else(|| {
        RewriteError::invalid_plan_structure(format!("expected Limit, found {}", node.name()))
    })
}

fn expect_topn(node: &PlanNodeEnum) -> RewriteResult<&TopNNode> {
    node.as_topn().ok_or_else(|| {
        RewriteError::invalid_plan_structure(format!("expected TopN, found {}", node.name()))
    })
}

fn expect_project(node: &PlanNodeEnum) -> RewriteResult<&ProjectNode> {
    node.as_project().ok_or_else(|| {
        RewriteError::invalid_plan_structure(format!("expected Project, found {}", node.name()))
    })
}

fn expect_aggregate(node: &PlanNodeEnum) -> RewriteResult<&AggregateNode> {
    node.as_aggregate().ok_or_else(|| {
        RewriteError::invalid_plan_structure(format!("expected Aggregate, found {}", node.name()))
    })
}

fn limit_guard(ctx: &RewriteContext, node: &PlanNodeEnum) -> bool {
    node.as_limit()
        .map_or(false, |limit| topn_to_agg_enabled(ctx, limit.limit(), limit.offset()))
}

/// Limit -> Aggregate 转换为 TopN -> Aggregate
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitAggToTopNAggRule;

impl LimitAggToTopNAggRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for LimitAggToTopNAggRule {
    fn name(&self) -> &'static str {
        "LimitAggToTopNAggRule"
    }

    fn family(&self) -> RuleFamily {
        RuleFamily::LimitAggToTopNAgg
    }

    fn pattern(&self) -> Pattern {
        Pattern::new_with_name("Limit").with_dependency_name("Aggregate")
    }

    fn guard(&self, ctx: &RewriteContext, node: &PlanNodeEnum) -> bool {
        limit_guard(ctx, node)
    }

    fn apply(
        &self,
        _ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<Option<TransformResult>> {
        let limit = expect_limit(node)?;
        let agg = expect_aggregate(limit.input())?;

        let Some(order_key) = try_generate_order_key_by_first_group_key(agg) else {
            log::trace!("{}: aggregate has no group key", self.name());
            return Ok(None);
        };

        let topn = TopNNode::new(
            limit.input().clone(),
            vec![order_key],
            limit.limit(),
            limit.offset(),
        )?;
        log::debug!("{}: Limit({}, {}) -> TopN", self.name(), limit.limit(), limit.offset());
        Ok(Some(TransformResult::replace(PlanNodeEnum::TopN(topn))))
    }
}

/// Limit -> Project -> Aggregate 转换为 TopN -> Project -> Aggregate
///
/// 投影没有输出第一个分组键时，先在投影中补上该列，
/// 再在 TopN 之上加一层投影恢复 LIMIT 原有的输出列。
/// 补列要求聚合本身输出该分组键，否则规则不触发。
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitProjectAggToTopNAggRule;

impl LimitProjectAggToTopNAggRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for LimitProjectAggToTopNAggRule {
    fn name(&self) -> &'static str {
        "LimitProjectAggToTopNAggRule"
    }

    fn family(&self) -> RuleFamily {
        RuleFamily::LimitAggToTopNAgg
    }

    fn pattern(&self) -> Pattern {
        Pattern::new_with_name("Limit")
            .with_dependency(Pattern::new_with_name("Project").with_dependency_name("Aggregate"))
    }

    fn guard(&self, ctx: &RewriteContext, node: &PlanNodeEnum) -> bool {
        limit_guard(ctx, node)
    }

    fn apply(
        &self,
        _ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<Option<TransformResult>> {
        let limit = expect_limit(node)?;
        let project = expect_project(limit.input())?;
        let agg = expect_aggregate(project.input())?;

        let Some(order_key) = try_generate_order_key_by_first_group_key(agg) else {
            log::trace!("{}: aggregate has no group key", self.name());
            return Ok(None);
        };

        let keys_pass_through = agg
            .group_keys()
            .iter()
            .all(|key| project_passes_group_key(project, agg, key));
        if output_all_group_keys(limit, agg) && keys_pass_through {
            let topn = TopNNode::new(
                limit.input().clone(),
                vec![order_key],
                limit.limit(),
                limit.offset(),
            )?;
            log::debug!("{}: group keys covered, TopN above Project", self.name());
            return Ok(Some(TransformResult::replace(PlanNodeEnum::TopN(topn))));
        }

        let first_key = order_key.expr().clone();
        let Some(key_name) = first_key.as_column() else {
            log::trace!("{}: first group key `{}` is not a column", self.name(), first_key);
            return Ok(None);
        };

        if project.output().contains(&first_key) {
            if !project_passes_group_key(project, agg, &first_key) {
                log::trace!("{}: `{}` is rebound by the project", self.name(), key_name);
                return Ok(None);
            }
            let topn = TopNNode::new(
                limit.input().clone(),
                vec![order_key],
                limit.limit(),
                limit.offset(),
            )?;
            log::debug!("{}: first group key already projected", self.name());
            return Ok(Some(TransformResult::replace(PlanNodeEnum::TopN(topn))));
        }

        // 补列的投影只能引用聚合实际输出的列
        if !agg.output().contains(&first_key) {
            log::trace!("{}: aggregate does not output `{}`", self.name(), key_name);
            return Ok(None);
        }

        let mut bottom_columns = project.columns().to_vec();
        bottom_columns.push(YieldColumn::column(key_name));
        let bottom_project = project.with_columns(bottom_columns)?;

        let topn = TopNNode::new(
            PlanNodeEnum::Project(bottom_project),
            vec![order_key],
            limit.limit(),
            limit.offset(),
        )?;

        let top_columns: Vec<YieldColumn> = limit
            .col_names()
            .iter()
            .map(|name| YieldColumn::column(name.as_str()))
            .collect();
        let top_project = ProjectNode::new(PlanNodeEnum::TopN(topn), top_columns)?;

        log::debug!("{}: injected `{}` below TopN and pruned it above", self.name(), key_name);
        Ok(Some(TransformResult::replace(PlanNodeEnum::Project(top_project))))
    }
}

/// TopN -> Aggregate：排序键是分组键前缀时，用剩余分组键补全排序键
///
/// 排序键无法补全时规则仍视为触发，返回不变的结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendTopNKeysByGroupKeysRule;

impl ExtendTopNKeysByGroupKeysRule {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for ExtendTopNKeysByGroupKeysRule {
    fn name(&self) -> &'static str {
        "ExtendTopNKeysByGroupKeysRule"
    }

    fn family(&self) -> RuleFamily {
        RuleFamily::LimitAggToTopNAgg
    }

    fn pattern(&self) -> Pattern {
        Pattern::new_with_name("TopN").with_dependency_name("Aggregate")
    }

    fn guard(&self, ctx: &RewriteContext, node: &PlanNodeEnum) -> bool {
        node.as_topn()
            .map_or(false, |topn| topn_to_agg_enabled(ctx, topn.limit(), topn.offset()))
    }

    fn apply(
        &self,
        _ctx: &mut RewriteContext,
        node: &PlanNodeEnum,
    ) -> RewriteResult<Option<TransformResult>> {
        let topn = expect_topn(node)?;
        let agg = expect_aggregate(topn.input())?;

        let new_keys = try_generate_order_keys_by_group_keys_and_topn_keys(topn, agg);
        if new_keys.is_empty() || new_keys.as_slice() == topn.order_keys() {
            log::trace!("{}: order keys left as is", self.name());
            return Ok(Some(TransformResult::unchanged()));
        }

        let extended = topn.with_order_keys(new_keys)?;
        log::debug!(
            "{}: extended order keys from {} to {}",
            self.name(),
            topn.order_keys().len(),
            extended.order_keys().len()
        );
        Ok(Some(TransformResult::replace(PlanNodeEnum::TopN(extended))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AggregateFunction, BinaryOperator};
    use crate::query::context::SessionVariables;
    use crate::query::planner::plan::core::nodes::ScanNode;

    fn column_of(key: &OrderKey) -> Option<&str> {
        key.expr().as_column()
    }

    fn ctx() -> RewriteContext {
        RewriteContext::with_session(SessionVariables::new(true, 100))
    }

    fn scan() -> PlanNodeEnum {
        PlanNodeEnum::Scan(ScanNode::new(
            "t",
            vec!["k1".to_string(), "k2".to_string(), "v".to_string()],
        ))
    }

    fn count_v() -> YieldColumn {
        YieldColumn::new(
            Expression::aggregate(AggregateFunction::Count, Expression::column("v")),
            "cnt",
        )
    }

    /// Aggregate(group_keys=[k1, k2], columns=[k1, k2, cnt])
    fn agg_k1_k2() -> PlanNodeEnum {
        PlanNodeEnum::Aggregate(
            AggregateNode::new(
                scan(),
                vec![Expression::column("k1"), Expression::column("k2")],
                vec![YieldColumn::column("k1"), YieldColumn::column("k2"), count_v()],
            )
            .expect("aggregate"),
        )
    }

    fn global_agg() -> PlanNodeEnum {
        PlanNodeEnum::Aggregate(
            AggregateNode::new(scan(), vec![], vec![count_v()]).expect("aggregate"),
        )
    }

    fn project(input: PlanNodeEnum, names: &[&str]) -> PlanNodeEnum {
        let columns = names.iter().map(|n| YieldColumn::column(*n)).collect();
        PlanNodeEnum::Project(ProjectNode::new(input, columns).expect("project"))
    }

    fn limit(input: PlanNodeEnum, limit: u64, offset: u64) -> PlanNodeEnum {
        PlanNodeEnum::Limit(LimitNode::new(input, limit, offset))
    }

    fn topn(input: PlanNodeEnum, keys: Vec<OrderKey>) -> PlanNodeEnum {
        PlanNodeEnum::TopN(TopNNode::new(input, keys, 10, 0).expect("topn"))
    }

    fn replacement(result: Option<TransformResult>) -> PlanNodeEnum {
        result
            .expect("rule should fire")
            .into_replacement()
            .expect("rule should replace the node")
    }

    #[test]
    fn test_guard_requires_session() {
        let ctx = RewriteContext::new();
        assert!(!topn_to_agg_enabled(&ctx, 1, 0));
    }

    #[test]
    fn test_guard_respects_switch() {
        let ctx = RewriteContext::with_session(SessionVariables::new(false, 100));
        assert!(!topn_to_agg_enabled(&ctx, 1, 0));
    }

    #[test]
    fn test_guard_threshold_is_inclusive() {
        let ctx = ctx();
        assert!(topn_to_agg_enabled(&ctx, 60, 40));
        assert!(!topn_to_agg_enabled(&ctx, 60, 41));
        assert!(!topn_to_agg_enabled(&ctx, u64::MAX, 1));
    }

    #[test]
    fn test_guard_is_monotonic() {
        let ctx = ctx();
        for total in 0..=150u64 {
            let passes = topn_to_agg_enabled(&ctx, total, 0);
            if passes {
                for smaller in 0..total {
                    assert!(topn_to_agg_enabled(&ctx, smaller, 0));
                }
            }
        }
    }

    #[test]
    fn test_first_group_key_order() {
        let agg = agg_k1_k2();
        let key = try_generate_order_key_by_first_group_key(
            agg.as_aggregate().expect("aggregate"),
        )
        .expect("grouped aggregate yields a key");
        assert_eq!(key, OrderKey::new(Expression::column("k1"), true, false));

        let global = global_agg();
        assert!(
            try_generate_order_key_by_first_group_key(global.as_aggregate().expect("aggregate"))
                .is_none()
        );
    }

    #[test]
    fn test_limit_agg_to_topn() {
        let plan = limit(agg_k1_k2(), 10, 5);
        let rule = LimitAggToTopNAggRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let topn = new_plan.as_topn().expect("TopN at the root");

        assert_eq!(topn.limit(), 10);
        assert_eq!(topn.offset(), 5);
        assert_eq!(topn.order_keys(), &[OrderKey::asc(Expression::column("k1"))]);
        assert!(topn.input().is_aggregate());
        assert_eq!(new_plan.col_names(), plan.col_names());
    }

    #[test]
    fn test_limit_agg_declines_global_aggregate() {
        let rule = LimitAggToTopNAggRule::new();
        let mut ctx = ctx();

        let plan = limit(global_agg(), 10, 0);
        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());

        let plan = limit(project(global_agg(), &["cnt"]), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());
    }

    #[test]
    fn test_limit_agg_declines_over_threshold() {
        let plan = limit(agg_k1_k2(), 100, 1);
        let rule = LimitAggToTopNAggRule::new();
        let mut ctx = ctx();
        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());
    }

    #[test]
    fn test_limit_project_agg_group_keys_covered() {
        let plan = limit(project(agg_k1_k2(), &["k1", "k2", "cnt"]), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let topn = new_plan.as_topn().expect("TopN at the root");
        assert_eq!(topn.order_keys(), &[OrderKey::asc(Expression::column("k1"))]);

        let project = topn.input().as_project().expect("Project below TopN");
        assert_eq!(project.col_names(), plan.col_names());
        assert!(project.input().is_aggregate());
    }

    #[test]
    fn test_limit_project_agg_injects_first_key() {
        let plan = limit(project(agg_k1_k2(), &["cnt"]), 10, 3);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let top = new_plan.as_project().expect("pruning Project at the root");
        assert_eq!(top.col_names(), &["cnt".to_string()]);

        let topn = top.input().as_topn().expect("TopN below the pruning Project");
        assert_eq!(topn.limit(), 10);
        assert_eq!(topn.offset(), 3);
        assert_eq!(topn.order_keys().len(), 1);
        assert_eq!(column_of(&topn.order_keys()[0]), Some("k1"));

        let bottom = topn.input().as_project().expect("extended Project below TopN");
        assert_eq!(bottom.col_names(), &["cnt".to_string(), "k1".to_string()]);
        assert!(bottom.input().is_aggregate());
    }

    #[test]
    fn test_limit_project_agg_first_key_already_projected() {
        let plan = limit(project(agg_k1_k2(), &["k1", "cnt"]), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let topn = new_plan.as_topn().expect("TopN at the root");
        let project = topn.input().as_project().expect("Project below TopN");
        assert_eq!(project.col_names(), &["k1".to_string(), "cnt".to_string()]);
    }

    #[test]
    fn test_limit_project_agg_declines_non_column_first_key() {
        let k1_plus_one = Expression::binary(
            Expression::column("k1"),
            BinaryOperator::Add,
            Expression::literal(1i64),
        );
        let agg = PlanNodeEnum::Aggregate(
            AggregateNode::new(
                scan(),
                vec![k1_plus_one.clone()],
                vec![YieldColumn::new(k1_plus_one, "g"), count_v()],
            )
            .expect("aggregate"),
        );
        let plan = limit(project(agg, &["cnt"]), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());
    }

    #[test]
    fn test_limit_project_agg_declines_when_key_not_in_aggregate_output() {
        let agg = PlanNodeEnum::Aggregate(
            AggregateNode::new(scan(), vec![Expression::column("k1")], vec![count_v()])
                .expect("aggregate"),
        );
        let plan = limit(project(agg, &["cnt"]), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());
    }

    #[test]
    fn test_limit_project_agg_declines_rebound_group_key() {
        // Project([cnt AS k1]) 输出名为 k1 的列，但它不是分组键 k1
        let agg = PlanNodeEnum::Aggregate(
            AggregateNode::new(scan(), vec![Expression::column("k1")], vec![count_v()])
                .expect("aggregate"),
        );
        let rebound = ProjectNode::new(
            agg,
            vec![YieldColumn::new(Expression::column("cnt"), "k1")],
        )
        .expect("project");
        let plan = limit(PlanNodeEnum::Project(rebound), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        assert!(rule.rewrite(&mut ctx, &plan).expect("rewrite").is_none());
    }

    #[test]
    fn test_limit_project_agg_renamed_column_injects_real_key() {
        // 投影只输出重命名的 cnt，分组键 k1 需要补到投影中
        let rebound = ProjectNode::new(
            agg_k1_k2(),
            vec![
                YieldColumn::new(Expression::column("cnt"), "k1_total"),
                YieldColumn::column("k2"),
            ],
        )
        .expect("project");
        let plan = limit(PlanNodeEnum::Project(rebound), 10, 0);
        let rule = LimitProjectAggToTopNAggRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let top = new_plan.as_project().expect("pruning Project at the root");
        let topn = top.input().as_topn().expect("TopN");
        assert_eq!(column_of(&topn.order_keys()[0]), Some("k1"));
        let bottom = topn.input().as_project().expect("extended Project");
        assert!(bottom.columns().iter().any(|c| c.passes_through(&Expression::column("k1"))));
    }

    #[test]
    fn test_topn_keys_extended_by_group_keys() {
        let plan = topn(agg_k1_k2(), vec![OrderKey::desc(Expression::column("k1"), true)]);
        let rule = ExtendTopNKeysByGroupKeysRule::new();
        let mut ctx = ctx();

        let new_plan = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let topn = new_plan.as_topn().expect("TopN");
        assert_eq!(
            topn.order_keys(),
            &[
                OrderKey::desc(Expression::column("k1"), true),
                OrderKey::asc(Expression::column("k2")),
            ]
        );
        assert_eq!(topn.limit(), 10);
        assert!(topn.input().is_aggregate());
    }

    #[test]
    fn test_topn_prefix_mismatch_is_identity() {
        let plan = topn(agg_k1_k2(), vec![OrderKey::asc(Expression::column("k2"))]);
        let rule = ExtendTopNKeysByGroupKeysRule::new();
        let mut ctx = ctx();

        let result = rule.rewrite(&mut ctx, &plan).expect("rewrite").expect("rule fires");
        assert!(result.into_replacement().is_none());
    }

    #[test]
    fn test_topn_over_specified_is_identity() {
        let plan = topn(
            agg_k1_k2(),
            vec![
                OrderKey::asc(Expression::column("k1")),
                OrderKey::asc(Expression::column("k2")),
                OrderKey::asc(Expression::column("cnt")),
            ],
        );
        let node = plan.as_topn().expect("TopN");
        let agg = node.input().as_aggregate().expect("aggregate");
        assert!(try_generate_order_keys_by_group_keys_and_topn_keys(node, agg).is_empty());

        let rule = ExtendTopNKeysByGroupKeysRule::new();
        let mut ctx = ctx();
        let result = rule.rewrite(&mut ctx, &plan).expect("rewrite").expect("rule fires");
        assert!(result.into_replacement().is_none());
    }

    #[test]
    fn test_topn_extension_is_idempotent() {
        let plan = topn(agg_k1_k2(), vec![OrderKey::asc(Expression::column("k1"))]);
        let rule = ExtendTopNKeysByGroupKeysRule::new();
        let mut ctx = ctx();

        let once = replacement(rule.rewrite(&mut ctx, &plan).expect("rewrite"));
        let twice = rule.rewrite(&mut ctx, &once).expect("rewrite").expect("rule fires");
        assert!(twice.into_replacement().is_none());
    }

    #[test]
    fn test_mismatched_node_is_an_error() {
        let plan = topn(agg_k1_k2(), vec![OrderKey::asc(Expression::column("k1"))]);
        let mut ctx = ctx();

        let err = LimitAggToTopNAggRule::new()
            .apply(&mut ctx, &plan)
            .expect_err("TopN is not a Limit");
        assert!(matches!(err, RewriteError::InvalidPlanStructure(_)));

        let plan = limit(scan(), 1, 0);
        let err = LimitProjectAggToTopNAggRule::new()
            .apply(&mut ctx, &plan)
            .expect_err("Scan is not a Project");
        assert!(matches!(err, RewriteError::InvalidPlanStructure(_)));
    }

    #[test]
    fn test_rules_share_family() {
        assert_eq!(LimitAggToTopNAggRule.family(), RuleFamily::LimitAggToTopNAgg);
        assert_eq!(LimitProjectAggToTopNAggRule.family(), RuleFamily::LimitAggToTopNAgg);
        assert_eq!(ExtendTopNKeysByGroupKeysRule.family(), RuleFamily::LimitAggToTopNAgg);
    }
}
