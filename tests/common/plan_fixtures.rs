//! 计划夹具
//!
//! 以 `sales(region, city, amount)` 表为基础构造常见的计划片段。

use topn_agg::core::{AggregateFunction, Expression, YieldColumn};
use topn_agg::query::planner::plan::{
    AggregateNode, FilterNode, LimitNode, OrderKey, PlanNodeEnum, ProjectNode, ScanNode,
    TopNNode,
};

pub fn sales_scan() -> PlanNodeEnum {
    PlanNodeEnum::Scan(ScanNode::new(
        "sales",
        vec!["region".to_string(), "city".to_string(), "amount".to_string()],
    ))
}

pub fn total_amount() -> YieldColumn {
    YieldColumn::new(
        Expression::aggregate(AggregateFunction::Sum, Expression::column("amount")),
        "total",
    )
}

/// GROUP BY region, city，输出 region, city, total
pub fn group_by_region_city() -> PlanNodeEnum {
    PlanNodeEnum::Aggregate(
        AggregateNode::new(
            sales_scan(),
            vec![Expression::column("region"), Expression::column("city")],
            vec![
                YieldColumn::column("region"),
                YieldColumn::column("city"),
                total_amount(),
            ],
        )
        .expect("aggregate fixture"),
    )
}

/// 无分组的全局聚合
pub fn global_total() -> PlanNodeEnum {
    PlanNodeEnum::Aggregate(
        AggregateNode::new(sales_scan(), vec![], vec![total_amount()]).expect("aggregate fixture"),
    )
}

pub fn project(input: PlanNodeEnum, names: &[&str]) -> PlanNodeEnum {
    let columns = names.iter().map(|name| YieldColumn::column(*name)).collect();
    PlanNodeEnum::Project(ProjectNode::new(input, columns).expect("project fixture"))
}

pub fn filter(input: PlanNodeEnum, condition: Expression) -> PlanNodeEnum {
    PlanNodeEnum::Filter(FilterNode::new(input, condition))
}

pub fn limit(input: PlanNodeEnum, limit: u64, offset: u64) -> PlanNodeEnum {
    PlanNodeEnum::Limit(LimitNode::new(input, limit, offset))
}

pub fn topn(input: PlanNodeEnum, keys: Vec<OrderKey>, limit: u64, offset: u64) -> PlanNodeEnum {
    PlanNodeEnum::TopN(TopNNode::new(input, keys, limit, offset).expect("topn fixture"))
}
