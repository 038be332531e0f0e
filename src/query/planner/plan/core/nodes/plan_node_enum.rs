//! PlanNode 枚举定义
//!
//! 计划树中所有节点类型的统一枚举，规则通过模式匹配直接拿到具体节点类型。

use crate::core::Expression;
use crate::query::planner::plan::core::explain::{PlanDescription, PlanNodeDescription};
use super::plan_node_traits::SingleInputNode;

pub use super::aggregate_node::AggregateNode;
pub use super::filter_node::FilterNode;
pub use super::project_node::ProjectNode;
pub use super::scan_node::ScanNode;
pub use super::sort_node::{LimitNode, OrderKey, TopNNode};

/// PlanNode 枚举，包含所有可能的节点类型
///
/// 这个枚举避免了动态分发的性能开销
#[derive(Debug, Clone)]
pub enum PlanNodeEnum {
    /// 扫描节点
    Scan(ScanNode),
    /// 过滤节点
    Filter(FilterNode),
    /// 投影节点
    Project(ProjectNode),
    /// 聚合节点
    Aggregate(AggregateNode),
    /// 限制节点
    Limit(LimitNode),
    /// TopN 节点
    TopN(TopNNode),
}

impl PlanNodeEnum {
    /// 节点类型名称，模式匹配使用此名称
    pub fn name(&self) -> &'static str {
        match self {
            PlanNodeEnum::Scan(_) => "Scan",
            PlanNodeEnum::Filter(_) => "Filter",
            PlanNodeEnum::Project(_) => "Project",
            PlanNodeEnum::Aggregate(_) => "Aggregate",
            PlanNodeEnum::Limit(_) => "Limit",
            PlanNodeEnum::TopN(_) => "TopN",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            PlanNodeEnum::Scan(n) => n.id(),
            PlanNodeEnum::Filter(n) => n.id(),
            PlanNodeEnum::Project(n) => n.id(),
            PlanNodeEnum::Aggregate(n) => n.id(),
            PlanNodeEnum::Limit(n) => n.id(),
            PlanNodeEnum::TopN(n) => n.id(),
        }
    }

    /// 输出列名列表
    pub fn col_names(&self) -> &[String] {
        match self {
            PlanNodeEnum::Scan(n) => n.col_names(),
            PlanNodeEnum::Filter(n) => n.col_names(),
            PlanNodeEnum::Project(n) => n.col_names(),
            PlanNodeEnum::Aggregate(n) => n.col_names(),
            PlanNodeEnum::Limit(n) => n.col_names(),
            PlanNodeEnum::TopN(n) => n.col_names(),
        }
    }

    /// 输出列集合（以列引用表示）
    pub fn output(&self) -> Vec<Expression> {
        self.col_names()
            .iter()
            .map(|name| Expression::Column(name.clone()))
            .collect()
    }

    /// 获取输入节点，叶子节点返回 None
    pub fn input(&self) -> Option<&PlanNodeEnum> {
        match self {
            PlanNodeEnum::Scan(_) => None,
            PlanNodeEnum::Filter(n) => Some(n.input()),
            PlanNodeEnum::Project(n) => Some(n.input()),
            PlanNodeEnum::Aggregate(n) => Some(n.input()),
            PlanNodeEnum::Limit(n) => Some(n.input()),
            PlanNodeEnum::TopN(n) => Some(n.input()),
        }
    }

    /// 以新的输入构造节点副本
    ///
    /// 叶子节点没有输入，传入的节点被丢弃并返回叶子本身的副本；
    /// debug 构建下对叶子调用视为调用方错误。
    pub fn with_input(&self, input: PlanNodeEnum) -> PlanNodeEnum {
        match self {
            PlanNodeEnum::Scan(n) => {
                debug_assert!(
                    false,
                    "leaf node {} has no input to replace with {}",
                    self.name(),
                    input.name()
                );
                PlanNodeEnum::Scan(n.clone())
            }
            PlanNodeEnum::Filter(n) => PlanNodeEnum::Filter(n.with_input(input)),
            PlanNodeEnum::Project(n) => PlanNodeEnum::Project(n.with_input(input)),
            PlanNodeEnum::Aggregate(n) => PlanNodeEnum::Aggregate(n.with_input(input)),
            PlanNodeEnum::Limit(n) => PlanNodeEnum::Limit(n.with_input(input)),
            PlanNodeEnum::TopN(n) => PlanNodeEnum::TopN(n.with_input(input)),
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, PlanNodeEnum::Filter(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, PlanNodeEnum::Aggregate(_))
    }

    pub fn is_limit(&self) -> bool {
        matches!(self, PlanNodeEnum::Limit(_))
    }

    pub fn is_topn(&self) -> bool {
        matches!(self, PlanNodeEnum::TopN(_))
    }

    pub fn as_project(&self) -> Option<&ProjectNode> {
        match self {
            PlanNodeEnum::Project(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregateNode> {
        match self {
            PlanNodeEnum::Aggregate(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_limit(&self) -> Option<&LimitNode> {
        match self {
            PlanNodeEnum::Limit(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_topn(&self) -> Option<&TopNNode> {
        match self {
            PlanNodeEnum::TopN(n) => Some(n),
            _ => None,
        }
    }

    /// 当前节点的描述（不含子节点）
    pub fn describe(&self) -> PlanNodeDescription {
        let desc = match self {
            PlanNodeEnum::Scan(n) => n.describe(),
            PlanNodeEnum::Filter(n) => n.describe(),
            PlanNodeEnum::Project(n) => n.describe(),
            PlanNodeEnum::Aggregate(n) => n.describe(),
            PlanNodeEnum::Limit(n) => n.describe(),
            PlanNodeEnum::TopN(n) => n.describe(),
        };
        match self.input() {
            Some(input) => desc.with_dependencies(vec![input.id()]),
            None => desc,
        }
    }

    /// 整棵计划树的描述，自顶向下
    pub fn describe_tree(&self) -> PlanDescription {
        let mut plan_desc = PlanDescription::new();
        let mut current = Some(self);
        while let Some(node) = current {
            plan_desc.add_node_desc(node.describe());
            current = node.input();
        }
        plan_desc
    }

    /// 以缩进文本形式输出计划树
    ///
    /// ```text
    /// Limit(limit=10, offset=0)
    ///   Aggregate(group_keys=[k], columns=[k, COUNT(v) AS c])
    ///     Scan(table=t, columns=[k, v])
    /// ```
    pub fn explain(&self) -> String {
        self.describe_tree().to_text()
    }
}
