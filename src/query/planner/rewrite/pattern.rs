//! 模式匹配定义
//!
//! 提供计划节点的模式匹配功能，用于重写规则识别特定计划结构。

use crate::query::planner::plan::PlanNodeEnum;

/// 模式结构体
///
/// 由当前节点的匹配条件和子节点的模式组成。计划节点均为单输入，
/// 因此子节点模式按顺序沿输入链逐层匹配。
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    /// 当前节点的匹配条件，None 表示匹配任何节点
    pub node: Option<MatchNode>,
    /// 子节点的模式列表
    pub dependencies: Vec<Pattern>,
}

impl Pattern {
    /// 创建空模式（匹配任何节点）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(node: MatchNode) -> Self {
        Self {
            node: Some(node),
            dependencies: Vec::new(),
        }
    }

    /// 使用节点名称创建模式
    pub fn new_with_name(name: &'static str) -> Self {
        Self::with_node(MatchNode::Single(name))
    }

    /// 添加子节点模式
    pub fn with_dependency(mut self, dependency: Pattern) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// 使用节点名称添加子节点模式
    pub fn with_dependency_name(self, name: &'static str) -> Self {
        self.with_dependency(Self::new_with_name(name))
    }

    /// 检查模式是否匹配给定的计划节点
    pub fn matches(&self, plan_node: &PlanNodeEnum) -> bool {
        if let Some(ref node) = self.node {
            if !node.matches(plan_node.name()) {
                return false;
            }
        }

        match self.dependencies.as_slice() {
            [] => true,
            [dep] => plan_node.input().map_or(false, |input| dep.matches(input)),
            // 单输入节点无法满足多个子模式
            _ => false,
        }
    }
}

/// 节点匹配枚举
#[derive(Debug, Clone)]
pub enum MatchNode {
    /// 匹配单个特定名称的节点
    Single(&'static str),
}

impl MatchNode {
    pub fn matches(&self, node_name: &str) -> bool {
        match self {
            MatchNode::Single(name) => *name == node_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Expression, YieldColumn};
    use crate::query::planner::plan::core::nodes::{
        AggregateNode, LimitNode, ProjectNode, ScanNode,
    };

    fn limit_project_aggregate() -> PlanNodeEnum {
        let scan = PlanNodeEnum::Scan(ScanNode::new("t", vec!["k".to_string()]));
        let agg = AggregateNode::new(
            scan,
            vec![Expression::column("k")],
            vec![YieldColumn::column("k")],
        )
        .expect("aggregate");
        let project = ProjectNode::new(PlanNodeEnum::Aggregate(agg), vec![YieldColumn::column("k")])
            .expect("project");
        PlanNodeEnum::Limit(LimitNode::new(PlanNodeEnum::Project(project), 1, 0))
    }

    #[test]
    fn test_single_node_pattern() {
        let plan = limit_project_aggregate();
        assert!(Pattern::new_with_name("Limit").matches(&plan));
        assert!(!Pattern::new_with_name("TopN").matches(&plan));
        assert!(Pattern::new().matches(&plan));
    }

    #[test]
    fn test_nested_pattern_checks_every_level() {
        let plan = limit_project_aggregate();

        let full = Pattern::new_with_name("Limit").with_dependency(
            Pattern::new_with_name("Project").with_dependency_name("Aggregate"),
        );
        assert!(full.matches(&plan));

        let wrong_leaf = Pattern::new_with_name("Limit").with_dependency(
            Pattern::new_with_name("Project").with_dependency_name("Scan"),
        );
        assert!(!wrong_leaf.matches(&plan));

        let skip_level = Pattern::new_with_name("Limit").with_dependency_name("Aggregate");
        assert!(!skip_level.matches(&plan));
    }

    #[test]
    fn test_leaf_has_no_dependency() {
        let scan = PlanNodeEnum::Scan(ScanNode::new("t", vec![]));
        let pattern = Pattern::new_with_name("Scan").with_dependency(Pattern::new());
        assert!(!pattern.matches(&scan));
    }
}
