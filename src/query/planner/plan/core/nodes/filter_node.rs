//! 过滤节点实现
//!
//! FilterNode 用于根据指定的条件过滤输入数据流

use crate::core::Expression;
use crate::define_plan_node_with_deps;
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id_generator::next_node_id;
use super::plan_node_enum::PlanNodeEnum;

define_plan_node_with_deps! {
    pub struct FilterNode {
        condition: Expression,
    }
    enum: Filter
    input: SingleInputNode
}

impl FilterNode {
    /// 创建新的过滤节点
    pub fn new(input: PlanNodeEnum, condition: Expression) -> Self {
        Self {
            id: next_node_id(),
            input: Box::new(input),
            condition,
        }
    }

    /// 获取过滤条件
    pub fn condition(&self) -> &Expression {
        &self.condition
    }

    pub fn col_names(&self) -> &[String] {
        self.input.col_names()
    }

    pub fn describe(&self) -> PlanNodeDescription {
        PlanNodeDescription::new("Filter", self.id)
            .with_description("condition", self.condition.to_string())
    }
}
