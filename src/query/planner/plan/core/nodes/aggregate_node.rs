//! 聚合节点实现
//!
//! AggregateNode 用于对输入数据进行分组聚合操作

use crate::core::{Expression, YieldColumn};
use crate::define_plan_node_with_deps;
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id_generator::next_node_id;
use crate::query::planner::planner::PlannerError;
use super::plan_node_enum::PlanNodeEnum;

define_plan_node_with_deps! {
    pub struct AggregateNode {
        group_keys: Vec<Expression>,
        columns: Vec<YieldColumn>,
        col_names: Vec<String>,
    }
    enum: Aggregate
    input: SingleInputNode
}

impl AggregateNode {
    /// 创建新的聚合节点
    ///
    /// `group_keys` 为空表示全局聚合；`columns` 为聚合的输出列，
    /// 分组列若需要对上层可见，应以透传列的形式出现在其中。
    /// 与分组键同名的输出列必须是该分组键的透传。
    pub fn new(
        input: PlanNodeEnum,
        group_keys: Vec<Expression>,
        columns: Vec<YieldColumn>,
    ) -> Result<Self, PlannerError> {
        let mut col_names: Vec<String> = Vec::with_capacity(columns.len());
        for col in &columns {
            if col_names.contains(&col.alias) {
                return Err(PlannerError::DuplicateColumn(col.alias.clone()));
            }
            let shadows_key = group_keys
                .iter()
                .any(|key| key.as_column() == Some(col.alias.as_str()) && !col.passes_through(key));
            if shadows_key {
                return Err(PlannerError::InvalidOperation(format!(
                    "column {} shadows a group key with `{}`",
                    col.alias, col.expression
                )));
            }
            col_names.push(col.alias.clone());
        }

        Ok(Self {
            id: next_node_id(),
            input: Box::new(input),
            group_keys,
            columns,
            col_names,
        })
    }

    /// 获取分组键
    pub fn group_keys(&self) -> &[Expression] {
        &self.group_keys
    }

    /// 获取输出列
    pub fn columns(&self) -> &[YieldColumn] {
        &self.columns
    }

    /// 是否为无分组的全局聚合
    pub fn is_global(&self) -> bool {
        self.group_keys.is_empty()
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn describe(&self) -> PlanNodeDescription {
        let keys: Vec<String> = self.group_keys.iter().map(|k| k.to_string()).collect();
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        PlanNodeDescription::new("Aggregate", self.id)
            .with_description("group_keys", format!("[{}]", keys.join(", ")))
            .with_description("columns", format!("[{}]", columns.join(", ")))
    }
}
