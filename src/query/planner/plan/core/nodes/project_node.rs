//! 投影节点实现
//!
//! ProjectNode 用于根据指定的列表达式投影输入数据流

use crate::core::YieldColumn;
use crate::define_plan_node_with_deps;
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id_generator::next_node_id;
use crate::query::planner::planner::PlannerError;
use super::plan_node_enum::PlanNodeEnum;

define_plan_node_with_deps! {
    pub struct ProjectNode {
        columns: Vec<YieldColumn>,
        col_names: Vec<String>,
    }
    enum: Project
    input: SingleInputNode
}

impl ProjectNode {
    /// 创建新的投影节点
    ///
    /// 列名在计划内唯一标识一列：输出列别名不能重复，
    /// 与输入列同名的输出列必须是对该输入列的直接透传。
    pub fn new(input: PlanNodeEnum, columns: Vec<YieldColumn>) -> Result<Self, PlannerError> {
        let col_names = Self::validate_columns(&input, &columns)?;

        Ok(Self {
            id: next_node_id(),
            input: Box::new(input),
            columns,
            col_names,
        })
    }

    fn validate_columns(
        input: &PlanNodeEnum,
        columns: &[YieldColumn],
    ) -> Result<Vec<String>, PlannerError> {
        let mut col_names: Vec<String> = Vec::with_capacity(columns.len());
        for col in columns {
            if col_names.contains(&col.alias) {
                return Err(PlannerError::DuplicateColumn(col.alias.clone()));
            }
            if input.col_names().contains(&col.alias) && !col.passes_through(&col.to_column()) {
                return Err(PlannerError::InvalidOperation(format!(
                    "column {} rebinds an input column to `{}`",
                    col.alias, col.expression
                )));
            }
            col_names.push(col.alias.clone());
        }
        Ok(col_names)
    }

    /// 获取投影列
    pub fn columns(&self) -> &[YieldColumn] {
        &self.columns
    }

    /// 以新的投影列构造副本，输入不变
    pub fn with_columns(&self, columns: Vec<YieldColumn>) -> Result<Self, PlannerError> {
        Self::new((*self.input).clone(), columns)
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn describe(&self) -> PlanNodeDescription {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        PlanNodeDescription::new("Project", self.id)
            .with_description("columns", format!("[{}]", columns.join(", ")))
    }
}
