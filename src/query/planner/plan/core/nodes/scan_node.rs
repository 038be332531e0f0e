//! 扫描节点实现
//!
//! ScanNode 是计划树的叶子节点，按给定列读取一张表

use crate::define_plan_node;
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id_generator::next_node_id;

define_plan_node! {
    pub struct ScanNode {
        table: String,
        col_names: Vec<String>,
    }
    enum: Scan
}

impl ScanNode {
    /// 创建新的扫描节点
    pub fn new(table: impl Into<String>, col_names: Vec<String>) -> Self {
        Self {
            id: next_node_id(),
            table: table.into(),
            col_names,
        }
    }

    /// 获取表名
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn describe(&self) -> PlanNodeDescription {
        PlanNodeDescription::new("Scan", self.id)
            .with_description("table", self.table.as_str())
            .with_description("columns", format!("[{}]", self.col_names.join(", ")))
    }
}
