//! 计划描述
//!
//! 计划节点的可读描述，用于 EXPLAIN 文本输出和 JSON 序列化。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 节点描述键值对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 计划节点描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanNodeDescription {
    pub name: String,
    pub id: i64,
    pub description: Vec<Pair>,
    pub dependencies: Option<Vec<i64>>,
}

impl PlanNodeDescription {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
            description: Vec::new(),
            dependencies: None,
        }
    }

    pub fn add_description(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.description.push(Pair::new(key, value));
    }

    pub fn with_description(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_description(key, value);
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<i64>) -> Self {
        self.dependencies = Some(deps);
        self
    }

    /// 单行文本形式：`Name(k=v, k=v)`
    pub fn to_line(&self) -> String {
        let pairs: Vec<String> = self
            .description
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect();
        format!("{}({})", self.name, pairs.join(", "))
    }
}

/// 计划描述
///
/// 节点按自顶向下的顺序排列，第 i 个节点的输入是第 i+1 个节点。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanDescription {
    pub plan_node_descs: Vec<PlanNodeDescription>,
    #[serde(skip)]
    node_index_map: HashMap<i64, usize>,
}

impl PlanDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node_desc(&mut self, desc: PlanNodeDescription) -> usize {
        let index = self.plan_node_descs.len();
        self.node_index_map.insert(desc.id, index);
        self.plan_node_descs.push(desc);
        index
    }

    pub fn get_node_desc(&self, node_id: i64) -> Option<&PlanNodeDescription> {
        self.node_index_map
            .get(&node_id)
            .and_then(|&index| self.plan_node_descs.get(index))
    }

    /// 缩进文本，每层缩进两个空格
    pub fn to_text(&self) -> String {
        self.plan_node_descs
            .iter()
            .enumerate()
            .map(|(depth, desc)| format!("{}{}", "  ".repeat(depth), desc.to_line()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
