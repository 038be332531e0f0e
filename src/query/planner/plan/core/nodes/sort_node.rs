//! 排序相关节点实现
//!
//! - `OrderKey`：排序键（表达式、方向、空值位置）
//! - `LimitNode`：限制返回行数
//! - `TopNNode`：按排序键取前 N 行

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Expression;
use crate::define_plan_node_with_deps;
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id_generator::next_node_id;
use crate::query::planner::planner::PlannerError;
use super::plan_node_enum::PlanNodeEnum;

/// 排序键
///
/// 三个字段全部相等时两个排序键才相等。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderKey {
    expr: Expression,
    ascending: bool,
    nulls_first: bool,
}

impl OrderKey {
    /// 创建新的排序键
    pub fn new(expr: Expression, ascending: bool, nulls_first: bool) -> Self {
        Self {
            expr,
            ascending,
            nulls_first,
        }
    }

    /// 创建升序、空值排最后的排序键
    pub fn asc(expr: Expression) -> Self {
        Self::new(expr, true, false)
    }

    /// 创建降序排序键
    pub fn desc(expr: Expression, nulls_first: bool) -> Self {
        Self::new(expr, false, nulls_first)
    }

    /// 获取排序表达式
    pub fn expr(&self) -> &Expression {
        &self.expr
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn is_nulls_first(&self) -> bool {
        self.nulls_first
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.expr,
            if self.ascending { "ASC" } else { "DESC" },
            if self.nulls_first { "NULLS FIRST" } else { "NULLS LAST" }
        )
    }
}

fn format_order_keys(keys: &[OrderKey]) -> String {
    let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    format!("[{}]", keys.join(", "))
}

define_plan_node_with_deps! {
    pub struct LimitNode {
        limit: u64,
        offset: u64,
    }
    enum: Limit
    input: SingleInputNode
}

impl LimitNode {
    /// 创建新的限制节点
    pub fn new(input: PlanNodeEnum, limit: u64, offset: u64) -> Self {
        Self {
            id: next_node_id(),
            input: Box::new(input),
            limit,
            offset,
        }
    }

    /// 获取返回行数上限
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 获取偏移量
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn col_names(&self) -> &[String] {
        self.input.col_names()
    }

    pub fn describe(&self) -> PlanNodeDescription {
        PlanNodeDescription::new("Limit", self.id)
            .with_description("limit", self.limit.to_string())
            .with_description("offset", self.offset.to_string())
    }
}

define_plan_node_with_deps! {
    pub struct TopNNode {
        order_keys: Vec<OrderKey>,
        limit: u64,
        offset: u64,
    }
    enum: TopN
    input: SingleInputNode
}

impl TopNNode {
    /// 创建新的TopN节点
    ///
    /// 排序键不能为空。
    pub fn new(
        input: PlanNodeEnum,
        order_keys: Vec<OrderKey>,
        limit: u64,
        offset: u64,
    ) -> Result<Self, PlannerError> {
        if order_keys.is_empty() {
            return Err(PlannerError::InvalidOperation(
                "TopN requires at least one order key".to_string(),
            ));
        }

        Ok(Self {
            id: next_node_id(),
            input: Box::new(input),
            order_keys,
            limit,
            offset,
        })
    }

    /// 获取排序键
    pub fn order_keys(&self) -> &[OrderKey] {
        &self.order_keys
    }

    /// 获取返回行数上限
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 获取偏移量
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// 以新的排序键构造副本，limit/offset/输入不变
    pub fn with_order_keys(&self, order_keys: Vec<OrderKey>) -> Result<Self, PlannerError> {
        Self::new((*self.input).clone(), order_keys, self.limit, self.offset)
    }

    pub fn col_names(&self) -> &[String] {
        self.input.col_names()
    }

    pub fn describe(&self) -> PlanNodeDescription {
        PlanNodeDescription::new("TopN", self.id)
            .with_description("order_keys", format_order_keys(&self.order_keys))
            .with_description("limit", self.limit.to_string())
            .with_description("offset", self.offset.to_string())
    }
}
