//! PlanNode 统一特征定义
//!
//! 定义所有计划节点需要实现的基础特征

use crate::core::Expression;
use super::plan_node_enum::PlanNodeEnum;

/// PlanNode 基础特征
pub trait PlanNode {
    /// 获取节点的唯一ID
    fn id(&self) -> i64;

    /// 获取节点类型的名称
    fn name(&self) -> &'static str;

    /// 获取输出列名列表
    fn col_names(&self) -> &[String];

    /// 输出列集合（以列引用表示）
    fn output(&self) -> Vec<Expression> {
        self.col_names()
            .iter()
            .map(|name| Expression::Column(name.clone()))
            .collect()
    }
}

/// 单输入节点特征
///
/// 适用于只有一个输入的节点
pub trait SingleInputNode: PlanNode {
    /// 获取输入节点
    fn input(&self) -> &PlanNodeEnum;

    /// 设置输入节点
    fn set_input(&mut self, input: PlanNodeEnum);

    /// 以新的输入构造节点副本，原节点保持不变
    fn with_input(&self, input: PlanNodeEnum) -> Self
    where
        Self: Clone + Sized,
    {
        let mut node = self.clone();
        node.set_input(input);
        node
    }
}
