//! 重写结果定义
//!
//! 定义重写规则的返回结果类型。

use crate::query::planner::plan::PlanNodeEnum;
use crate::query::planner::planner::PlannerError;

/// 重写错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewriteError {
    #[error("无效的计划结构: {0}")]
    InvalidPlanStructure(String),

    #[error("计划构建失败: {0}")]
    Planner(#[from] PlannerError),
}

impl RewriteError {
    pub fn invalid_plan_structure(msg: impl Into<String>) -> Self {
        Self::InvalidPlanStructure(msg.into())
    }
}

/// 重写结果类型
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;

/// 转换结果
///
/// `erase_curr` 为 true 时用 `new_nodes[0]` 替换当前节点；
/// 为 false 且没有新节点时表示规则已触发但计划保持不变。
#[derive(Debug, Default, Clone)]
pub struct TransformResult {
    /// 是否删除当前节点
    pub erase_curr: bool,
    /// 新的计划节点列表
    pub new_nodes: Vec<PlanNodeEnum>,
}

impl TransformResult {
    /// 用新节点替换当前节点
    pub fn replace(node: PlanNodeEnum) -> Self {
        Self {
            erase_curr: true,
            new_nodes: vec![node],
        }
    }

    /// 规则已处理当前节点，但不做任何修改
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// 取出替换节点；未替换时返回 None
    pub fn into_replacement(self) -> Option<PlanNodeEnum> {
        if self.erase_curr {
            self.new_nodes.into_iter().next()
        } else {
            None
        }
    }
}
