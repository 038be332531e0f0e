//! 计划构建错误定义

/// 计划节点构建错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}
