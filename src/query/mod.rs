//! 查询模块
//!
//! - `context`: 会话级变量
//! - `planner`: 计划节点与计划重写

pub mod context;
pub mod planner;
