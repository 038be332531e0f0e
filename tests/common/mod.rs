//! 集成测试共享工具模块
//!
//! 提供计划构造夹具和断言辅助函数，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;
pub mod plan_fixtures;

use topn_agg::config::OptimizerConfig;
use topn_agg::query::context::SessionVariables;
use topn_agg::query::planner::rewrite::RewriteContext;

/// 默认会话（开关开启，阈值 1024）下的重写上下文
pub fn default_context() -> RewriteContext {
    RewriteContext::with_session(SessionVariables::default())
}

/// 指定阈值的优化器配置
pub fn optimizer_with_threshold(threshold: u64) -> OptimizerConfig {
    OptimizerConfig {
        topn_opt_limit_threshold: threshold,
        ..OptimizerConfig::default()
    }
}
