//! 重写上下文定义
//!
//! 保存一次重写过程所需的会话变量，以及各规则的触发次数。

use std::collections::HashMap;

use crate::query::context::SessionVariables;

/// 重写上下文
#[derive(Debug, Default)]
pub struct RewriteContext {
    /// 会话变量，缺失时依赖会话开关的规则不会触发
    session: Option<SessionVariables>,
    /// 规则名称 -> 触发次数
    rule_firings: HashMap<&'static str, usize>,
}

impl RewriteContext {
    /// 创建不带会话的上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带会话变量的上下文
    pub fn with_session(session: SessionVariables) -> Self {
        Self {
            session: Some(session),
            rule_firings: HashMap::new(),
        }
    }

    pub fn session(&self) -> Option<&SessionVariables> {
        self.session.as_ref()
    }

    /// 记录一次规则触发
    pub fn record_firing(&mut self, rule_name: &'static str) {
        *self.rule_firings.entry(rule_name).or_insert(0) += 1;
    }

    /// 指定规则的触发次数
    pub fn firing_count(&self, rule_name: &str) -> usize {
        self.rule_firings.get(rule_name).copied().unwrap_or(0)
    }

    pub fn total_firings(&self) -> usize {
        self.rule_firings.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = RewriteContext::new();
        assert!(ctx.session().is_none());
        assert_eq!(ctx.total_firings(), 0);

        let ctx = RewriteContext::with_session(SessionVariables::default());
        assert!(ctx.session().is_some());
    }

    #[test]
    fn test_record_firing() {
        let mut ctx = RewriteContext::new();
        ctx.record_firing("A");
        ctx.record_firing("A");
        ctx.record_firing("B");

        assert_eq!(ctx.firing_count("A"), 2);
        assert_eq!(ctx.firing_count("B"), 1);
        assert_eq!(ctx.firing_count("C"), 0);
        assert_eq!(ctx.total_firings(), 3);
    }
}
