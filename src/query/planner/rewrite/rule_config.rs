//! 规则配置和启用控制
//!
//! 支持按规则名或规则族名禁用重写规则，默认全部启用。

use std::collections::HashSet;

use crate::query::planner::rewrite::rule::{RewriteRule, RuleFamily};

#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    /// 被禁用的规则名或规则族名
    disabled: HashSet<String>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由禁用列表构造，列表项可以是规则名或规则族名
    pub fn from_disabled<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            disabled: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn disable_by_name(&mut self, name: impl Into<String>) {
        self.disabled.insert(name.into());
    }

    pub fn enable_by_name(&mut self, name: &str) {
        self.disabled.remove(name);
    }

    pub fn disable_family(&mut self, family: RuleFamily) {
        self.disabled.insert(family.name().to_string());
    }

    pub fn enable_family(&mut self, family: RuleFamily) {
        self.disabled.remove(family.name());
    }

    pub fn is_enabled_by_name(&self, rule_name: &str, family: RuleFamily) -> bool {
        !self.disabled.contains(rule_name) && !self.disabled.contains(family.name())
    }

    pub fn is_enabled<R: RewriteRule + ?Sized>(&self, rule: &R) -> bool {
        self.is_enabled_by_name(rule.name(), rule.family())
    }
}
