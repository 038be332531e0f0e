//! 重写规则枚举 - 静态分发实现
//!
//! 所有规则都作为枚举变体，通过 match 进行分发，避免虚函数表查找。

use crate::query::planner::plan::PlanNodeEnum;
use crate::query::planner::rewrite::aggregate;
use crate::query::planner::rewrite::context::RewriteContext;
use crate::query::planner::rewrite::pattern::Pattern;
use crate::query::planner::rewrite::result::{RewriteResult, TransformResult};
use crate::query::planner::rewrite::rule::{RewriteRule as RewriteRuleTrait, RuleFamily};
use crate::query::planner::rewrite::rule_config::RuleConfig;

macro_rules! define_rewrite_rules {
    (
        $(#[$enum_meta:meta])*
        pub enum $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant_name:ident($rule_type:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant_name($rule_type),
            )+
        }

        impl RewriteRuleTrait for $enum_name {
            fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$variant_name(rule) => rule.name(),)+
                }
            }

            fn family(&self) -> RuleFamily {
                match self {
                    $($enum_name::$variant_name(rule) => rule.family(),)+
                }
            }

            fn pattern(&self) -> Pattern {
                match self {
                    $($enum_name::$variant_name(rule) => rule.pattern(),)+
                }
            }

            fn guard(&self, ctx: &RewriteContext, node: &PlanNodeEnum) -> bool {
                match self {
                    $($enum_name::$variant_name(rule) => rule.guard(ctx, node),)+
                }
            }

            fn apply(
                &self,
                ctx: &mut RewriteContext,
                node: &PlanNodeEnum,
            ) -> RewriteResult<Option<TransformResult>> {
                match self {
                    $($enum_name::$variant_name(rule) => rule.apply(ctx, node),)+
                }
            }
        }
    };
}

define_rewrite_rules! {
    pub enum RewriteRule {
        // ==================== 聚合优化规则 ====================
        LimitAggToTopNAgg(aggregate::LimitAggToTopNAggRule),
        LimitProjectAggToTopNAgg(aggregate::LimitProjectAggToTopNAggRule),
        ExtendTopNKeysByGroupKeys(aggregate::ExtendTopNKeysByGroupKeysRule),
    }
}

/// 规则注册表，按注册顺序尝试规则
#[derive(Debug)]
pub struct RuleRegistry {
    rules: Vec<RewriteRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    /// 只保留配置中启用的规则
    pub fn retain_enabled(&mut self, config: &RuleConfig) {
        self.rules.retain(|rule| config.is_enabled(rule));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        // Limit -> Project -> Aggregate 先于 Limit -> Aggregate，两者模式互斥，顺序只影响日志
        registry.add(RewriteRule::LimitProjectAggToTopNAgg(
            aggregate::LimitProjectAggToTopNAggRule::new(),
        ));
        registry.add(RewriteRule::LimitAggToTopNAgg(aggregate::LimitAggToTopNAggRule::new()));
        registry.add(RewriteRule::ExtendTopNKeysByGroupKeys(
            aggregate::ExtendTopNKeysByGroupKeysRule::new(),
        ));
        registry
    }
}
