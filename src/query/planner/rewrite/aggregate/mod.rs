//! 聚合优化规则

pub mod limit_agg_to_topn_agg;

pub use limit_agg_to_topn_agg::{
    ExtendTopNKeysByGroupKeysRule, LimitAggToTopNAggRule, LimitProjectAggToTopNAggRule,
};
