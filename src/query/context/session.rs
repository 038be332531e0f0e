//! 会话变量
//!
//! 重写规则在执行期间读取的会话级开关。会话变量只读，
//! 由配置或调用方在每次请求时构造。

use serde::{Deserialize, Serialize};

/// 默认的 TopN 下推阈值（limit + offset 的上限）
pub const DEFAULT_TOPN_OPT_LIMIT_THRESHOLD: u64 = 1024;

/// 会话变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionVariables {
    /// 是否允许将 LIMIT 转换为聚合之上的 TopN
    pub push_topn_to_agg: bool,
    /// limit + offset 超过该值时不做转换
    pub topn_opt_limit_threshold: u64,
}

impl SessionVariables {
    pub fn new(push_topn_to_agg: bool, topn_opt_limit_threshold: u64) -> Self {
        Self {
            push_topn_to_agg,
            topn_opt_limit_threshold,
        }
    }
}

impl Default for SessionVariables {
    fn default() -> Self {
        Self::new(true, DEFAULT_TOPN_OPT_LIMIT_THRESHOLD)
    }
}
