//! 节点ID生成器
//!
//! 计划节点ID在进程内全局唯一，规则生成的新节点同样从这里取ID。

use std::sync::atomic::{AtomicI64, Ordering};

/// 节点ID生成器
pub struct NodeIdGenerator {
    counter: AtomicI64,
}

impl NodeIdGenerator {
    /// 获取全局单例实例
    pub fn instance() -> &'static Self {
        static INSTANCE: NodeIdGenerator = NodeIdGenerator {
            counter: AtomicI64::new(1), // 0 保留为无效ID
        };
        &INSTANCE
    }

    /// 获取下一个唯一ID
    pub fn next_id(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

/// 为节点分配新ID
pub fn next_node_id() -> i64 {
    NodeIdGenerator::instance().next_id()
}
