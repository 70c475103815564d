//! 边类型
//!
//! 定义无向链路及其带宽权重。

use super::id::NodeId;

/// 无向链路
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub left: NodeId,
    pub right: NodeId,
    pub bandwidth: f64,
}

impl Edge {
    /// 判断该边是否恰好连接 `a` 与 `b`（不区分方向）
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }

    /// 给定一端，返回另一端；`node` 不是端点时返回 None
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.left == node {
            Some(self.right)
        } else if self.right == node {
            Some(self.left)
        } else {
            None
        }
    }
}
