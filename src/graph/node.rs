//! 节点类型
//!
//! 定义拓扑节点及其层级类别。

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::id::{EdgeId, NodeId};

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Fat-tree 核心层交换机
    Core,
    /// Fat-tree 汇聚层交换机
    Aggregation,
    /// Fat-tree 接入层交换机
    Edge,
    /// 无层级的交换机（Jellyfish）
    Switch,
    Server,
}

impl NodeKind {
    pub fn is_switch(self) -> bool {
        !matches!(self, NodeKind::Server)
    }
}

/// 拓扑节点
///
/// `name` 是节点在拓扑内唯一的字符串标识；`edges` 只保存边的下标，
/// 边本身由所属的 [`Topology`](super::Topology) 持有。
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeKind,
    ip: Option<Ipv4Addr>,
    pub(super) edges: Vec<EdgeId>,
}

impl Node {
    pub(super) fn new(id: NodeId, name: String, kind: NodeKind, ip: Option<Ipv4Addr>) -> Self {
        Self {
            id,
            name,
            kind,
            ip,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn ip(&self) -> Option<Ipv4Addr> {
        self.ip
    }

    /// 当前挂在该节点上的边
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}
