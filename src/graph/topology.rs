//! 拓扑容器
//!
//! 持有一次构建产生的全部节点与边。节点集合只属于一个实例，
//! 多次构建之间不会共享。

use std::collections::HashMap;
use std::net::Ipv4Addr;

use tracing::trace;

use super::adjacency::Adjacency;
use super::edge::Edge;
use super::id::{EdgeId, NodeId};
use super::node::{Node, NodeKind};
use crate::error::{NetError, Result};

#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    /// 边 arena；`detach_edge` 之后对应位置为 None
    edges: Vec<Option<Edge>>,
    by_name: HashMap<String, NodeId>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加节点
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        ip: Option<Ipv4Addr>,
    ) -> Result<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(NetError::DuplicateNode(name));
        }
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node::new(id, name, kind, ip));
        Ok(id)
    }

    /// 连接两个节点：新边同时挂到两端的边列表上
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, bandwidth: f64) -> Result<EdgeId> {
        if a == b {
            return Err(NetError::SelfLoop(self.nodes[a.0].name().to_string()));
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge {
            left: a,
            right: b,
            bandwidth,
        }));
        self.nodes[a.0].edges.push(id);
        self.nodes[b.0].edges.push(id);
        trace!(
            left = self.nodes[a.0].name(),
            right = self.nodes[b.0].name(),
            bandwidth,
            "添加链路"
        );
        Ok(id)
    }

    /// 只从 `node` 一侧摘除边；另一端仍保留引用，需要调用方自行摘除。
    ///
    /// 返回该边此前是否挂在 `node` 上。
    pub fn remove_edge(&mut self, node: NodeId, edge: EdgeId) -> bool {
        let edges = &mut self.nodes[node.0].edges;
        match edges.iter().position(|e| *e == edge) {
            Some(pos) => {
                edges.remove(pos);
                true
            }
            None => false,
        }
    }

    /// 从两端摘除并删除边
    pub fn detach_edge(&mut self, edge: EdgeId) -> Option<Edge> {
        let removed = self.edges.get_mut(edge.0)?.take()?;
        self.remove_edge(removed.left, edge);
        self.remove_edge(removed.right, edge);
        Some(removed)
    }

    /// 扫描 `a` 的边列表，判断是否存在连接 `a`、`b` 的边
    pub fn is_neighbor(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a.0]
            .edges
            .iter()
            .filter_map(|e| self.edge(*e))
            .any(|edge| edge.connects(a, b))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).map(|id| &self.nodes[id.0])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(|e| e.as_ref())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// 尚未被删除的边
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId(i), e)))
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].edges.len()
    }

    /// `id` 的邻居，按边插入顺序
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .edges
            .iter()
            .filter_map(move |e| self.edge(*e).and_then(|edge| edge.other(id)))
    }

    /// 按名字索引的邻接表视图（节点顺序，再按边插入顺序）
    pub fn adjacency(&self) -> Adjacency {
        let mut adj = Adjacency::new();
        for node in &self.nodes {
            let neighbours = self
                .neighbors(node.id())
                .map(|n| self.nodes[n.0].name().to_string())
                .collect();
            adj.set_neighbors(node.name(), neighbours);
        }
        adj
    }
}
