//! 可序列化的导出结构
//!
//! 拓扑导出给仿真器接线使用；直方图导出给画图使用。

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::graph::{NodeKind, Topology};
use crate::path::LinkUsage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExport {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub ip: Option<Ipv4Addr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub left: String,
    pub right: String,
    pub bandwidth: f64,
}

/// 节点表 + 边表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
}

impl From<&Topology> for TopologyExport {
    fn from(topo: &Topology) -> Self {
        let nodes = topo
            .nodes()
            .iter()
            .map(|n| NodeExport {
                name: n.name().to_string(),
                kind: n.kind(),
                ip: n.ip(),
            })
            .collect();
        let edges = topo
            .edges()
            .map(|(_, e)| EdgeExport {
                left: topo.node(e.left).name().to_string(),
                right: topo.node(e.right).name().to_string(),
                bandwidth: e.bandwidth,
            })
            .collect();
        Self { nodes, edges }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramReport {
    pub k_paths: usize,
    pub pairs: usize,
    /// 按 (count, link) 升序
    pub links: Vec<LinkUsage>,
}
