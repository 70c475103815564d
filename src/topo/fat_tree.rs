//! Fat-tree 拓扑构建
//!
//! k 端口交换机搭成的三层 Clos：(k/2)² 个核心交换机，k 个 pod，
//! 每个 pod 内 k/2 个汇聚与 k/2 个接入交换机，每个接入交换机挂 k/2 台服务器。
//! 所有节点都分配 `10.x.y.z` 形式的地址，两级路由表直接依赖这些地址。

use std::net::Ipv4Addr;

use tracing::{debug, info};

use crate::error::{NetError, Result};
use crate::graph::{NodeId, NodeKind, Topology};

/// 受地址八位组限制的最大端口数
pub const MAX_PORTS: usize = 254;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
    pub core_agg_bandwidth: f64,
    pub agg_edge_bandwidth: f64,
    pub edge_server_bandwidth: f64,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self {
            k: 4,
            core_agg_bandwidth: 0.2,
            agg_edge_bandwidth: 0.1,
            edge_server_bandwidth: 0.05,
        }
    }
}

impl FatTreeOpts {
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct FatTree {
    pub k: usize,
    pub topology: Topology,
    pub core_switches: Vec<NodeId>,
    pub agg_switches: Vec<NodeId>,
    pub edge_switches: Vec<NodeId>,
    pub servers: Vec<NodeId>,
}

impl FatTree {
    pub fn half(&self) -> usize {
        self.k / 2
    }

    pub fn num_pods(&self) -> usize {
        self.k
    }

    /// 每个接入交换机挂载的服务器数
    pub fn density(&self) -> usize {
        self.half()
    }

    pub fn num_core(&self) -> usize {
        self.core_switches.len()
    }

    pub fn num_agg(&self) -> usize {
        self.agg_switches.len()
    }

    pub fn num_edge(&self) -> usize {
        self.edge_switches.len()
    }

    pub fn num_servers(&self) -> usize {
        self.servers.len()
    }

    /// 第 `row` 行第 `col` 个核心交换机；第 `row` 行连到每个 pod 的第 `row` 个汇聚交换机
    pub fn core(&self, row: usize, col: usize) -> NodeId {
        self.core_switches[row * self.half() + col]
    }

    pub fn agg(&self, pod: usize, index: usize) -> NodeId {
        self.agg_switches[pod * self.half() + index]
    }

    pub fn edge(&self, pod: usize, index: usize) -> NodeId {
        self.edge_switches[pod * self.half() + index]
    }

    pub fn server(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        self.servers[(pod * half + edge) * half + host]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.topology.node(id).name()
    }
}

/// 核心交换机地址：`10.k.j.i`，j 为行号、i 为列号（均从 1 开始）
pub fn core_address(k: usize, idx: usize) -> Ipv4Addr {
    let half = k / 2;
    addr(k, idx / half + 1, idx % half + 1)
}

/// 汇聚交换机地址：`10.pod.(k/2 + i).1`
pub fn agg_address(k: usize, idx: usize) -> Ipv4Addr {
    let half = k / 2;
    addr(idx / half, half + idx % half, 1)
}

/// 接入交换机地址：`10.pod.i.1`
pub fn edge_address(k: usize, idx: usize) -> Ipv4Addr {
    let half = k / 2;
    addr(idx / half, idx % half, 1)
}

/// 服务器地址：`10.pod.switch.(2 + i)`，pod 与 switch 取自所挂接入交换机
pub fn server_address(k: usize, idx: usize) -> Ipv4Addr {
    let half = k / 2;
    let edge = idx / half;
    addr(edge / half, edge % half, 2 + idx % half)
}

fn addr(b: usize, c: usize, d: usize) -> Ipv4Addr {
    Ipv4Addr::new(10, b as u8, c as u8, d as u8)
}

#[tracing::instrument(skip(opts), fields(k = opts.k))]
pub fn build_fat_tree(opts: &FatTreeOpts) -> Result<FatTree> {
    let k = opts.k;
    if k < 2 || k % 2 != 0 || k > MAX_PORTS {
        return Err(NetError::InvalidPortCount { k });
    }

    let half = k / 2;
    let num_core = half * half;
    let num_agg = k * k / 2;
    let num_edge = k * k / 2;
    let num_servers = k * k * k / 4;

    let mut topology = Topology::new();

    debug!(count = num_core, "创建核心层");
    let core_switches = (0..num_core)
        .map(|i| topology.add_node(format!("sw1{}", i + 1), NodeKind::Core, Some(core_address(k, i))))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = num_agg, "创建汇聚层");
    let agg_switches = (0..num_agg)
        .map(|i| {
            topology.add_node(format!("sw2{}", i + 1), NodeKind::Aggregation, Some(agg_address(k, i)))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = num_edge, "创建接入层");
    let edge_switches = (0..num_edge)
        .map(|i| topology.add_node(format!("sw3{}", i + 1), NodeKind::Edge, Some(edge_address(k, i))))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = num_servers, "创建服务器");
    let servers = (0..num_servers)
        .map(|i| topology.add_node(format!("sv{}", i + 1), NodeKind::Server, Some(server_address(k, i))))
        .collect::<Result<Vec<_>>>()?;

    // 核心第 row 行的 half 个交换机都连到每个 pod 的第 row 个汇聚交换机
    for pod in 0..k {
        for row in 0..half {
            let agg = agg_switches[pod * half + row];
            for col in 0..half {
                topology.add_edge(core_switches[row * half + col], agg, opts.core_agg_bandwidth)?;
            }
        }
    }

    // pod 内汇聚层与接入层全连接
    for pod in 0..k {
        for row in 0..half {
            let agg = agg_switches[pod * half + row];
            for col in 0..half {
                topology.add_edge(agg, edge_switches[pod * half + col], opts.agg_edge_bandwidth)?;
            }
        }
    }

    for (x, &edge) in edge_switches.iter().enumerate() {
        for host in 0..half {
            topology.add_edge(edge, servers[half * x + host], opts.edge_server_bandwidth)?;
        }
    }

    info!(
        core = core_switches.len(),
        agg = agg_switches.len(),
        edge = edge_switches.len(),
        servers = servers.len(),
        "🌲 Fat-tree 构建完成"
    );

    Ok(FatTree {
        k,
        topology,
        core_switches,
        agg_switches,
        edge_switches,
        servers,
    })
}
