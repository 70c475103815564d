//! Jellyfish 拓扑构建
//!
//! 交换机之间按随机正则图互连，剩余端口挂服务器。

use tracing::{debug, info};

use super::regular::RegularGraphGenerator;
use crate::error::{NetError, Result};
use crate::graph::{NodeId, NodeKind, Topology};

#[derive(Debug, Clone)]
pub struct JellyfishOpts {
    pub num_servers: usize,
    pub num_switches: usize,
    pub num_ports: usize,
    pub seed: u64,
    /// 正则图生成的尝试上限，None 表示不设上限
    pub max_attempts: Option<usize>,
}

impl Default for JellyfishOpts {
    fn default() -> Self {
        Self {
            num_servers: 80,
            num_switches: 21,
            num_ports: 8,
            seed: 0,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Jellyfish {
    pub num_ports: usize,
    pub topology: Topology,
    pub switches: Vec<NodeId>,
    pub servers: Vec<NodeId>,
}

impl Jellyfish {
    /// 每个交换机用于交换机互连的端口数
    pub fn switch_link_budget(&self) -> usize {
        switch_link_budget(self.num_ports)
    }

    /// 整个拓扑最多能挂载的服务器数
    pub fn server_capacity(&self) -> usize {
        server_capacity(self.switches.len(), self.num_ports)
    }
}

/// `num_ports / 2`，为奇数时加一以保证互连端点总数为偶数
pub fn switch_link_budget(num_ports: usize) -> usize {
    let ports = num_ports / 2;
    if ports % 2 != 0 { ports + 1 } else { ports }
}

pub fn server_capacity(num_switches: usize, num_ports: usize) -> usize {
    num_switches * num_ports.saturating_sub(switch_link_budget(num_ports))
}

#[tracing::instrument(skip(opts), fields(servers = opts.num_servers, switches = opts.num_switches, ports = opts.num_ports, seed = opts.seed))]
pub fn build_jellyfish(opts: &JellyfishOpts) -> Result<Jellyfish> {
    let budget = switch_link_budget(opts.num_ports);
    let generator = RegularGraphGenerator {
        max_attempts: opts.max_attempts,
    };
    let switch_edges = generator.generate_seeded(budget, opts.num_switches, opts.seed)?;
    debug!(budget, links = switch_edges.len(), "交换机互连生成完成");

    let mut topology = Topology::new();
    let switches = (0..opts.num_switches)
        .map(|i| topology.add_node(format!("sw{i}"), NodeKind::Switch, None))
        .collect::<Result<Vec<_>>>()?;
    for &(a, b) in &switch_edges {
        topology.add_edge(switches[a], switches[b], 1.0)?;
    }

    let servers = (0..opts.num_servers)
        .map(|i| topology.add_node(format!("sv{i}"), NodeKind::Server, None))
        .collect::<Result<Vec<_>>>()?;

    let mut attached = vec![0usize; switches.len()];
    for &server in &servers {
        let slot = pick_switch(&topology, &switches, &attached, opts.num_ports).ok_or_else(|| {
            NetError::PortExhaustion {
                server: topology.node(server).name().to_string(),
                capacity: server_capacity(opts.num_switches, opts.num_ports),
            }
        })?;
        topology.add_edge(switches[slot], server, 1.0)?;
        attached[slot] += 1;
    }

    info!(
        switches = switches.len(),
        servers = servers.len(),
        switch_links = switch_edges.len(),
        "🪼 Jellyfish 构建完成"
    );

    Ok(Jellyfish {
        num_ports: opts.num_ports,
        topology,
        switches,
        servers,
    })
}

/// 优先选第一个尚未挂服务器的交换机，否则选第一个还有空闲端口的交换机
fn pick_switch(
    topology: &Topology,
    switches: &[NodeId],
    attached: &[usize],
    num_ports: usize,
) -> Option<usize> {
    let has_free_port = |i: usize| topology.degree(switches[i]) < num_ports;
    (0..switches.len())
        .find(|&i| attached[i] == 0 && has_free_port(i))
        .or_else(|| (0..switches.len()).find(|&i| has_free_port(i)))
}
