use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{NodeId, Topology};
use crate::topo::{FatTree, FatTreeOpts, Jellyfish, JellyfishOpts, build_fat_tree, build_jellyfish};

fn default_k_paths() -> usize {
    8
}

fn default_parallelism() -> usize {
    4
}

/// 一次 k 最短路径实验的描述（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSpec {
    pub topology: TopologySpec,
    #[serde(default = "default_k_paths")]
    pub k_paths: usize,
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// 随机置换流量使用的种子
    #[serde(default)]
    pub traffic_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySpec {
    FatTree {
        k: usize,
    },
    Jellyfish {
        num_servers: usize,
        num_switches: usize,
        num_ports: usize,
        #[serde(default)]
        seed: u64,
        #[serde(default)]
        max_attempts: Option<usize>,
    },
}

impl TopologySpec {
    pub fn build(&self) -> Result<BuiltTopology> {
        match *self {
            TopologySpec::FatTree { k } => Ok(BuiltTopology::FatTree(build_fat_tree(
                &FatTreeOpts::with_k(k),
            )?)),
            TopologySpec::Jellyfish {
                num_servers,
                num_switches,
                num_ports,
                seed,
                max_attempts,
            } => Ok(BuiltTopology::Jellyfish(build_jellyfish(&JellyfishOpts {
                num_servers,
                num_switches,
                num_ports,
                seed,
                max_attempts,
            })?)),
        }
    }
}

/// 按 `TopologySpec` 构建出的拓扑
#[derive(Debug, Clone)]
pub enum BuiltTopology {
    FatTree(FatTree),
    Jellyfish(Jellyfish),
}

impl BuiltTopology {
    pub fn topology(&self) -> &Topology {
        match self {
            BuiltTopology::FatTree(ft) => &ft.topology,
            BuiltTopology::Jellyfish(jf) => &jf.topology,
        }
    }

    pub fn server_ids(&self) -> &[NodeId] {
        match self {
            BuiltTopology::FatTree(ft) => &ft.servers,
            BuiltTopology::Jellyfish(jf) => &jf.servers,
        }
    }

    /// 服务器名，按构建顺序
    pub fn servers(&self) -> Vec<String> {
        let topo = self.topology();
        self.server_ids()
            .iter()
            .map(|id| topo.node(*id).name().to_string())
            .collect()
    }
}
