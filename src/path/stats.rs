//! 服务器间最短路径长度分布

use std::collections::BTreeMap;

use tracing::debug;

use super::bfs::bfs_hop_distances;
use crate::error::{NetError, Result};
use crate::graph::Adjacency;

/// 对每个无序服务器对统计 BFS 跳数：跳数 -> 服务器对数量
///
/// 任意一对不可达时返回 `NetError::Unreachable`，而不是把它算进某个长度。
pub fn path_length_distribution(adj: &Adjacency, servers: &[String]) -> Result<BTreeMap<usize, usize>> {
    let mut dist = BTreeMap::new();
    for (i, src) in servers.iter().enumerate() {
        let hops = bfs_hop_distances(adj, src);
        for dst in &servers[i + 1..] {
            let Some(&h) = hops.get(dst) else {
                return Err(NetError::Unreachable {
                    from: src.clone(),
                    to: dst.clone(),
                });
            };
            *dist.entry(h).or_insert(0) += 1;
        }
    }
    debug!(pairs = dist.values().sum::<usize>(), "路径长度分布统计完成");
    Ok(dist)
}

/// 把计数转换成占全部服务器对的比例
pub fn as_fractions(dist: &BTreeMap<usize, usize>) -> BTreeMap<usize, f64> {
    let total: usize = dist.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }
    dist.iter()
        .map(|(&len, &count)| (len, count as f64 / total as f64))
        .collect()
}
