//! k 条最短无环路径（Yen 算法）
//!
//! 以上一条已接受路径上的每个节点为 spur 点：临时删除会重复生成已接受路径的链路，
//! 以及 root 路径内部节点的全部链路，再从 spur 点做一次 BFS。
//! 候选路径放进按 `(跳数, 插入序号)` 排序的小顶堆，每轮弹出最短的一条。
//!
//! 删除链路会修改传入的邻接表（结束前恢复原状），因此接收 `&mut Adjacency`：
//! 并发调用方必须各自持有一份拷贝。

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use super::bfs::bfs_search;
use crate::error::{NetError, Result};
use crate::graph::{Adjacency, Path};

/// 计算 `start` 到 `end` 的至多 `k` 条无环路径，跳数非降序
///
/// 路径总数不足 `k` 时提前返回；`start == end` 时只有一条零跳路径；
/// 两点不连通时返回 `NetError::Unreachable`。
pub fn k_shortest_paths(k: usize, adj: &mut Adjacency, start: &str, end: &str) -> Result<Vec<Path>> {
    if k == 0 {
        return Ok(Vec::new());
    }
    if start == end {
        return Ok(vec![Path::new(vec![start.to_string()])]);
    }

    let first = bfs_search(adj, start, end).ok_or_else(|| NetError::Unreachable {
        from: start.to_string(),
        to: end.to_string(),
    })?;

    let mut accepted: Vec<Path> = vec![first];
    let mut seen: HashSet<Vec<String>> = HashSet::from([accepted[0].nodes().to_vec()]);
    let mut candidates: BinaryHeap<Reverse<(usize, u64, Vec<String>)>> = BinaryHeap::new();
    let mut next_seq = 0u64;

    for _ in 1..k {
        let previous = accepted[accepted.len() - 1].nodes().to_vec();

        for j in 0..previous.len() - 1 {
            let spur = previous[j].as_str();
            let root = &previous[..=j];
            let mut pruned = Pruned::default();

            for path in &accepted {
                let nodes = path.nodes();
                if nodes.len() > j + 1 && nodes[..=j] == *root {
                    let (u, v) = (&nodes[j], &nodes[j + 1]);
                    if adj.has_link(u, v) {
                        pruned.remove(adj, u, v);
                    }
                }
            }

            for node in &root[..j] {
                for neighbour in adj.neighbors(node).to_vec() {
                    pruned.remove(adj, node, &neighbour);
                }
            }

            if let Some(spur_path) = bfs_search(adj, spur, end) {
                let mut total: Vec<String> = root[..j].to_vec();
                total.extend(spur_path.into_vec());
                if seen.insert(total.clone()) {
                    trace!(spur, hops = total.len() - 1, "新候选路径");
                    candidates.push(Reverse((total.len() - 1, next_seq, total)));
                    next_seq += 1;
                }
            }

            pruned.restore(adj);
        }

        match candidates.pop() {
            Some(Reverse((_, _, nodes))) => accepted.push(Path::new(nodes)),
            None => break,
        }
    }

    Ok(accepted)
}

/// 记录被临时删除链路的节点原始邻居列表，恢复时原样放回
#[derive(Default)]
struct Pruned {
    saved: HashMap<String, Vec<String>>,
}

impl Pruned {
    fn remove(&mut self, adj: &mut Adjacency, u: &str, v: &str) {
        for node in [u, v] {
            if !self.saved.contains_key(node) {
                self.saved.insert(node.to_string(), adj.neighbors(node).to_vec());
            }
        }
        adj.remove_link(u, v);
    }

    fn restore(self, adj: &mut Adjacency) {
        for (node, neighbours) in self.saved {
            adj.set_neighbors(&node, neighbours);
        }
    }
}
