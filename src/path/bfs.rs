//! 广度优先最短路径
//!
//! 所有链路视为权重 1；按 FIFO 顺序扩展，第一次发现终点时立即返回，
//! 等长路径之间由邻居插入顺序决定。

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{NetError, Result};
use crate::graph::{Adjacency, Path};

/// `start` 到 `end` 的一条最短路径；不可达时返回 `NetError::Unreachable`
pub fn bfs_shortest_path(adj: &Adjacency, start: &str, end: &str) -> Result<Path> {
    bfs_search(adj, start, end).ok_or_else(|| NetError::Unreachable {
        from: start.to_string(),
        to: end.to_string(),
    })
}

pub(crate) fn bfs_search(adj: &Adjacency, start: &str, end: &str) -> Option<Path> {
    if start == end {
        return adj.contains(start).then(|| Path::new(vec![start.to_string()]));
    }

    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::from([start]);
    let mut queue: VecDeque<&str> = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in adj.neighbors(node) {
            let next = next.as_str();
            if next == end {
                parent.insert(next, node);
                return Some(rebuild(&parent, start, end));
            }
            if visited.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    None
}

fn rebuild(parent: &HashMap<&str, &str>, start: &str, end: &str) -> Path {
    let mut nodes = vec![end.to_string()];
    let mut cur = end;
    while cur != start {
        cur = parent[cur];
        nodes.push(cur.to_string());
    }
    nodes.reverse();
    Path::new(nodes)
}

/// 从 `start` 出发到每个可达节点的跳数
pub fn bfs_hop_distances(adj: &Adjacency, start: &str) -> HashMap<String, usize> {
    let mut dist: HashMap<String, usize> = HashMap::new();
    if !adj.contains(start) {
        return dist;
    }
    dist.insert(start.to_string(), 0);
    let mut queue: VecDeque<&str> = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let d = dist[node];
        for next in adj.neighbors(node) {
            if !dist.contains_key(next.as_str()) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next.as_str());
            }
        }
    }
    dist
}
