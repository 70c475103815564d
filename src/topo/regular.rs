//! 随机正则图生成（configuration model）
//!
//! 每个节点复制 `d` 个 stub，打乱后两两配对。自环或重复边的 stub
//! 留到下一轮只在它们之间重新配对；若剩余 stub 已不可能再组成合法边，
//! 整次尝试作废并从空图重新开始。
//!
//! 重启次数默认不设上限：对常见的 (d, n) 组合通常很快成功，但理论上
//! 可能一直失败。需要上界时设置 `max_attempts`。

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{NetError, Result};

/// 正则图的边集合，端点按 `(小, 大)` 存放
pub type RegularEdges = BTreeSet<(usize, usize)>;

#[derive(Debug, Clone, Default)]
pub struct RegularGraphGenerator {
    /// 最多尝试次数；None 表示一直重试直到成功
    pub max_attempts: Option<usize>,
}

impl RegularGraphGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// 使用 `StdRng::seed_from_u64(seed)` 生成；相同 seed 得到相同边集
    pub fn generate_seeded(&self, degree: usize, node_count: usize, seed: u64) -> Result<RegularEdges> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(degree, node_count, &mut rng)
    }

    /// 在 `0..node_count` 上生成 `degree`-正则简单图
    #[tracing::instrument(skip(self, rng))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        degree: usize,
        node_count: usize,
        rng: &mut R,
    ) -> Result<RegularEdges> {
        if (node_count * degree) % 2 != 0 {
            return Err(NetError::InvalidGraphParameters {
                reason: format!("n * d must be even (n={node_count}, d={degree})"),
            });
        }
        if degree >= node_count {
            return Err(NetError::InvalidGraphParameters {
                reason: format!("degree must satisfy 0 <= d < n (n={node_count}, d={degree})"),
            });
        }
        if degree == 0 {
            return Ok(RegularEdges::new());
        }

        let mut attempts = 0usize;
        loop {
            attempts += 1;
            if let Some(edges) = try_pairing(degree, node_count, rng) {
                debug!(attempts, edges = edges.len(), "正则图生成成功");
                return Ok(edges);
            }
            debug!(attempts, "剩余 stub 无法配对，重新开始");
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(NetError::GenerationFailed { attempts });
            }
        }
    }
}

/// 一次完整的配对尝试；剩余 stub 无法再组成新边时返回 None
fn try_pairing<R: Rng + ?Sized>(degree: usize, node_count: usize, rng: &mut R) -> Option<RegularEdges> {
    let mut edges = RegularEdges::new();
    let mut stubs: Vec<usize> = (0..node_count)
        .flat_map(|node| std::iter::repeat_n(node, degree))
        .collect();

    loop {
        stubs.shuffle(rng);

        let mut unresolved = Vec::new();
        for pair in stubs.chunks_exact(2) {
            let (u, v) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            if u != v && edges.insert((u, v)) {
                continue;
            }
            unresolved.push(u);
            unresolved.push(v);
        }

        if unresolved.is_empty() {
            return Some(edges);
        }
        trace!(unresolved = unresolved.len(), "重新配对剩余 stub");
        if !can_still_pair(&edges, &unresolved) {
            return None;
        }
        stubs = unresolved;
    }
}

/// 剩余 stub 对应的不同节点之间是否还存在一条尚未使用的边
fn can_still_pair(edges: &RegularEdges, unresolved: &[usize]) -> bool {
    let nodes: Vec<usize> = unresolved.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    nodes.iter().enumerate().any(|(i, &u)| {
        nodes[i + 1..]
            .iter()
            .any(|&v| !edges.contains(&(u, v)))
    })
}
