//! 并行 k 最短路径计算
//!
//! 把 (源, 目的) 对切成连续的块，每块交给 rayon 线程池中的一个任务；
//! 每个任务持有邻接表的独立深拷贝，通过 channel 把结果送回协调者后合并。
//! 没有取消或超时：某个 worker 卡住会让整个计算一直等待。

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use tracing::{debug, info, warn};

use super::ksp::k_shortest_paths;
use crate::error::{NetError, Result};
use crate::graph::{Adjacency, Path};

/// (源, 目的) -> 按跳数排序的路径列表
pub type PathSet = HashMap<(String, String), Vec<Path>>;

#[derive(Debug, Clone)]
pub struct ParallelPathComputer {
    pub k: usize,
    pub parallelism: usize,
}

impl ParallelPathComputer {
    pub fn new(k: usize, parallelism: usize) -> Self {
        Self { k, parallelism }
    }

    #[tracing::instrument(skip(self, adj, pairs), fields(k = self.k, parallelism = self.parallelism, pairs = pairs.len()))]
    pub fn compute_all(&self, adj: &Adjacency, pairs: &[(String, String)]) -> Result<PathSet> {
        if self.parallelism == 0 {
            warn!("parallelism 为 0，按 1 处理");
        }
        let chunks = chunk_pairs(pairs, self.parallelism);
        if chunks.is_empty() {
            return Ok(PathSet::new());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(chunks.len())
            .thread_name(|i| format!("ksp-worker-{i}"))
            .build()
            .map_err(|e| NetError::Worker(e.to_string()))?;
        debug!(workers = chunks.len(), "线程池已创建");

        let (tx, rx) = mpsc::channel::<(usize, Result<PathSet>)>();
        let k = self.k;
        pool.scope(|s| {
            for (worker, chunk) in chunks.into_iter().enumerate() {
                let tx = tx.clone();
                let mut adj = adj.clone();
                s.spawn(move |_| {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        compute_chunk(k, &mut adj, &chunk)
                    }))
                    .unwrap_or_else(|_| Err(NetError::Worker(format!("worker {worker} panicked"))));
                    // 接收端活到 scope 结束之后
                    let _ = tx.send((worker, result));
                });
            }
        });
        drop(tx);

        let mut all = PathSet::new();
        let mut first_err = None;
        for (worker, result) in rx {
            match result {
                Ok(part) => {
                    debug!(worker, size = part.len(), "worker 结果已合并");
                    all.extend(part);
                }
                Err(e) => {
                    warn!(worker, error = %e, "worker 失败");
                    first_err.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }

        info!(pairs = all.len(), "✅ k 最短路径计算完成");
        Ok(all)
    }
}

fn compute_chunk(k: usize, adj: &mut Adjacency, chunk: &[(String, String)]) -> Result<PathSet> {
    let mut out = PathSet::with_capacity(chunk.len());
    for (src, dst) in chunk {
        let paths = k_shortest_paths(k, adj, src, dst)?;
        out.insert((src.clone(), dst.clone()), paths);
    }
    Ok(out)
}

/// 切成 `min(parallelism, len)` 个连续块：前 `len % m` 块各多一个元素，
/// 因此块大小先是 `ceil(len / m)`，之后是 `floor(len / m)`
pub fn chunk_pairs(pairs: &[(String, String)], parallelism: usize) -> Vec<Vec<(String, String)>> {
    let m = parallelism.max(1).min(pairs.len());
    if m == 0 {
        return Vec::new();
    }
    let (base, extra) = (pairs.len() / m, pairs.len() % m);
    let mut chunks = Vec::with_capacity(m);
    let mut rest = pairs;
    for i in 0..m {
        let (head, tail) = rest.split_at(base + usize::from(i < extra));
        chunks.push(head.to_vec());
        rest = tail;
    }
    chunks
}
