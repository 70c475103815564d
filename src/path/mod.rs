//! 路径计算
//!
//! BFS 最短路径、Yen k 最短无环路径、并行批量计算以及基于路径结果的统计。

mod bfs;
mod ksp;
mod parallel;
mod stats;
mod traffic;
mod usage;

pub use bfs::{bfs_hop_distances, bfs_shortest_path};
pub use ksp::k_shortest_paths;
pub use parallel::{ParallelPathComputer, PathSet, chunk_pairs};
pub use stats::{as_fractions, path_length_distribution};
pub use traffic::{derangement_pairs, random_derangement};
pub use usage::{LinkUsage, link_usage_histogram};
