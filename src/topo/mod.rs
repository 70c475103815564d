//! 拓扑构建
//!
//! Fat-tree、Jellyfish 以及 Jellyfish 依赖的随机正则图生成器。

pub mod fat_tree;
pub mod jellyfish;
pub mod regular;

pub use fat_tree::{FatTree, FatTreeOpts, build_fat_tree};
pub use jellyfish::{Jellyfish, JellyfishOpts, build_jellyfish};
pub use regular::{RegularEdges, RegularGraphGenerator};
