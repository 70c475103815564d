//! 图模型
//!
//! 此模块包含节点、边、拓扑容器以及路径搜索使用的邻接表视图。

// 子模块声明
mod adjacency;
mod edge;
mod id;
mod node;
mod path;
mod topology;

// 重新导出公共接口
pub use adjacency::Adjacency;
pub use edge::Edge;
pub use id::{EdgeId, NodeId};
pub use node::{Node, NodeKind};
pub use path::{LinkKey, Path};
pub use topology::Topology;
