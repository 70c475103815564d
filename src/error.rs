//! 错误类型
//!
//! 拓扑构建、路径计算与路由查找共用的错误枚举。

use std::net::Ipv4Addr;

use thiserror::Error;

/// crate 内统一的 Result 别名
pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    /// 正则图参数非法（度数和为奇数，或度数不在 [0, n) 内）
    #[error("invalid graph parameters: {reason}")]
    InvalidGraphParameters { reason: String },

    /// Fat-tree 端口数非法（必须为偶数且在 [2, 254] 内）
    #[error("invalid fat-tree port count k={k}: must be even and in [2, 254]")]
    InvalidPortCount { k: usize },

    /// Jellyfish 中没有交换机还有空闲端口
    #[error("server {server} could not be attached: all {capacity} server ports are in use")]
    PortExhaustion { server: String, capacity: usize },

    /// 前缀与后缀规则均未命中
    #[error("no route found on switch {switch} for destination {destination}")]
    NoRouteFound {
        switch: String,
        destination: Ipv4Addr,
    },

    /// BFS 无法从 from 到达 to
    #[error("{to} is unreachable from {from}")]
    Unreachable { from: String, to: String },

    /// 正则图生成在给定尝试次数内未成功
    #[error("random regular graph generation gave up after {attempts} attempts")]
    GenerationFailed { attempts: usize },

    #[error("duplicate node name {0}")]
    DuplicateNode(String),

    #[error("self-loop on node {0}")]
    SelfLoop(String),

    #[error("unknown node {0}")]
    UnknownNode(String),

    #[error("link {from}<->{to} is not part of the topology")]
    UnknownLink { from: String, to: String },

    #[error("no node is assigned address {0}")]
    UnknownAddress(Ipv4Addr),

    /// 逐跳追踪超过交换机总数仍未到达目的地址
    #[error("routing loop starting at {from} towards {destination}")]
    RoutingLoop {
        from: String,
        destination: Ipv4Addr,
    },

    /// 并行计算中的工作线程失败
    #[error("path worker failed: {0}")]
    Worker(String),
}
