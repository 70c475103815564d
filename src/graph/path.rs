//! 路径与链路键

use std::fmt;

use serde::{Deserialize, Serialize};

/// 无向链路的标识：两端节点名按字典序存放
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkKey {
    pub a: String,
    pub b: String,
}

impl LinkKey {
    pub fn new(x: &str, y: &str) -> Self {
        if x <= y {
            Self {
                a: x.to_string(),
                b: y.to_string(),
            }
        } else {
            Self {
                a: y.to_string(),
                b: x.to_string(),
            }
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.a, self.b)
    }
}

/// 从源到目的（含两端）的节点名序列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    pub fn new(nodes: Vec<String>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[String] {
        &self.0
    }

    /// 边数，即节点数减一
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|s| s.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(|s| s.as_str())
    }

    /// 依次经过的链路
    pub fn links(&self) -> impl Iterator<Item = LinkKey> + '_ {
        self.0.windows(2).map(|w| LinkKey::new(&w[0], &w[1]))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Path {
    fn from(nodes: Vec<String>) -> Self {
        Self(nodes)
    }
}
