//! 邻接表视图
//!
//! 以节点名为键的邻居列表，路径搜索只在这个结构上进行。
//! `Clone` 即深拷贝，并行计算时每个 worker 各持一份。

use std::collections::{BTreeMap, BTreeSet};

use super::path::LinkKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    map: BTreeMap<String, Vec<String>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由无向链路列表构造
    pub fn from_links<'a, I>(links: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut adj = Self::new();
        for (a, b) in links {
            adj.insert_link(a, b);
        }
        adj
    }

    /// 覆盖 `name` 的邻居列表
    pub fn set_neighbors(&mut self, name: &str, neighbours: Vec<String>) {
        self.map.insert(name.to_string(), neighbours);
    }

    /// 添加一条无向链路（两端各追加一次）
    pub fn insert_link(&mut self, a: &str, b: &str) {
        self.map.entry(a.to_string()).or_default().push(b.to_string());
        self.map.entry(b.to_string()).or_default().push(a.to_string());
    }

    pub fn has_link(&self, a: &str, b: &str) -> bool {
        self.neighbors(a).iter().any(|n| n == b) || self.neighbors(b).iter().any(|n| n == a)
    }

    /// 删除一条无向链路（两端各删一次），返回是否删除了任何一端
    pub fn remove_link(&mut self, a: &str, b: &str) -> bool {
        let left = Self::remove_one(self.map.get_mut(a), b);
        let right = Self::remove_one(self.map.get_mut(b), a);
        left || right
    }

    fn remove_one(list: Option<&mut Vec<String>>, target: &str) -> bool {
        let Some(list) = list else {
            return false;
        };
        match list.iter().position(|n| n == target) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// 邻居列表；未知节点返回空切片
    pub fn neighbors(&self, name: &str) -> &[String] {
        self.map.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(|k| k.as_str())
    }

    /// 所有无向链路，每条只出现一次，按 `LinkKey` 排序
    pub fn links(&self) -> Vec<LinkKey> {
        let mut set = BTreeSet::new();
        for (node, neighbours) in &self.map {
            for n in neighbours {
                set.insert(LinkKey::new(node, n));
            }
        }
        set.into_iter().collect()
    }
}
