//! 两级路由表
//!
//! 每个交换机一张有序的前缀规则表和一张有序的后缀规则表。
//! 查找时先按顺序匹配前缀（第一条包含目的地址的规则生效），
//! 全部未命中才比较目的地址最后一个八位组与后缀规则。

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{NetError, Result};

/// 命中规则后的下一跳
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextHop {
    pub id: String,
    pub ip: Ipv4Addr,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixRule {
    pub network: Ipv4Net,
    pub next_hop: NextHop,
}

/// 只匹配目的地址最后一个八位组（主机号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuffixRule {
    pub host_suffix: u8,
    pub next_hop: NextHop,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutingTable {
    prefixes: BTreeMap<String, Vec<PrefixRule>>,
    suffixes: BTreeMap<String, Vec<SuffixRule>>,
    /// 地址 -> 节点名，用于逐跳追踪
    #[serde(skip)]
    addresses: BTreeMap<Ipv4Addr, String>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_prefix(&mut self, switch: &str, rule: PrefixRule) {
        self.prefixes.entry(switch.to_string()).or_default().push(rule);
    }

    pub fn push_suffix(&mut self, switch: &str, rule: SuffixRule) {
        self.suffixes.entry(switch.to_string()).or_default().push(rule);
    }

    pub(crate) fn set_addresses(&mut self, addresses: BTreeMap<Ipv4Addr, String>) {
        self.addresses = addresses;
    }

    pub fn prefix_rules(&self, switch: &str) -> &[PrefixRule] {
        self.prefixes.get(switch).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn suffix_rules(&self, switch: &str) -> &[SuffixRule] {
        self.suffixes.get(switch).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 表中出现过的交换机（有前缀或后缀规则）
    pub fn switches(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .prefixes
            .keys()
            .chain(self.suffixes.keys())
            .map(|s| s.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// 查找 `switch` 上去往 `destination` 的下一跳
    pub fn lookup(&self, switch: &str, destination: Ipv4Addr) -> Result<&NextHop> {
        if let Some(rule) = self
            .prefix_rules(switch)
            .iter()
            .find(|r| r.network.contains(&destination))
        {
            trace!(switch, %destination, network = %rule.network, "前缀规则命中");
            return Ok(&rule.next_hop);
        }

        let host = destination.octets()[3];
        if let Some(rule) = self.suffix_rules(switch).iter().find(|r| r.host_suffix == host) {
            trace!(switch, %destination, host, "后缀规则命中");
            return Ok(&rule.next_hop);
        }

        Err(NetError::NoRouteFound {
            switch: switch.to_string(),
            destination,
        })
    }

    /// 从 `start` 逐跳查表直到下一跳就是目的地址，返回经过的节点名（含两端）
    pub fn trace(&self, start: &str, destination: Ipv4Addr) -> Result<Vec<String>> {
        let mut hops = vec![start.to_string()];
        if self.addresses.get(&destination).is_some_and(|n| n == start) {
            return Ok(hops);
        }
        if !self.prefixes.contains_key(start) && !self.suffixes.contains_key(start) {
            return Err(NetError::UnknownNode(start.to_string()));
        }

        let max_hops = self.switches().len() + 1;
        let mut current = start.to_string();
        while hops.len() <= max_hops {
            let next = self.lookup(&current, destination)?;
            hops.push(next.id.clone());
            if next.ip == destination {
                debug!(start, %destination, hops = hops.len() - 1, "路由追踪完成");
                return Ok(hops);
            }
            current = next.id.clone();
        }

        Err(NetError::RoutingLoop {
            from: start.to_string(),
            destination,
        })
    }
}
