//! Fat-tree 两级路由表构建
//!
//! 规则直接由地址公式推出，不做图遍历：
//! - 接入交换机：每台直连服务器一条 /32（优先级 1），外加一条 0.0.0.0/0 上行到同 pod 汇聚层；
//! - 汇聚交换机：pod 内每个子网一条 /24 下行（优先级 2），按主机号的后缀规则上行到核心层（优先级 1）；
//! - 核心交换机：每个 pod 一条 /16 下行（优先级 1）。

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use tracing::info;

use super::table::{NextHop, PrefixRule, RoutingTable, SuffixRule};
use crate::error::{NetError, Result};
use crate::topo::fat_tree::{FatTree, agg_address, core_address, edge_address};

const DOWN_PRIORITY: u8 = 2;
const DEFAULT_PRIORITY: u8 = 1;

impl RoutingTable {
    pub fn for_fat_tree(ft: &FatTree) -> Result<Self> {
        build_two_level_table(ft)
    }
}

#[tracing::instrument(skip(ft), fields(k = ft.k))]
pub fn build_two_level_table(ft: &FatTree) -> Result<RoutingTable> {
    let k = ft.k;
    let half = ft.half();
    let addresses: BTreeMap<Ipv4Addr, String> = ft
        .topology
        .nodes()
        .iter()
        .filter_map(|n| n.ip().map(|ip| (ip, n.name().to_string())))
        .collect();
    let hop = |ip: Ipv4Addr, priority: u8| -> Result<NextHop> {
        let id = addresses.get(&ip).ok_or(NetError::UnknownAddress(ip))?;
        Ok(NextHop {
            id: id.clone(),
            ip,
            priority,
        })
    };

    let mut table = RoutingTable::new();

    for pod in 0..k {
        for row in 0..half {
            let agg = ft.name(ft.agg(pod, row)).to_string();
            for subnet in 0..half {
                table.push_prefix(
                    &agg,
                    PrefixRule {
                        network: net([10, pod as u8, subnet as u8, 0], 24),
                        next_hop: hop(edge_address(k, pod * half + subnet), DOWN_PRIORITY)?,
                    },
                );
            }
            // 主机号 id 走第 row 行核心交换机中的第 ((id - 2 + row) mod half) 个
            for host_id in 2..half + 2 {
                let col = (host_id - 2 + row) % half;
                table.push_suffix(
                    &agg,
                    SuffixRule {
                        host_suffix: host_id as u8,
                        next_hop: hop(core_address(k, row * half + col), DEFAULT_PRIORITY)?,
                    },
                );
            }
        }
    }

    for row in 0..half {
        for col in 0..half {
            let core = ft.name(ft.core(row, col)).to_string();
            for pod in 0..k {
                table.push_prefix(
                    &core,
                    PrefixRule {
                        network: net([10, pod as u8, 0, 0], 16),
                        next_hop: hop(agg_address(k, pod * half + row), DEFAULT_PRIORITY)?,
                    },
                );
            }
        }
    }

    for pod in 0..k {
        for index in 0..half {
            let edge = ft.name(ft.edge(pod, index)).to_string();
            for host_id in 2..half + 2 {
                let server = Ipv4Addr::new(10, pod as u8, index as u8, host_id as u8);
                table.push_prefix(
                    &edge,
                    PrefixRule {
                        network: net(server.octets(), 32),
                        next_hop: hop(server, DEFAULT_PRIORITY)?,
                    },
                );
            }
            table.push_prefix(
                &edge,
                PrefixRule {
                    network: net([0, 0, 0, 0], 0),
                    next_hop: hop(agg_address(k, pod * half + index), DEFAULT_PRIORITY)?,
                },
            );
        }
    }

    info!(switches = table.switches().len(), "两级路由表构建完成");
    table.set_addresses(addresses);
    Ok(table)
}

fn net(octets: [u8; 4], prefix_len: u8) -> Ipv4Net {
    Ipv4Net::new_assert(Ipv4Addr::from(octets), prefix_len)
}
