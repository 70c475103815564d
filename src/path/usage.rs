//! 链路使用直方图

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::parallel::PathSet;
use crate::error::{NetError, Result};
use crate::graph::LinkKey;

/// 一条链路被多少条已接受路径经过
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkUsage {
    pub link: LinkKey,
    pub count: u64,
}

/// 统计每条链路出现在多少条路径上，按 `(count, link)` 升序返回
///
/// `links` 中的每条链路都有一项，哪怕计数为 0。
pub fn link_usage_histogram(paths: &PathSet, links: &[LinkKey]) -> Result<Vec<LinkUsage>> {
    let mut counts: HashMap<&LinkKey, u64> = links.iter().map(|l| (l, 0)).collect();

    for path in paths.values().flatten() {
        for link in path.links() {
            match counts.get_mut(&link) {
                Some(c) => *c += 1,
                None => {
                    return Err(NetError::UnknownLink {
                        from: link.a,
                        to: link.b,
                    });
                }
            }
        }
    }

    let mut usage: Vec<LinkUsage> = counts
        .into_iter()
        .map(|(link, count)| LinkUsage {
            link: link.clone(),
            count,
        })
        .collect();
    usage.sort_by(|x, y| (x.count, &x.link).cmp(&(y.count, &y.link)));
    Ok(usage)
}
