//! 随机置换流量
//!
//! 每台服务器恰好向另一台（不是自己）的服务器发送。

use rand::Rng;

use crate::error::{NetError, Result};

/// 均匀随机的错位排列：`perm[i] != i` 对所有 i 成立
pub fn random_derangement<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n < 2 {
        return Err(NetError::InvalidGraphParameters {
            reason: format!("a derangement needs at least 2 elements, got {n}"),
        });
    }

    'retry: loop {
        let mut perm: Vec<usize> = (0..n).collect();
        for j in (0..n).rev() {
            let p = rng.gen_range(0..=j);
            if perm[p] == j {
                continue 'retry;
            }
            perm.swap(j, p);
        }
        return Ok(perm);
    }
}

/// `(servers[i], servers[perm[i]])`
pub fn derangement_pairs(servers: &[String], perm: &[usize]) -> Vec<(String, String)> {
    perm.iter()
        .enumerate()
        .map(|(i, &j)| (servers[i].clone(), servers[j].clone()))
        .collect()
}
