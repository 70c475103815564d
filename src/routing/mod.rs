//! 路由表
//!
//! Fat-tree 的确定性两级（前缀 + 后缀）路由表及其查找。

mod builder;
mod table;

pub use builder::build_two_level_table;
pub use table::{NextHop, PrefixRule, RoutingTable, SuffixRule};
