//! 实验描述与结果导出

mod report;
mod spec;

pub use report::{EdgeExport, HistogramReport, NodeExport, TopologyExport};
pub use spec::{BuiltTopology, ExperimentSpec, TopologySpec};
