pub mod error;
pub mod experiment;
pub mod graph;
pub mod path;
pub mod routing;
pub mod topo;

#[cfg(test)]
mod test;
