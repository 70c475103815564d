mod experiment_spec;
mod parallel;
mod regular_graph;
