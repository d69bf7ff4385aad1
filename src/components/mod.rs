//! UI components.

pub mod spatial_graph;
