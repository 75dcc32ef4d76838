pub mod components;
pub mod scene_graph;
