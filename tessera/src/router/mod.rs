pub mod graph;

pub mod util;
