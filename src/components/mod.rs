pub mod outline;
pub mod radial_tree;
pub mod search;
pub mod stats;
