#![forbid(unsafe_code)]

pub mod kdtree;
pub mod search;

pub use kdtree::KdTree;
pub use search::SearchParam;
