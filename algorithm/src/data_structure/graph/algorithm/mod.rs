mod spanning_tree;
mod misc;

pub use self::spanning_tree::minimum_spanning_tree;
pub use self::misc::is_tree;
