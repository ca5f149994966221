mod cluster;
mod message;
mod message_path;
mod graph;
mod snapshot;
pub mod construction;

pub use self::cluster::Cluster;
pub use self::message::Message;
pub use self::message_path::MessagePath;
pub use self::graph::{ClusterGraph, ProcessStatus};
pub use self::snapshot::{GraphSnapshot, SnapshotEdge, MessagePassEvent};
