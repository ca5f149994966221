pub use errors::{Error, ErrorKind, Result};
pub use factors::*;
pub use cluster_graph::*;
pub use settings::*;
