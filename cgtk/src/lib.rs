// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate algorithm;
extern crate fnv;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;

pub mod errors;
pub mod factors;
pub mod cluster_graph;
pub mod settings;
pub mod prelude;
