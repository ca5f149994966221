extern crate fnv;

pub mod data_structure;
pub mod prelude;
