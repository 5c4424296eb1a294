mod options;
mod throughput;

pub use options::*;
pub use throughput::*;
