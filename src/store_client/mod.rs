mod attribute;
mod filter;
mod keycode;
mod memory;
mod metrics;
mod page;
mod request;
mod store;

pub use attribute::*;
pub use filter::*;
pub use keycode::*;
pub use memory::*;
pub use metrics::*;
pub use page::*;
pub use request::*;
pub use store::*;


#[cfg(test)]
pub use test::*;
