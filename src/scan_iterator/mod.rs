mod factory;
mod iterator;
mod segment;
mod state;
mod token;

pub use factory::*;
pub use iterator::*;
pub use segment::*;
pub use state::*;
pub use token::*;
