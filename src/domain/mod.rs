pub mod order;
pub mod result;

pub use order::*;
pub use result::*;
