mod core;
mod spec;

pub use self::core::*;
pub use spec::*;
