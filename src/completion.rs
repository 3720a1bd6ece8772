mod core;
mod reply;

pub use self::core::*;
