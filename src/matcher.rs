mod core;
mod model;

pub use model::*;

pub(crate) use self::core::{looks_like_option, TokenScanner};
