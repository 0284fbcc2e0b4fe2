mod info;
pub use info::*;
