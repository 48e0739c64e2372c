pub mod parse;
pub mod random;
pub mod time;
