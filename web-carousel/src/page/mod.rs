mod showcase;
mod single;

pub use showcase::*;
pub use single::*;
