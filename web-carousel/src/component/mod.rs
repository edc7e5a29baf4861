mod carousel;
mod title;

// `carousel` alone would also name the core crate
pub use self::carousel::*;
pub use title::*;
