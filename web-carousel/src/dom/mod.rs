mod binding;
mod listener;
mod scheduler;
mod surface;

pub use binding::*;
pub use listener::*;
pub use scheduler::*;
pub use surface::*;
