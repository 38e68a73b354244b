mod input;
mod notification;

pub use input::*;
pub use notification::*;
