mod keyboard;
mod pointer;
mod resize;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_pointermove;
pub use resize::wire_resize;
