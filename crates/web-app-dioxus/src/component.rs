pub mod element;
pub mod footer;
pub mod header;
pub mod media;
pub mod pwa;
pub mod rest_timer;
pub mod set;
