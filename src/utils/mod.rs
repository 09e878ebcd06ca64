// Utils compartidos

pub mod constants;
pub mod html;
pub mod leaflet_ffi;
pub mod storage;

pub use constants::*;
pub use html::escape_html;
