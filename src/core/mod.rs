pub mod color;
pub mod coords;
pub mod fonts;
pub mod frame_store;
pub mod interaction;
pub mod layout;
pub mod raster;
pub mod scene;
pub mod viewport;
