pub mod app;
pub mod header;
pub mod lint;
pub mod manifest;
pub mod product;
pub mod render;
pub mod util;
