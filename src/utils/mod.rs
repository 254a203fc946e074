//! Utility modules

pub mod image;
pub mod mime;

pub use image::{encode_data_uri, load_upload};
