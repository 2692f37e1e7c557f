pub mod frame_extractor;
pub mod frame_source;
