pub mod ffmpeg_frame_extractor;
pub mod image_frame_source;
