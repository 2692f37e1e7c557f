pub mod image_writer;
pub mod kill_log;
