pub mod file_kill_log;
pub mod image_file_writer;
