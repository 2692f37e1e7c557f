pub mod constants;
pub mod frame;
pub mod frame_conversion;
pub mod kill_record;
pub mod output_layout;
pub mod process_runner;
pub mod region_of_interest;
pub mod settings;
pub mod timestamp;
