pub mod extract_kills_use_case;
pub mod pipeline_logger;
