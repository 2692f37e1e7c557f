pub mod kill_line_matcher;
pub mod line_cleaner;
pub mod similarity;
