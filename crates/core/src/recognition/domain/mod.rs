pub mod frame_preprocessor;
pub mod region_selector;
pub mod text_recognizer;
