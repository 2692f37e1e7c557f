pub mod contrast_preprocessor;
pub mod tesseract_recognizer;
