pub mod engine;
pub mod language;
pub mod region;
pub mod tesseract;

pub use engine::{OcrError, OcrInput, OcrOutput, RecognizerFactory, TextRecognizer};
pub use language::LanguageSet;
pub use region::{BoundingBox, TextRegion};
pub use tesseract::{TesseractFactory, TesseractRecognizer};
