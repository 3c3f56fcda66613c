mod engine;
mod tsv;

pub use engine::{TesseractFactory, TesseractRecognizer};
pub use tsv::parse_tsv;
