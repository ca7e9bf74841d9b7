//! Second-pass extraction of validated archive members.

mod engine;

pub use engine::Extractor;
