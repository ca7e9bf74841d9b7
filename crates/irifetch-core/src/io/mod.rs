//! I/O utilities for retrieval operations.

pub mod counting;

pub use counting::CountingWriter;
