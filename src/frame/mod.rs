//! Frame values and the reader contract consumed by the data processor.

pub mod reader;
pub mod types;

pub use reader::FrameReader;
pub use types::Frame;
