pub mod extract;
pub mod layout;
pub mod normalize;
pub mod segment;

pub use extract::{FieldExtractor, NameHintProvider, NoNameHints};
pub use layout::{analyze, split_rows};
pub use normalize::Normalizer;
pub use segment::AnchorSegmenter;
