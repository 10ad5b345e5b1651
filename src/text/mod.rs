// Text normalization: the shared front end for frequency and topic analysis.

pub mod normalize;

pub use normalize::{is_stopword, normalize, TokenSet};
