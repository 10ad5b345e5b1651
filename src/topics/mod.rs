// Topic modeling: bag-of-words dictionary, LDA fitting, and a caching
// modeler that rebuilds whenever the topic count changes.

pub mod dictionary;
pub mod lda;
pub mod modeler;
pub mod summary;
pub mod traits;

pub use modeler::{ModelState, TopicModeler};
pub use summary::{Topic, TopicCount, TopicSummary, MAX_TOPICS, MIN_TOPICS};
pub use traits::TopicExtractor;
