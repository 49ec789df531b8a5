pub mod classification;
pub mod classifier;
pub mod confirmation;
pub mod pipeline;
pub mod summarizer;

pub use classification::{ActionRequest, Classification, DetailLevel};
pub use classifier::{Classifier, LlmClassifier};
pub use confirmation::ConfirmationReply;
pub use pipeline::{CLARIFY_FILENAME, CommandPipeline};
pub use summarizer::{LlmSummarizer, LocalSummarizer, Summarizer, local_summary};
