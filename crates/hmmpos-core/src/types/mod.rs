mod sentence;

pub use sentence::{TaggedSentence, TaggedToken, tagged_sentence};
