pub mod bert_ner;
pub mod modernbert_nli;
pub mod t5;

pub use bert_ner::{NerBertModel, NerBertSize};
pub use modernbert_nli::{EntailmentModernBertModel, ModernBertSize};
pub use t5::{SummarizationT5Model, T5Size};
