pub mod cache;
pub mod utils;
pub mod validation;

pub mod ner;
pub mod summarization;
pub mod zero_shot;

#[cfg(test)]
pub(crate) mod test_support {
    use tokenizers::Tokenizer;

    /// A small WordPiece tokenizer built from an inline `tokenizer.json`, so
    /// unit tests never touch the network. Decoder cleanup is off so that
    /// detokenization artifacts (like " .") survive for the pipelines to
    /// normalize.
    pub(crate) fn tiny_tokenizer() -> Tokenizer {
        let vocab_words = [
            "[PAD]",
            "[UNK]",
            "[CLS]",
            "[SEP]",
            "summarize",
            ":",
            ".",
            "the",
            "parliament",
            "in",
            "par",
            "##is",
            "passed",
            "a",
            "new",
            "energy",
            "law",
            "today",
            "about",
            "short",
            "text",
            "is",
            "nice",
            "this",
            "example",
        ];
        let vocab: Vec<String> = vocab_words
            .iter()
            .enumerate()
            .map(|(i, w)| format!(r#""{w}": {i}"#))
            .collect();
        let json = format!(
            r###"{{
              "version": "1.0",
              "truncation": null,
              "padding": null,
              "added_tokens": [],
              "normalizer": null,
              "pre_tokenizer": {{ "type": "Whitespace" }},
              "post_processor": null,
              "decoder": {{ "type": "WordPiece", "prefix": "##", "cleanup": false }},
              "model": {{
                "type": "WordPiece",
                "unk_token": "[UNK]",
                "continuing_subword_prefix": "##",
                "max_input_chars_per_word": 100,
                "vocab": {{ {} }}
              }}
            }}"###,
            vocab.join(", ")
        );
        Tokenizer::from_bytes(json.as_bytes()).expect("inline tokenizer json should parse")
    }
}
