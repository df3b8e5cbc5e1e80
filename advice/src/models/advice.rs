use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub quote: String,
    #[serde(default)]
    pub author: String,
}

/// Body of `GET /advice/random`: `{"data": {"quote": ..., "author": ...}}`.
#[derive(Debug, Deserialize)]
pub struct AdviceEnvelope {
    pub data: Advice,
}

impl Advice {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
        }
    }

    /// One-line text published on the response queue.
    pub fn to_reply(&self) -> String {
        if self.author.is_empty() {
            self.quote.clone()
        } else {
            format!("{} - {}", self.quote, self.author)
        }
    }
}
