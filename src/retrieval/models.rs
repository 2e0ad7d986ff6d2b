use serde::{Deserialize, Serialize};

/// One nearest-neighbour hit. `score` is a similarity, higher is closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl RetrievedDocument {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            title: None,
            content: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Similarity from a cosine distance as reported by most vector stores.
    pub fn from_cosine_distance(id: impl Into<String>, distance: f32) -> Self {
        Self::new(id, 1.0 - distance)
    }
}
