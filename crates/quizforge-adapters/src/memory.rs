//! In-memory page source for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::pages::PageSource;

/// A page source backed by a vector of strings.
///
/// Records the order in which pages were requested.
pub struct InMemoryPages {
    pages: Vec<String>,
    reads: Mutex<Vec<usize>>,
}

impl InMemoryPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            reads: Mutex::new(Vec::new()),
        }
    }

    /// Pages requested so far, in request order.
    pub fn reads(&self) -> Vec<usize> {
        self.reads.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for InMemoryPages {
    fn name(&self) -> &str {
        "memory"
    }

    async fn page_count(&self) -> Result<usize, AdapterError> {
        Ok(self.pages.len())
    }

    async fn page_text(&self, page: usize) -> Result<String, AdapterError> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(page);
        }
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(AdapterError::PageOutOfRange {
                page,
                count: self.pages.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::collect_blocks;

    #[tokio::test]
    async fn pages_are_read_in_order() {
        let source = InMemoryPages::new(["Câu 1: x\nA. a", "B. b\nC. c", "D. d"]);
        let blocks = collect_blocks(&source).await.unwrap();

        assert_eq!(source.reads(), vec![1, 2, 3]);
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Câu 1: x", "A. a", "B. b", "C. c", "D. d"]);
    }

    #[tokio::test]
    async fn empty_document() {
        let source = InMemoryPages::new(Vec::<String>::new());
        assert!(collect_blocks(&source).await.unwrap().is_empty());
        assert!(source.reads().is_empty());
    }
}
