// Term dictionary and bag-of-words conversion.
//
// Ids are assigned to unseen terms in sorted order, so the same token set
// always produces the same id mapping regardless of token order.

use std::collections::{BTreeMap, HashMap};

/// Bag-of-words document: (term id, count), sorted by id.
pub type BagOfWords = Vec<(usize, usize)>;

/// Bidirectional term <-> id mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    token2id: HashMap<String, usize>,
    id2token: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary over every term in `documents`.
    pub fn from_documents<D: AsRef<[String]>>(documents: &[D]) -> Self {
        let mut dict = Self::default();
        for doc in documents {
            dict.add_document(doc.as_ref());
        }
        dict
    }

    /// Register the document's unseen terms, in sorted order.
    pub fn add_document(&mut self, tokens: &[String]) {
        let mut unseen: Vec<&String> = tokens
            .iter()
            .filter(|t| !self.token2id.contains_key(t.as_str()))
            .collect();
        unseen.sort();
        unseen.dedup();

        for token in unseen {
            self.token2id.insert(token.clone(), self.id2token.len());
            self.id2token.push(token.clone());
        }
    }

    /// Count the document's known terms. Unknown terms are ignored.
    pub fn doc2bow(&self, tokens: &[String]) -> BagOfWords {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for token in tokens {
            if let Some(&id) = self.token2id.get(token.as_str()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}
