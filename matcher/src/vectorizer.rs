use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use crate::vector::SparseVector;
use crate::TermId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How document frequency is turned into a term weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdfMode {
    /// `ln((1 + N) / (1 + df)) + 1`. Never zero, so a term shared by every
    /// recipe still counts.
    #[default]
    Smooth,
    /// `ln(N / df)`. Terms shared by every recipe weigh nothing.
    Plain,
}

impl IdfMode {
    fn weight(self, num_docs: u32, df: u32) -> f32 {
        let n = num_docs as f32;
        let df = df.max(1) as f32;
        match self {
            IdfMode::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
            IdfMode::Plain => (n / df).ln(),
        }
    }
}

impl FromStr for IdfMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smooth" => Ok(IdfMode::Smooth),
            "plain" => Ok(IdfMode::Plain),
            other => Err(format!("unknown idf mode `{other}` (expected `smooth` or `plain`)")),
        }
    }
}

impl fmt::Display for IdfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdfMode::Smooth => "smooth",
            IdfMode::Plain => "plain",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub idf: IdfMode,
    /// Use `1 + ln(tf)` instead of the raw count.
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { idf: IdfMode::Smooth, sublinear_tf: true }
    }
}

/// Vocabulary and IDF weights fitted once over a corpus.
///
/// There is no way to add documents after [`VectorSpace::fit`]; a new corpus
/// needs a new space.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    num_docs: u32,
    config: VectorizerConfig,
}

impl VectorSpace {
    /// Fit the vocabulary over `docs` and return the space together with one
    /// normalized vector per document, in input order.
    pub fn fit<S: AsRef<str>>(docs: &[S], config: VectorizerConfig) -> Result<(Self, Vec<SparseVector>)> {
        if docs.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut tf_per_doc: Vec<HashMap<TermId, u32>> = Vec::with_capacity(docs.len());

        for doc in docs {
            let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokenize(doc.as_ref()) {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term).or_insert_with(|| {
                    df.push(0);
                    next_id
                });
                *tf_counts.entry(tid).or_insert(0) += 1;
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            tf_per_doc.push(tf_counts);
        }

        let num_docs = docs.len() as u32;
        let idf = df.iter().map(|&d| config.idf.weight(num_docs, d)).collect();
        let space = Self { dictionary, df, idf, num_docs, config };
        let vectors = tf_per_doc.iter().map(|tf| space.weigh(tf)).collect();

        tracing::info!(num_docs, num_terms = space.num_terms(), idf = ?config.idf, "fitted vector space");
        Ok((space, vectors))
    }

    /// Project text into this space. Terms that were not seen during fitting
    /// are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for term in tokenize(text) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
        }
        self.weigh(&tf_counts)
    }

    fn weigh(&self, tf_counts: &HashMap<TermId, u32>) -> SparseVector {
        let weights = tf_counts
            .iter()
            .map(|(&tid, &raw)| {
                let tf = if self.config.sublinear_tf { 1.0 + (raw as f32).ln() } else { raw as f32 };
                (tid, tf * self.idf[tid as usize])
            })
            .collect();
        SparseVector::normalized(weights)
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn document_frequency(&self, tid: TermId) -> Option<u32> {
        self.df.get(tid as usize).copied()
    }

    pub fn idf(&self, tid: TermId) -> Option<f32> {
        self.idf.get(tid as usize).copied()
    }

    pub fn num_terms(&self) -> usize {
        self.dictionary.len()
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn config(&self) -> VectorizerConfig {
        self.config
    }
}
