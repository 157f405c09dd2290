use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static regex"));

/// Lowercased, NFC-composed word tokens of two or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.nfc().collect::<String>().to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Per-unit TF-IDF rows over a shared, lexicographically ordered vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>, // L2-normalized, one per input unit
}

#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    pub max_features: usize,
    pub min_df: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            min_df: 1,
        }
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Fit a vocabulary on `units` and weight every unit against it.
    ///
    /// Returns `None` when no term survives stop-word and document-frequency
    /// filtering; callers treat that as an empty result, not a fault.
    pub fn fit_transform<S: AsRef<str>>(&self, units: &[S]) -> Option<TermMatrix> {
        let stop = english_stopwords();
        let docs: Vec<Vec<String>> = units
            .iter()
            .map(|u| {
                tokenize(u.as_ref())
                    .into_iter()
                    .filter(|t| !stop.contains(t.as_str()))
                    .collect()
            })
            .collect();

        // corpus term frequency and document frequency, ordered by term
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for doc in &docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for t in doc {
                let entry = stats.entry(t.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(t.as_str()) {
                    entry.1 += 1;
                }
            }
        }
        stats.retain(|_, (_, df)| *df >= self.min_df);

        if stats.is_empty() {
            debug!("Vectorizer produced empty vocabulary - units={}", units.len());
            return None;
        }

        // highest corpus frequency wins; stable sort keeps lexicographic order on ties
        let mut ranked: Vec<(&str, usize, usize)> =
            stats.iter().map(|(t, (tf, df))| (*t, *tf, *df)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n = docs.len() as f64;
        let index: BTreeMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(i, (t, _, _))| (*t, i))
            .collect();
        let idf: Vec<f64> = ranked
            .iter()
            .map(|(_, _, df)| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = docs
            .iter()
            .map(|doc| {
                let mut row = vec![0.0f64; ranked.len()];
                for t in doc {
                    if let Some(&col) = index.get(t.as_str()) {
                        row[col] += 1.0;
                    }
                }
                for (w, i) in row.iter_mut().zip(&idf) {
                    *w *= i;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        debug!(
            "Vectorized units - units={}, vocabulary={}, max_features={}",
            units.len(),
            ranked.len(),
            self.max_features
        );

        Some(TermMatrix {
            vocabulary: ranked.into_iter().map(|(t, _, _)| t.to_string()).collect(),
            rows,
        })
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in row.iter_mut() {
            *w /= norm;
        }
    }
}

/* ------------------------------ Stop words -------------------------------- */

pub fn english_stopwords() -> &'static HashSet<&'static str> {
    static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        [
            "a","about","above","across","after","afterwards","again","against","all","almost",
            "alone","along","already","also","although","always","am","among","amongst","amoungst",
            "amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere",
            "are","around","as","at","back","be","became","because","become","becomes","becoming",
            "been","before","beforehand","behind","being","below","beside","besides","between",
            "beyond","bill","both","bottom","but","by","call","can","cannot","cant","co","con",
            "could","couldnt","cry","de","describe","detail","do","done","down","due","during",
            "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even",
            "ever","every","everyone","everything","everywhere","except","few","fifteen","fifty",
            "fill","find","fire","first","five","for","former","formerly","forty","found","four",
            "from","front","full","further","get","give","go","had","has","hasnt","have","he",
            "hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him",
            "himself","his","how","however","hundred","i","ie","if","in","inc","indeed","interest",
            "into","is","it","its","itself","keep","last","latter","latterly","least","less","ltd",
            "made","many","may","me","meanwhile","might","mill","mine","more","moreover","most",
            "mostly","move","much","must","my","myself","name","namely","neither","never",
            "nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now",
            "nowhere","of","off","often","on","once","one","only","onto","or","other","others",
            "otherwise","our","ours","ourselves","out","over","own","part","per","perhaps","please",
            "put","rather","re","same","see","seem","seemed","seeming","seems","serious","several",
            "she","should","show","side","since","sincere","six","sixty","so","some","somehow",
            "someone","something","sometime","sometimes","somewhere","still","such","system",
            "take","ten","than","that","the","their","them","themselves","then","thence","there",
            "thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin",
            "third","this","those","though","three","through","throughout","thru","thus","to",
            "together","too","top","toward","towards","twelve","twenty","two","un","under","until",
            "up","upon","us","very","via","was","we","well","were","what","whatever","when",
            "whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon",
            "wherever","whether","which","while","whither","who","whoever","whole","whom","whose",
            "why","will","with","within","without","would","yet","you","your","yours","yourself",
            "yourselves",
        ]
        .into_iter()
        .collect()
    });
    &SET
}
