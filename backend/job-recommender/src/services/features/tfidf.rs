/// TF-IDF vectorizer for skill documents.
///
/// Tokens are lower-cased runs of at least two word characters (letters,
/// digits or `_`), so `"Node.js"` yields `node` and `js` while `"C"` and
/// `"C++"` yield nothing. Document frequencies come from the corpus passed
/// to [`TfidfVectorizer::fit`]; idf is smoothed as `ln((1 + n) / (1 + df)) + 1`
/// and every transformed row is L2-normalized.
use ndarray::Array2;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    /// term -> column
    vocabulary: BTreeMap<String, usize>,
    /// idf weight per column
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for document in corpus {
            let unique: HashSet<String> = tokenize(document.as_ref()).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_documents = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, column);
        }

        Self { vocabulary, idf }
    }

    /// Project documents onto the fitted vocabulary. Unknown terms are ignored.
    pub fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((corpus.len(), self.vocabulary.len()));

        for (row, document) in corpus.iter().enumerate() {
            for term in tokenize(document.as_ref()) {
                if let Some(&column) = self.vocabulary.get(&term) {
                    matrix[[row, column]] += 1.0;
                }
            }

            let mut weights = matrix.row_mut(row);
            for (weight, idf) in weights.iter_mut().zip(&self.idf) {
                *weight *= idf;
            }

            let norm = weights.dot(&weights).sqrt();
            if norm > 0.0 {
                weights /= norm;
            }
        }

        matrix
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }
}

fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    document
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("Python Node.js C++ R machine_learning").collect();
        assert_eq!(tokens, vec!["python", "node", "js", "machine_learning"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = TfidfVectorizer::fit(&["Python SQL", "Python"]);

        assert_eq!(vectorizer.vocabulary_len(), 2);
        // python: df = 2 -> ln(3/3) + 1
        assert!((vectorizer.idf("python").unwrap() - 1.0).abs() < 1e-12);
        // sql: df = 1 -> ln(3/2) + 1
        assert!((vectorizer.idf("sql").unwrap() - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert!(vectorizer.idf("marketing").is_none());
    }

    #[test]
    fn test_transform_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::fit(&["Python SQL", "Marketing"]);
        let matrix = vectorizer.transform(&["Python SQL", "Python", "Cooking"]);

        for row in 0..2 {
            let norm = matrix.row(row).dot(&matrix.row(row)).sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
        // no known term -> zero row
        assert!(matrix.row(2).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&["", "C R"]);
        assert_eq!(vectorizer.vocabulary_len(), 0);

        let matrix = vectorizer.transform(&["Python"]);
        assert_eq!(matrix.dim(), (1, 0));
    }
}
