//! Fuzzy product matching.
//!
//! Shoppers type partial, unaccented, or slightly wrong product names; the
//! scorer ranks exact matches above prefixes, prefixes above substrings,
//! and falls back to bigram overlap for near-misses.

use crate::catalog::Product;
use serde::Serialize;

/// Minimum score for a product to appear in results.
pub const SCORE_THRESHOLD: f64 = 0.3;

/// A scored search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    /// The matched product.
    pub product: &'a Product,
    /// Match score in (0.0, 1.0].
    pub score: f64,
}

/// Search active products by name, best matches first.
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<SearchHit<'a>> {
    let query_norm = normalize_text(query);
    if query_norm.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = products
        .iter()
        .filter(|p| p.is_available())
        .filter_map(|product| {
            let score = score(&normalize_text(&product.name), &query_norm);
            (score >= SCORE_THRESHOLD).then_some(SearchHit { product, score })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product.name.cmp(&b.product.name))
    });
    hits
}

/// Score a normalized name against a normalized query.
fn score(name: &str, query: &str) -> f64 {
    if name == query {
        return 1.0;
    }
    if name.starts_with(query) {
        return 0.9;
    }
    if name.contains(query) {
        return 0.75;
    }
    bigram_similarity(name, query)
}

/// Dice coefficient over character bigrams.
fn bigram_similarity(a: &str, b: &str) -> f64 {
    let a_bigrams = bigrams(a);
    let b_bigrams = bigrams(b);
    if a_bigrams.is_empty() || b_bigrams.is_empty() {
        return 0.0;
    }

    let mut remaining = b_bigrams.clone();
    let mut shared = 0usize;
    for bigram in &a_bigrams {
        if let Some(pos) = remaining.iter().position(|x| x == bigram) {
            remaining.swap_remove(pos);
            shared += 1;
        }
    }

    (2.0 * shared as f64) / (a_bigrams.len() + b_bigrams.len()) as f64
}

fn bigrams(s: &str) -> Vec<[char; 2]> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    chars.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// Lowercase and strip the accents common in Portuguese product names.
fn normalize_text(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            _ => c,
        })
        .collect()
}
