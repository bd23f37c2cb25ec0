// File: src/core/diversity.rs

/// Lexical diversity: `distinct_types / sqrt(total_tokens)`, or `0.0` for an empty document.
pub fn diversity(total_tokens: usize, distinct_types: usize) -> f64 {
    if total_tokens == 0 {
        return 0.0;
    }
    distinct_types as f64 / (total_tokens as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_types_by_root_of_tokens() {
        assert_eq!(diversity(4, 3), 1.5);
        assert_eq!(diversity(9, 9), 3.0);
        assert_eq!(diversity(1, 1), 1.0);
    }

    #[test]
    fn empty_document_has_zero_diversity() {
        assert_eq!(diversity(0, 0), 0.0);
    }
}
