use rand::distributions::Alphanumeric;
use rand::Rng;

use super::answers::SUFFIX_LENGTH;
use super::error::FormError;
use super::types::Schema;

/// True when some question or question set in `schema` already ends in `_<suffix>`.
pub fn suffix_in_use(schema: &Schema, suffix: &str) -> bool {
    let marker = format!("_{}", suffix);
    schema
        .question_sets
        .iter()
        .any(|qs| qs.question_set_id.ends_with(&marker))
        || schema.question_ids().iter().any(|id| id.ends_with(&marker))
}

/// Random five character suffix not yet used anywhere in `schema`.
pub fn generate_suffix(schema: &Schema, max_attempts: u32) -> Result<String, FormError> {
    generate_suffix_with(&mut rand::thread_rng(), schema, max_attempts)
}

pub fn generate_suffix_with<R: Rng + ?Sized>(
    rng: &mut R,
    schema: &Schema,
    max_attempts: u32,
) -> Result<String, FormError> {
    for attempt in 1..=max_attempts {
        let candidate: String = (&mut *rng)
            .sample_iter(Alphanumeric)
            .take(SUFFIX_LENGTH)
            .map(char::from)
            .collect();
        if !suffix_in_use(schema, &candidate) {
            return Ok(candidate);
        }
        tracing::debug!("Suffix '{}' already in use (attempt {})", candidate, attempt);
    }
    Err(FormError::SuffixExhausted { attempts: max_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::answers::is_repeated_question_id;
    use crate::form::types::{Question, QuestionSet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn schema() -> Schema {
        Schema {
            question_sets: vec![QuestionSet::new(
                "funder_abcde",
                vec![Question::new("fundername_abcde", "Name")],
            )],
            ..Default::default()
        }
    }

    #[test]
    fn detects_used_suffixes() {
        assert!(suffix_in_use(&schema(), "abcde"));
        assert!(!suffix_in_use(&schema(), "zzzzz"));
    }

    #[test]
    fn generated_suffix_matches_repeated_id_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        let suffix = generate_suffix_with(&mut rng, &schema(), 10).unwrap();
        assert_eq!(suffix.len(), SUFFIX_LENGTH);
        assert!(is_repeated_question_id(&format!("name_{}", suffix)));
    }

    #[test]
    fn zero_attempts_is_exhausted() {
        let err = generate_suffix(&schema(), 0).unwrap_err();
        assert!(matches!(err, FormError::SuffixExhausted { attempts: 0 }));
        assert!(!err.is_recoverable());
    }
}
