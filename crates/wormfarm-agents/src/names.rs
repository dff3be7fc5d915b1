//! Name pool used to christen new worms.

use rand::Rng;
use wormfarm_types::NameRecord;

use crate::error::AgentError;

const DEFAULT_NAMES: [(&str, &str); 24] = [
    ("Ada", "Lovelace"),
    ("Alan", "Turing"),
    ("Grace", "Hopper"),
    ("Charles", "Darwin"),
    ("Gregor", "Mendel"),
    ("Rosalind", "Franklin"),
    ("Barbara", "McClintock"),
    ("Alfred", "Wallace"),
    ("Lynn", "Margulis"),
    ("Ronald", "Fisher"),
    ("Sewall", "Wright"),
    ("Motoo", "Kimura"),
    ("Rachel", "Carson"),
    ("Ernst", "Mayr"),
    ("Jane", "Goodall"),
    ("John", "Holland"),
    ("Emmy", "Noether"),
    ("Carl", "Linnaeus"),
    ("Marie", "Curie"),
    ("Thomas", "Morgan"),
    ("Dorothy", "Hodgkin"),
    ("Theodosius", "Dobzhansky"),
    ("Mary", "Anning"),
    ("William", "Hamilton"),
];

/// The built-in name pool.
pub fn default_names() -> Vec<NameRecord> {
    DEFAULT_NAMES
        .iter()
        .map(|(first, last)| NameRecord::new(*first, *last))
        .collect()
}

/// Pick one record uniformly at random.
///
/// # Errors
///
/// Returns [`AgentError::EmptyNamePool`] if `pool` is empty.
pub fn pick_name<'a>(
    pool: &'a [NameRecord],
    rng: &mut impl Rng,
) -> Result<&'a NameRecord, AgentError> {
    if pool.is_empty() {
        return Err(AgentError::EmptyNamePool);
    }
    pool.get(rng.random_range(0..pool.len()))
        .ok_or(AgentError::EmptyNamePool)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn default_pool_is_not_empty() {
        assert_eq!(default_names().len(), DEFAULT_NAMES.len());
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            pick_name(&[], &mut rng),
            Err(AgentError::EmptyNamePool)
        ));
    }

    #[test]
    fn picks_come_from_pool() {
        let pool = default_names();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(pick_name(&pool, &mut rng).is_ok_and(|n| pool.contains(n)));
        }
    }
}
