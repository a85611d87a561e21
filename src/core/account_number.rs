use rand::{rngs::StdRng, Rng, SeedableRng};

const PREFIX: &str = "AC";
const BODY_LEN: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of candidate account numbers. Uniqueness is enforced by the caller.
pub trait AccountNumberGenerator {
    fn next_candidate(&mut self) -> String;
}

/// Generates `AC` followed by six random uppercase letters or digits.
pub struct RandomAccountNumbers {
    rng: StdRng,
}

impl RandomAccountNumbers {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAccountNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountNumberGenerator for RandomAccountNumbers {
    fn next_candidate(&mut self) -> String {
        let body: String = (0..BODY_LEN)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        format!("{PREFIX}{body}")
    }
}

/// Draws candidates until one is not rejected by `taken`.
pub fn unique_account_number(
    generator: &mut dyn AccountNumberGenerator,
    taken: impl Fn(&str) -> bool,
) -> String {
    loop {
        let candidate = generator.next_candidate();
        if !taken(&candidate) {
            return candidate;
        }
        tracing::debug!(%candidate, "account number collision, retrying");
    }
}
