//! Short code generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated short codes.
///
/// 10 characters over a 62-symbol alphabet give ~8.4e17 possible codes, so
/// a collision against any realistic number of stored links is negligible
/// and the allocator's redraw loop terminates after one draw in practice.
pub const SHORT_CODE_LENGTH: usize = 10;

/// Generates a random short code: uppercase and lowercase letters plus
/// digits, uniformly sampled.
///
/// Collision resistance, not secrecy, is the goal here; the thread-local
/// generator is sufficient.
pub fn generate_short_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns `true` if `code` has the exact shape of a generated short code.
///
/// Lets the resolver reject malformed codes without a store round trip.
pub fn is_valid_short_code(code: &str) -> bool {
    use regex::Regex;
    use std::sync::LazyLock;

    static CODE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{10}$").expect("static pattern compiles"));

    CODE_RE.is_match(code)
}
