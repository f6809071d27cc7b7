use nanoid::nanoid;

/// Character set for generated shortcodes.
pub const CODE_ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Length of generated shortcodes.
pub const CODE_LENGTH: usize = 7;

/// Source of candidate shortcodes.
///
/// Implementations are pure generators with no storage interaction;
/// uniqueness is the caller's job. Codes are public identifiers, so the
/// randomness must not leak creation order or be guessable.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default generator: a CSPRNG-backed nanoid over [`CODE_ALPHABET`].
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        nanoid!(CODE_LENGTH, CODE_ALPHABET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_62_unique_chars() {
        assert_eq!(CODE_ALPHABET.len(), 62);
        let unique: std::collections::HashSet<_> = CODE_ALPHABET.iter().collect();
        assert_eq!(unique.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn generated_codes_have_fixed_length_and_alphabet() {
        let code = RandomCodeGenerator.generate();
        assert_eq!(code.chars().count(), CODE_LENGTH);
        assert!(code.chars().all(|c| CODE_ALPHABET.contains(&c)));
    }

    #[test]
    fn consecutive_codes_differ() {
        // 62^7 candidates; a repeat here means the generator is broken.
        let first = RandomCodeGenerator.generate();
        let second = RandomCodeGenerator.generate();
        assert_ne!(first, second);
    }
}
