//! Client/game id and join-token generation.
//!
//! Grounded on the teacher's `src/protocol/room_codes.rs`
//! (`rand::rng().random_range` sampling over a fixed alphabet), adapted to
//! spec §3's exact alphabet (`[0-9A-Z]`, no "clean" exclusions) and lengths
//! (`ID_LEN` for client/game ids, `TOKEN_LEN` for membership tokens).

use rand::RngExt;

use crate::config::limits::ID_ALPHABET;

fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate an 8-char client or game id.
pub fn generate_id() -> String {
    random_token(crate::config::limits::ID_LEN)
}

/// Generate a 16-char per-membership join token.
pub fn generate_join_token() -> String {
    random_token(crate::config::limits::TOKEN_LEN)
}

/// Validate a client name: 1-8 chars, each alphanumeric (spec §3 "Client").
pub fn is_valid_client_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= crate::config::limits::NAME_MAX
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validate a game name: 1-32 chars (spec §3 "Game"). The original C source
/// additionally requires alphanumeric game names via the same `is_alnum_str`
/// helper used for client names; kept here for parity.
pub fn is_valid_game_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= crate::config::limits::GAME_NAME_MAX
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_correct_length_and_alphabet() {
        for _ in 0..50 {
            let id = generate_id();
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| ID_ALPHABET.contains(&(c as u8))));
        }
    }

    #[test]
    fn generated_tokens_have_correct_length() {
        let token = generate_join_token();
        assert_eq!(token.len(), 16);
    }

    #[test]
    fn client_name_boundaries() {
        assert!(is_valid_client_name("A"));
        assert!(is_valid_client_name("ABCDEFGH"));
        assert!(!is_valid_client_name("ABCDEFGHI"));
        assert!(!is_valid_client_name(""));
        assert!(!is_valid_client_name("AB CD"));
        assert!(!is_valid_client_name("AB-CD"));
    }
}
