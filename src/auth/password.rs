use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))?;
    Ok(hash.to_string())
}

/// `Ok(false)` is a wrong password; `Err` means the stored hash itself is
/// unusable and the account needs attention.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("stored hash unparseable: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies_wrong_one_does_not() {
        let hash = hash_password("st0ckroom-Key!").expect("hashing should succeed");
        assert!(verify_password("st0ckroom-Key!", &hash).unwrap());
        assert!(!verify_password("st0ckroom-key!", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unparseable_stored_hash_is_an_error_not_a_mismatch() {
        let err = verify_password("anything", "plaintext-from-a-bad-import").unwrap_err();
        assert!(err.to_string().contains("unparseable"));
    }
}
