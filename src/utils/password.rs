use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::{distributions::Alphanumeric, Rng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "pbkdf2_sha256";
#[cfg(not(test))]
const ITERATIONS: u32 = 260000;
// Les tests créent beaucoup de comptes : coût réduit
#[cfg(test)]
const ITERATIONS: u32 = 1000;
const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 22;

/// Hash un mot de passe au format Django : pbkdf2_sha256$iterations$salt$hash
/// Les comptes importés de l'ancienne base restent donc valides.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect();

    let key = derive(password, &salt, ITERATIONS, KEY_LENGTH)?;

    Ok(format!("{}${}${}${}", ALGORITHM, ITERATIONS, salt, STANDARD.encode(key)))
}

/// Vérifie un mot de passe contre un hash pbkdf2_sha256$iterations$salt$hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 4 {
        return Err("Invalid hash format".to_string());
    }

    if parts[0] != ALGORITHM {
        return Err(format!("Unsupported algorithm: {}", parts[0]));
    }

    let iterations = parts[1]
        .parse::<u32>()
        .map_err(|_| "Invalid iterations".to_string())?;
    let salt = parts[2];
    let expected = STANDARD
        .decode(parts[3])
        .map_err(|e| format!("Invalid hash encoding: {}", e))?;

    let computed = derive(password, salt, iterations, expected.len())?;

    Ok(constant_time_eq(&computed, &expected))
}

fn derive(password: &str, salt: &str, iterations: u32, length: usize) -> Result<Vec<u8>, String> {
    let mut key = vec![0u8; length];
    pbkdf2::<HmacSha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key)
        .map_err(|e| format!("PBKDF2 failed: {}", e))?;
    Ok(key)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
