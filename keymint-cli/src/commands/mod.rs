//! Subcommand implementations.

pub mod keypair;
pub mod license;
pub mod salt;
pub mod symmetric;

use anyhow::Result;
use keymint_paserk::WrapParams;

/// Shared Argon2id cost flags, folded over the library defaults.
pub fn wrap_params(memory_cost: Option<u64>, time_cost: Option<u32>, parallelism: Option<u32>) -> WrapParams {
    let defaults = WrapParams::default();
    WrapParams {
        memory_cost: memory_cost.unwrap_or(defaults.memory_cost),
        time_cost: time_cost.unwrap_or(defaults.time_cost),
        parallelism: parallelism.unwrap_or(defaults.parallelism),
    }
}

/// Parses a salt flag (base64url) or generates a fresh one.
pub fn salt_or_random(salt: Option<&str>) -> Result<keymint_keys::Salt> {
    match salt {
        Some(s) => {
            let bytes = crate::io::from_b64(s)?;
            Ok(keymint_keys::Salt::from_bytes(bytes)?)
        }
        None => Ok(keymint_keys::Salt::generate()),
    }
}
