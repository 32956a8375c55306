//! `keymint symmetric` — symmetric key management and derivation.

use anyhow::Result;
use argon2::{Algorithm, Argon2, Params, Version};
use clap::Subcommand;
use serde_json::json;
use zeroize::Zeroizing;

use keymint_keys::{Salt, SymmetricKey, KEY_SIZE};
use keymint_paserk::{identifier, plain, seal};

use crate::commands::{salt_or_random, wrap_params};
use crate::io::{b64, emit};

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Generate a fresh random symmetric key
    Generate,
    /// Inspect a k4.local string
    Info {
        /// The key string to inspect
        key: String,
    },
    /// Derive a symmetric key from a password with Argon2id
    Derive {
        /// The password to derive from
        #[arg(long)]
        password: String,

        /// Salt as base64url (random when omitted)
        #[arg(long)]
        salt: Option<String>,

        /// Argon2id memory cost in bytes
        #[arg(long)]
        memory_cost: Option<u64>,

        /// Argon2id iterations
        #[arg(long)]
        time_cost: Option<u32>,

        /// Argon2id lanes
        #[arg(long)]
        parallelism: Option<u32>,

        /// Also emit the key sealed to this k4.public recipient
        #[arg(long)]
        seal_with: Option<String>,
    },
}

pub fn run(cmd: Cmd) -> Result<u8> {
    match cmd {
        Cmd::Generate => {
            let key = SymmetricKey::generate();
            emit(&json!({
                "key": plain::encode_local(&key)?,
                "lid": identifier::lid(&key)?,
            }))?;
            Ok(0)
        }
        Cmd::Info { key } => {
            let key = plain::decode_local(&key)?;
            emit(&json!({ "lid": identifier::lid(&key)? }))?;
            Ok(0)
        }
        Cmd::Derive {
            password,
            salt,
            memory_cost,
            time_cost,
            parallelism,
            seal_with,
        } => derive(
            &password,
            salt.as_deref(),
            memory_cost,
            time_cost,
            parallelism,
            seal_with.as_deref(),
        ),
    }
}

fn derive(
    password: &str,
    salt: Option<&str>,
    memory_cost: Option<u64>,
    time_cost: Option<u32>,
    parallelism: Option<u32>,
    seal_with: Option<&str>,
) -> Result<u8> {
    let salt = salt_or_random(salt)?;
    let params = wrap_params(memory_cost, time_cost, parallelism);
    params.validate()?;

    let key = derive_key(password, &salt, params.memory_cost, params.time_cost, params.parallelism)?;

    let mut out = json!({
        "key": plain::encode_local(&key)?,
        "lid": identifier::lid(&key)?,
        "salt": b64(salt.as_bytes()),
    });
    if let Some(recipient) = seal_with {
        let recipient = plain::decode_public(recipient)?;
        out["sealed"] = json!(seal::seal(&key, &recipient)?);
    }
    emit(&out)?;
    Ok(0)
}

/// Argon2id straight to a symmetric key, for operators who manage their own
/// key storage.
fn derive_key(
    password: &str,
    salt: &Salt,
    memory_cost: u64,
    time_cost: u32,
    parallelism: u32,
) -> Result<SymmetricKey> {
    let argon_params = Params::new(
        (memory_cost / 1024) as u32,
        time_cost,
        parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| anyhow::anyhow!("invalid derivation parameters: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut *bytes)
        .map_err(|e| anyhow::anyhow!("key derivation failed: {e}"))?;
    Ok(SymmetricKey::from_bytes(*bytes))
}
