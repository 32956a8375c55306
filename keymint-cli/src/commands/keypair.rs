//! `keymint keypair` — signing key pair management.

use anyhow::{bail, Result};
use clap::Subcommand;
use serde_json::json;

use keymint_keys::KeyPair;
use keymint_paserk::{identifier, pie, plain, pw};

use crate::commands::{salt_or_random, wrap_params};
use crate::io::emit;

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Generate a fresh Ed25519 key pair
    Generate {
        /// Wrap the secret half under this password (k4.secret-pw)
        #[arg(long)]
        password: Option<String>,

        /// Wrap the secret half under this k4.local key (k4.secret-wrap.pie)
        #[arg(long, conflicts_with = "password")]
        wrap: Option<String>,

        /// Argon2id memory cost in bytes (with --password)
        #[arg(long)]
        memory_cost: Option<u64>,

        /// Argon2id iterations (with --password)
        #[arg(long)]
        time_cost: Option<u32>,

        /// Argon2id lanes (with --password)
        #[arg(long)]
        parallelism: Option<u32>,
    },
    /// Inspect a k4.secret or k4.public string
    Info {
        /// The key string to inspect
        key: String,

        /// Password for a k4.secret-pw input
        #[arg(long)]
        password: Option<String>,

        /// k4.local wrapping key for a k4.secret-wrap.pie input
        #[arg(long)]
        wrap: Option<String>,
    },
}

pub fn run(cmd: Cmd) -> Result<u8> {
    match cmd {
        Cmd::Generate {
            password,
            wrap,
            memory_cost,
            time_cost,
            parallelism,
        } => generate(password, wrap, memory_cost, time_cost, parallelism),
        Cmd::Info {
            key,
            password,
            wrap,
        } => info(&key, password.as_deref(), wrap.as_deref()),
    }
}

fn generate(
    password: Option<String>,
    wrap: Option<String>,
    memory_cost: Option<u64>,
    time_cost: Option<u32>,
    parallelism: Option<u32>,
) -> Result<u8> {
    let pair = KeyPair::generate();

    let secret = if let Some(password) = password {
        let salt = salt_or_random(None)?;
        let params = wrap_params(memory_cost, time_cost, parallelism);
        pw::wrap_secret(&pair, &password, &salt, &params)?
    } else if let Some(wrap) = wrap {
        let wrapping = plain::decode_local(&wrap)?;
        pie::wrap_secret(&pair, &wrapping)?
    } else {
        plain::encode_secret(&pair)?
    };

    emit(&json!({
        "secret": secret,
        "public": plain::encode_public(pair.verifying())?,
        "sid": identifier::sid(&pair)?,
        "pid": identifier::pid(pair.verifying())?,
    }))?;
    Ok(0)
}

fn info(key: &str, password: Option<&str>, wrap: Option<&str>) -> Result<u8> {
    if key.starts_with("k4.public.") {
        let public = plain::decode_public(key)?;
        emit(&json!({
            "type": "public",
            "pid": identifier::pid(&public)?,
        }))?;
        return Ok(0);
    }

    let pair = if key.starts_with("k4.secret-pw.") {
        let Some(password) = password else {
            bail!("a k4.secret-pw key needs --password");
        };
        pw::unwrap_secret(key, password)?
    } else if key.starts_with("k4.secret-wrap.pie.") {
        let Some(wrap) = wrap else {
            bail!("a k4.secret-wrap.pie key needs --wrap");
        };
        pie::unwrap_secret(key, &plain::decode_local(wrap)?)?
    } else if key.starts_with("k4.secret.") {
        plain::decode_secret(key)?
    } else {
        bail!("unrecognized key format; expected k4.public, k4.secret, k4.secret-pw, or k4.secret-wrap.pie");
    };

    emit(&json!({
        "type": "secret",
        "public": plain::encode_public(pair.verifying())?,
        "sid": identifier::sid(&pair)?,
        "pid": identifier::pid(pair.verifying())?,
    }))?;
    Ok(0)
}
