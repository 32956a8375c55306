//! `keymint salt` — salt generation.

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use keymint_keys::{Salt, MIN_SALT_SIZE};

use crate::io::{b64, emit};

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Generate a random salt
    Generate {
        /// Salt length in bytes (minimum 16)
        #[arg(long, default_value_t = MIN_SALT_SIZE)]
        length: usize,
    },
}

pub fn run(cmd: Cmd) -> Result<u8> {
    match cmd {
        Cmd::Generate { length } => {
            let salt = Salt::generate_with_len(length)?;
            emit(&json!({ "salt": b64(salt.as_bytes()) }))?;
            Ok(0)
        }
    }
}
