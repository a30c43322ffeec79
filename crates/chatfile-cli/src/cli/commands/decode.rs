//! `chatfile decode <encoded>` – print the display name for an encoded filename.

use anyhow::Result;
use chatfile_core::filename::decode_filename;

pub fn run_decode(encoded: &str) -> Result<()> {
    println!("{}", decode_filename(encoded));
    Ok(())
}
