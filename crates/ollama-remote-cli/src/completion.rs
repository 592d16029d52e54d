// Shell completion generation

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::router::Cli;

/// Write a completion script for `shell` to `out`
pub fn generate_completions<W: Write + ?Sized>(shell: Shell, mut out: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut out);
}
