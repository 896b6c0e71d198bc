// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Shell completion generation for the registers CLI.
//!
//! ```bash
//! registers completions bash > ~/.local/share/bash-completion/completions/registers
//! registers completions zsh > ~/.zfunc/_registers
//! registers completions fish > ~/.config/fish/completions/registers.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions and write to stdout.
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "registers", &mut io::stdout());
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
