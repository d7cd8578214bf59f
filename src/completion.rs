//! # Shell Completion Module
//!
//! This module provides shell completion functionality for MoodTune:
//! - Generation of completion scripts for various shells
//! - Completion of mood names for the `recommend` command
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! moodtune completion bash > ~/.local/share/bash-completion/completions/moodtune
//!
//! # Generate zsh completions
//! moodtune completion zsh > ~/.config/zsh/completions/_moodtune
//! ```

use crate::mood::Mood;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Enhanced fish completion script with mood name completion
#[must_use]
pub fn enhanced_fish_completion() -> String {
    let mut script = String::from(
        r#"# Enhanced MoodTune completion script for Fish shell with mood name completion
# Install with: moodtune completion-enhanced fish > ~/.config/fish/completions/moodtune.fish

function __moodtune_complete_moods
    if command -sq moodtune
        moodtune complete-moods 2>/dev/null
    end
end

# Clear existing completions to avoid conflicts
complete -c moodtune -e

# Global options
complete -c moodtune -s h -l help -d 'Print help information'
complete -c moodtune -s V -l version -d 'Print version information'
complete -c moodtune -l config -r -d 'Path to a JSON config file'

# Main commands
complete -c moodtune -f -n '__fish_is_first_token' -a 'serve' -d 'Run the HTTP API'
complete -c moodtune -f -n '__fish_is_first_token' -a 'analyze' -d 'Detect the mood of text and suggest songs'
complete -c moodtune -f -n '__fish_is_first_token' -a 'recommend' -d 'Suggest songs for a mood'
complete -c moodtune -f -n '__fish_is_first_token' -a 'moods' -d 'List available moods'
complete -c moodtune -f -n '__fish_is_first_token' -a 'search' -d 'Search the external catalog for tracks'
complete -c moodtune -f -n '__fish_is_first_token' -a 'completion' -d 'Generate shell completions'
complete -c moodtune -f -n '__fish_is_first_token' -a 'completion-enhanced' -d 'Generate enhanced shell completions'

# serve
complete -c moodtune -f -n '__fish_seen_subcommand_from serve' -l host -r -d 'Address to bind'
complete -c moodtune -f -n '__fish_seen_subcommand_from serve' -l port -r -d 'Port to listen on'
complete -c moodtune -f -n '__fish_seen_subcommand_from serve' -l catalog -a 'static spotify' -d 'Song source'

# analyze, recommend
complete -c moodtune -f -n '__fish_seen_subcommand_from analyze' -s n -l num-songs -r -d 'Number of songs'
complete -c moodtune -f -n '__fish_seen_subcommand_from analyze' -l json -d 'Print JSON'
complete -c moodtune -f -n '__fish_seen_subcommand_from recommend' -a '(__moodtune_complete_moods)' -d 'Mood'
complete -c moodtune -f -n '__fish_seen_subcommand_from recommend' -s n -l num-songs -r -d 'Number of songs'
complete -c moodtune -f -n '__fish_seen_subcommand_from recommend' -l json -d 'Print JSON'

# completion
complete -c moodtune -f -n '__fish_seen_subcommand_from completion' -a 'bash zsh fish power-shell elvish'
complete -c moodtune -f -n '__fish_seen_subcommand_from completion-enhanced' -a 'bash fish'
"#,
    );
    script.push_str(&format!("\n# Static fallback: {}\n", Mood::names().join(" ")));
    script
}

/// Enhanced bash completion script with mood name completion
#[must_use]
pub fn enhanced_bash_completion() -> String {
    let moods = Mood::names().join(" ");
    format!(
        r#"#!/bin/bash
# Enhanced MoodTune completion script with mood name completion
# Install with: moodtune completion-enhanced bash > ~/.local/share/bash-completion/completions/moodtune

_moodtune() {{
    local cur prev words cword
    _init_completion || return

    case "${{prev}}" in
        recommend)
            COMPREPLY=($(compgen -W "{moods}" -- "${{cur}}"))
            return 0
            ;;
        --catalog)
            COMPREPLY=($(compgen -W "static spotify" -- "${{cur}}"))
            return 0
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}"))
            return 0
            ;;
        completion-enhanced)
            COMPREPLY=($(compgen -W "bash fish" -- "${{cur}}"))
            return 0
            ;;
        --config)
            _filedir json
            return 0
            ;;
    esac

    local subcommands="serve analyze recommend moods search completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        COMPREPLY=($(compgen -W "$subcommands --config --help --version" -- "${{cur}}"))
    else
        case "${{words[1]}}" in
            serve)
                COMPREPLY=($(compgen -W "--host --port --catalog --help" -- "${{cur}}"))
                ;;
            analyze|recommend)
                COMPREPLY=($(compgen -W "--num-songs -n --json --help" -- "${{cur}}"))
                ;;
            search)
                COMPREPLY=($(compgen -W "--limit -l --help" -- "${{cur}}"))
                ;;
            *)
                COMPREPLY=($(compgen -W "$subcommands" -- "${{cur}}"))
                ;;
        esac
    fi
}} &&
complete -F _moodtune moodtune

# ex: filetype=sh
"#
    )
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Print mood names, one per line, for dynamic shell completion
pub fn print_mood_completions() {
    for mood in Mood::names() {
        println!("{mood}");
    }
}
