//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::ffi::OsString;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

use incgen_core::domain::{GuardRule, Layout};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand the generation flags drive a run in the current
/// directory.
#[derive(Debug, Parser)]
#[command(
    name    = "incgen",
    bin_name = "incgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate layered C header chains",
    long_about = "incgen creates the consts/types/inlines header chain of a C \
                  module, public and private tiers included, each file \
                  guarded and including the one before it.",
    after_help = "EXAMPLES:\n\
        \x20 incgen --name=foo          # public + private tiers, foo.h, foo.c\n\
        \x20 incgen --pub --name=bar    # public tier and bar.h only\n\
        \x20 incgen --add=xxx           # xxx_*.h, xxx.h, xxx.c\n\
        \x20 incgen --dir --once        # name from current directory, #pragma once\n\
        \x20 incgen --name=foo --dry-run",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Generation flags, used when no subcommand is given.
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse `args`, accepting single-dash long flags such as `-name=foo`.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Long flags that may also be spelled with a single dash.
const SINGLE_DASH_LONGS: &[&str] = &[
    "name",
    "dir",
    "once",
    "pub",
    "add",
    "layout",
    "guard-style",
    "strict-guards",
    "dry-run",
];

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value` for the
/// generation flags. Everything after `--` is left alone.
///
/// Switches also take an explicit value (`-once=true`, `--dir=false`); a
/// bare switch means `true`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let body = s.strip_prefix('-').filter(|b| !b.starts_with('-'))?;
            let flag = body.split_once('=').map_or(body, |(f, _)| f);
            SINGLE_DASH_LONGS
                .contains(&flag)
                .then(|| OsString::from(format!("-{s}")))
        });
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Generation flags.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Module name used in include paths, guards and `<name>.h`/`<name>.c`.
    #[arg(long = "name", value_name = "NAME", help = "Module name")]
    pub name: Option<String>,

    /// Take the module name from the current directory.
    #[arg(
        long = "dir",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        default_missing_value = "true",
        hide_default_value = true,
        help = "Use the current directory's name as the module name"
    )]
    pub dir: bool,

    /// Emit `#pragma once` above the include guard.
    #[arg(
        long = "once",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        default_missing_value = "true",
        hide_default_value = true,
        help = "Add #pragma once to every header"
    )]
    pub once: bool,

    /// Generate only the public tier and the export header.
    #[arg(
        long = "pub",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        default_missing_value = "true",
        hide_default_value = true,
        help = "Generate the public tier only"
    )]
    pub public_only: bool,

    /// Generate a single tier with a custom prefix.
    #[arg(
        long = "add",
        value_name = "PREFIX",
        help = "Generate <PREFIX>_*.h, <PREFIX>.h and <PREFIX>.c"
    )]
    pub add: Option<String>,

    /// Tier shape.
    #[arg(
        long = "layout",
        value_enum,
        value_name = "LAYOUT",
        help = "Tier shape [default: from config, compact]"
    )]
    pub layout: Option<LayoutArg>,

    /// Guard-token normalization.
    #[arg(
        long = "guard-style",
        value_enum,
        value_name = "STYLE",
        help = "Guard normalization [default: from config, letters-only]"
    )]
    pub guard_style: Option<GuardStyleArg>,

    /// Reject plans where two headers normalize to the same guard.
    #[arg(
        long = "strict-guards",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        default_missing_value = "true",
        hide_default_value = true,
        help = "Fail on guard-token collisions"
    )]
    pub strict_guards: bool,

    /// Print what would be written without creating files.
    #[arg(
        long = "dry-run",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        default_missing_value = "true",
        hide_default_value = true,
        help = "Show the files without creating them"
    )]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// `true` if any generation flag was given.
    pub fn any_set(&self) -> bool {
        self.name.is_some()
            || self.dir
            || self.once
            || self.public_only
            || self.add.is_some()
            || self.layout.is_some()
            || self.guard_style.is_some()
            || self.strict_guards
            || self.dry_run
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise an incgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 incgen init           # global config\n\
            \x20 incgen init --local   # .incgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 incgen completions bash > ~/.local/share/bash-completion/completions/incgen\n\
            \x20 incgen completions zsh  > ~/.zfunc/_incgen\n\
            \x20 incgen completions fish > ~/.config/fish/completions/incgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 incgen config get generation.layout\n\
            \x20 incgen config list\n\
            \x20 incgen config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `incgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.incgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `incgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `incgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.layout`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// `--layout` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// consts, types, inlines.
    Compact,
    /// consts, types, inlines, includes.
    #[value(alias = "legacy")]
    Collector,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Compact => Layout::Compact,
            LayoutArg::Collector => Layout::Collector,
        }
    }
}

/// `--guard-style` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuardStyleArg {
    /// Every non-letter becomes `_`.
    LettersOnly,
    /// Digits are kept.
    KeepDigits,
}

impl From<GuardStyleArg> for GuardRule {
    fn from(arg: GuardStyleArg) -> Self {
        match arg {
            GuardStyleArg::LettersOnly => GuardRule::LettersOnly,
            GuardStyleArg::KeepDigits => GuardRule::KeepDigits,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(args.iter().copied()).unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_generates() {
        let cli = parse(&["incgen"]);
        assert!(cli.command.is_none());
        assert!(!cli.generate.any_set());
    }

    #[test]
    fn generation_flags_with_equals() {
        let cli = parse(&["incgen", "--name=foo", "--once", "--pub"]);
        assert_eq!(cli.generate.name.as_deref(), Some("foo"));
        assert!(cli.generate.once);
        assert!(cli.generate.public_only);
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let cli = parse(&["incgen", "-name=foo", "-pub", "-add=xxx", "-v"]);
        assert_eq!(cli.generate.name.as_deref(), Some("foo"));
        assert!(cli.generate.public_only);
        assert_eq!(cli.generate.add.as_deref(), Some("xxx"));
        assert_eq!(cli.global.verbose, 1);
    }

    #[test]
    fn switches_accept_explicit_values() {
        let cli = parse(&["incgen", "-once=true", "-name=foo", "--pub=false", "-dry-run=1"]);
        assert!(cli.generate.once);
        assert!(!cli.generate.public_only);
        assert!(cli.generate.dry_run);

        let cli = parse(&["incgen", "-dir=false", "--strict-guards=TRUE"]);
        assert!(!cli.generate.dir);
        assert!(cli.generate.strict_guards);
    }

    #[test]
    fn bare_switch_does_not_swallow_a_subcommand() {
        let cli = parse(&["incgen", "--once", "init"]);
        assert!(cli.generate.once);
        assert!(matches!(cli.command, Some(Commands::Init(_))));
    }

    #[test]
    fn switch_rejects_non_boolean_value() {
        assert!(Cli::try_parse_normalized(["incgen", "--once=maybe"]).is_err());
    }

    #[test]
    fn normalize_leaves_short_flags_and_passthrough() {
        let out = normalize_args(["incgen", "-vv", "-q", "--", "-name=x"]);
        assert_eq!(out, ["incgen", "-vv", "-q", "--", "-name=x"]);
    }

    #[test]
    fn empty_values_reach_the_resolver() {
        let cli = parse(&["incgen", "--add="]);
        assert_eq!(cli.generate.add.as_deref(), Some(""));
    }

    #[test]
    fn name_and_dir_both_parse() {
        // The conflict is reported by the resolver, not by clap.
        let cli = parse(&["incgen", "--name=foo", "--dir"]);
        assert!(cli.generate.dir);
    }

    #[test]
    fn layout_and_guard_style_values() {
        let cli = parse(&[
            "incgen",
            "--layout=legacy",
            "--guard-style",
            "keep-digits",
        ]);
        assert_eq!(cli.generate.layout, Some(LayoutArg::Collector));
        assert_eq!(
            GuardRule::from(cli.generate.guard_style.unwrap()),
            GuardRule::KeepDigits
        );
    }

    #[test]
    fn subcommands_parse() {
        assert!(matches!(
            parse(&["incgen", "init", "--local"]).command,
            Some(Commands::Init(InitArgs { local: true, .. }))
        ));
        assert!(matches!(
            parse(&["incgen", "config", "get", "generation.once"]).command,
            Some(Commands::Config(ConfigCommands::Get { .. }))
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_normalized(["incgen", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_normalized(["incgen", "--frobnicate"]).is_err());
    }
}
