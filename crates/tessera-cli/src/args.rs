use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::encoding::Encoding;

#[derive(Debug, Parser)]
#[command(name = "tessera", version, about = "Derive subkeys from a master key")]
pub struct Cli {
    /// TOML configuration, defaults to `config/tessera.toml` when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive one or more subkeys and print them, one per line.
    Derive(DeriveArgs),
    /// Check a subkey against the one derived for the same index and context.
    Verify(VerifyArgs),
    /// Print the length bounds of the underlying library.
    Params,
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    /// File holding the hex encoded master key.
    #[arg(long, conflicts_with = "key_hex")]
    pub key_file: Option<PathBuf>,

    /// Hex encoded master key.
    #[arg(long)]
    pub key_hex: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeriveArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Index of the first subkey.
    #[arg(short, long)]
    pub index: u64,

    /// Number of consecutive indices to derive.
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Subkey length in bytes.
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Context, at most 8 bytes, padded with spaces.
    #[arg(short = 'x', long)]
    pub context: Option<String>,

    #[arg(short, long, value_enum)]
    pub encoding: Option<Encoding>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    #[arg(short, long)]
    pub index: u64,

    #[arg(short = 'x', long)]
    pub context: Option<String>,

    /// Encoding of `--expected`.
    #[arg(short, long, value_enum)]
    pub encoding: Option<Encoding>,

    /// Subkey to check.
    #[arg(long)]
    pub expected: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_derive() {
        let cli = Cli::try_parse_from([
            "tessera", "derive", "--key-hex", "00", "-i", "7", "-n", "3", "-l", "24", "-x", "ab",
            "-e", "base64",
        ])
        .unwrap();

        let Command::Derive(args) = cli.command else {
            panic!("expected derive");
        };
        assert_eq!(args.key.key_hex.as_deref(), Some("00"));
        assert_eq!(args.index, 7);
        assert_eq!(args.count, 3);
        assert_eq!(args.length, Some(24));
        assert_eq!(args.context.as_deref(), Some("ab"));
        assert_eq!(args.encoding, Some(Encoding::Base64));
    }

    #[test]
    fn test_rejects_zero_count() {
        assert!(Cli::try_parse_from(["tessera", "derive", "-i", "0", "-n", "0"]).is_err());
    }

    #[test]
    fn test_key_sources_conflict() {
        assert!(Cli::try_parse_from([
            "tessera",
            "derive",
            "-i",
            "0",
            "--key-hex",
            "00",
            "--key-file",
            "master.key",
        ])
        .is_err());
    }

    #[test]
    fn test_global_config() {
        let cli = Cli::try_parse_from(["tessera", "params", "--config", "other.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert!(matches!(cli.command, Command::Params));
    }
}
