use std::io::Write;

use tessera_crypto::kdf::{self, BYTES_MAX, BYTES_MIN, CONTEXTBYTES, DEFAULT_LENGTH, KEYBYTES};
use tracing::{info, warn};

use crate::{
    args::{Command, DeriveArgs, VerifyArgs},
    config::Config,
    error::Error,
    key,
};

/// Runs `command` and writes its output to `out`.
/// Returns `false` when the command ran but its check failed.
///
/// # Errors
/// If the inputs are invalid or `out` cannot be written.
pub async fn run(command: Command, config: &Config, out: &mut impl Write) -> Result<bool, Error> {
    match command {
        Command::Derive(args) => derive(args, config, out).await.map(|()| true),
        Command::Verify(args) => verify(args, config, out).await,
        Command::Params => params(out).map(|()| true),
    }
}

#[tracing::instrument(skip_all, fields(index = args.index, count = args.count))]
async fn derive(args: DeriveArgs, config: &Config, out: &mut impl Write) -> Result<(), Error> {
    let secret = key::load(&args.key, &config.kdf).await?;
    let context = args
        .context
        .or_else(|| config.kdf.context.clone())
        .ok_or(Error::MissingContext)?;
    let length = args.length.unwrap_or(config.kdf.length);
    let encoding = args.encoding.unwrap_or(config.kdf.encoding);

    let span = args.count.checked_sub(1).ok_or(Error::EmptyRange)?;
    let last = args
        .index
        .checked_add(span)
        .ok_or(Error::IndexOverflow {
            start: args.index,
            count: args.count,
        })?;

    for index in args.index..=last {
        let subkey = kdf::derive(secret.unsecure(), index, length, &context)?;
        let encoded = encoding.encode(subkey.unsecure());

        if args.count == 1 {
            writeln!(out, "{encoded}")?;
        } else {
            writeln!(out, "{index}\t{encoded}")?;
        }
    }

    info!(%context, length, %encoding, "derived subkeys");
    Ok(())
}

#[tracing::instrument(skip_all, fields(index = args.index))]
async fn verify(args: VerifyArgs, config: &Config, out: &mut impl Write) -> Result<bool, Error> {
    let secret = key::load(&args.key, &config.kdf).await?;
    let context = args
        .context
        .or_else(|| config.kdf.context.clone())
        .ok_or(Error::MissingContext)?;
    let encoding = args.encoding.unwrap_or(config.kdf.encoding);

    let expected = encoding
        .decode(&args.expected)
        .ok_or(Error::InvalidEncoding(encoding))?;

    let matches = kdf::verify(secret.unsecure(), args.index, &context, &expected)?;
    if matches {
        writeln!(out, "ok")?;
    } else {
        warn!(%context, "subkey mismatch");
        writeln!(out, "mismatch")?;
    }

    Ok(matches)
}

fn params(out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "bytes_min\t{BYTES_MIN}")?;
    writeln!(out, "bytes_max\t{BYTES_MAX}")?;
    writeln!(out, "contextbytes\t{CONTEXTBYTES}")?;
    writeln!(out, "keybytes\t{KEYBYTES}")?;
    writeln!(out, "default_length\t{DEFAULT_LENGTH}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use color_eyre::Result;
    use tessera_crypto::kdf::Bound;

    use super::*;
    use crate::{args::KeyArgs, encoding::Encoding};

    const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn key_args() -> KeyArgs {
        KeyArgs {
            key_file: None,
            key_hex: Some(KEY.to_string()),
        }
    }

    fn derive_args(index: u64, count: u64) -> DeriveArgs {
        DeriveArgs {
            key: key_args(),
            index,
            count,
            length: None,
            context: Some("tests".to_string()),
            encoding: None,
        }
    }

    async fn run_to_string(command: Command, config: &Config) -> Result<(bool, String)> {
        let mut out = Vec::new();
        let ok = run(command, config, &mut out).await?;
        Ok((ok, String::from_utf8(out)?))
    }

    #[tokio::test]
    async fn test_derive_single() -> Result<()> {
        let (ok, output) =
            run_to_string(Command::Derive(derive_args(5, 1)), &Config::default()).await?;
        assert!(ok);

        let expected = kdf::derive(&const_hex::decode(KEY)?, 5, DEFAULT_LENGTH, "tests")?;
        assert_eq!(output, format!("{}\n", const_hex::encode(expected.unsecure())));

        Ok(())
    }

    #[tokio::test]
    async fn test_derive_range() -> Result<()> {
        let (_, output) =
            run_to_string(Command::Derive(derive_args(10, 3)), &Config::default()).await?;

        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        for (line, index) in lines.iter().zip(10..) {
            let (prefix, encoded) = line.split_once('\t').unwrap();
            assert_eq!(prefix, index.to_string());
            assert_eq!(encoded.len(), DEFAULT_LENGTH * 2);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_derive_uses_config_defaults() -> Result<()> {
        let mut config = Config::default();
        config.kdf.length = 16;
        config.kdf.context = Some("fromcfg".to_string());
        config.kdf.encoding = Encoding::Base64;

        let mut args = derive_args(0, 1);
        args.context = None;

        let (_, output) = run_to_string(Command::Derive(args), &config).await?;

        let expected = kdf::derive(&const_hex::decode(KEY)?, 0, 16, "fromcfg")?;
        assert_eq!(output.trim(), Encoding::Base64.encode(expected.unsecure()));

        Ok(())
    }

    #[tokio::test]
    async fn test_derive_index_overflow() {
        let config = Config::default();

        let result = run_to_string(Command::Derive(derive_args(u64::MAX, 2)), &config).await;
        assert!(result.is_err());

        let (_, output) = run_to_string(Command::Derive(derive_args(u64::MAX, 1)), &config)
            .await
            .unwrap();
        assert_eq!(output.trim().len(), DEFAULT_LENGTH * 2);
    }

    #[tokio::test]
    async fn test_derive_zero_count() {
        let mut out = Vec::new();
        let result = run(Command::Derive(derive_args(0, 0)), &Config::default(), &mut out).await;
        assert!(matches!(result, Err(Error::EmptyRange)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_derive_missing_context() {
        let mut args = derive_args(0, 1);
        args.context = None;

        let mut out = Vec::new();
        let result = run(Command::Derive(args), &Config::default(), &mut out).await;
        assert!(matches!(result, Err(Error::MissingContext)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_derive_rejects_length() {
        let mut args = derive_args(0, 1);
        args.length = Some(1);

        let mut out = Vec::new();
        let result = run(Command::Derive(args), &Config::default(), &mut out).await;
        assert!(matches!(
            result,
            Err(Error::Kdf(tessera_crypto::Error::InvalidOutputLength {
                bound: Bound::TooShort,
                len: 1,
            }))
        ));
    }

    #[tokio::test]
    async fn test_verify() -> Result<()> {
        let subkey = kdf::derive(&const_hex::decode(KEY)?, 3, 24, "tests")?;

        let args = VerifyArgs {
            key: key_args(),
            index: 3,
            context: Some("tests".to_string()),
            encoding: None,
            expected: const_hex::encode(subkey.unsecure()),
        };
        let (ok, output) = run_to_string(Command::Verify(args), &Config::default()).await?;
        assert!(ok);
        assert_eq!(output, "ok\n");

        let args = VerifyArgs {
            key: key_args(),
            index: 4,
            context: Some("tests".to_string()),
            encoding: None,
            expected: const_hex::encode(subkey.unsecure()),
        };
        let (ok, output) = run_to_string(Command::Verify(args), &Config::default()).await?;
        assert!(!ok);
        assert_eq!(output, "mismatch\n");

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_invalid_encoding() {
        let args = VerifyArgs {
            key: key_args(),
            index: 0,
            context: Some("tests".to_string()),
            encoding: Some(Encoding::Hex),
            expected: "not-hex".to_string(),
        };

        let mut out = Vec::new();
        let result = run(Command::Verify(args), &Config::default(), &mut out).await;
        assert!(matches!(result, Err(Error::InvalidEncoding(Encoding::Hex))));
    }

    #[tokio::test]
    async fn test_params() -> Result<()> {
        let (ok, output) = run_to_string(Command::Params, &Config::default()).await?;
        assert!(ok);
        assert!(output.contains("bytes_min\t16\n"));
        assert!(output.contains("bytes_max\t64\n"));
        assert!(output.contains("contextbytes\t8\n"));

        Ok(())
    }
}
