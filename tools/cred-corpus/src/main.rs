//! cred-corpus: corpus tooling for the credential-creation fuzz harness.
//!
//! - `seed`: write the canonical parameter set into a corpus directory
//! - `replay`: run corpus files through the harness and report what happened
//! - `mutate`: offline structure-aware mutation rounds
//! - `show`: decode and print a corpus file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use cred_harness::domain::seed;
use cred_harness::{
    telemetry, DriveReport, FidoHarness, HarnessApi, HarnessConfig, ParamSet, SeededMutator,
};

/// Corpus tooling for the credential-creation fuzz harness
#[derive(Parser, Debug)]
#[command(name = "cred-corpus", version)]
#[command(about = "Seed, replay, mutate and inspect credential fuzz corpora")]
struct Cli {
    /// Log level filter (overrides CRED_FUZZ_LOG_LEVEL and RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Drop mutations whose authenticator data the credential rejects
    #[arg(long, global = true)]
    gate_authdata: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the canonical seed into a corpus directory
    Seed {
        /// Corpus directory (created if missing)
        dir: PathBuf,
    },

    /// Run files through the harness
    Replay {
        /// Files or corpus directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// One JSON record per file
        #[arg(long)]
        json: bool,
    },

    /// Run offline mutation rounds, writing every accepted output
    Mutate {
        /// Starting input (the canonical seed when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output corpus directory
        #[arg(long)]
        out: PathBuf,

        /// Number of mutation rounds
        #[arg(long, default_value_t = 100)]
        rounds: u32,

        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Largest output size
        #[arg(long, default_value_t = 4096)]
        max_size: usize,
    },

    /// Decode a file and print its parameter set
    Show {
        /// Input file
        file: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct ReplayRecord {
    path: String,
    len: usize,
    decoded: bool,
    #[serde(flatten)]
    report: Option<DriveReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = harness_config(&cli, HarnessConfig::from_env());
    telemetry::init_logging(&config).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Seed { dir } => cmd_seed(&dir),
        Commands::Replay { paths, json } => cmd_replay(config, &paths, json),
        Commands::Mutate {
            input,
            out,
            rounds,
            seed: rng_seed,
            max_size,
        } => cmd_mutate(config, input.as_deref(), &out, rounds, rng_seed, max_size),
        Commands::Show { file } => cmd_show(&file),
    }
}

/// Apply command-line flags over the environment configuration.
fn harness_config(cli: &Cli, env: HarnessConfig) -> HarnessConfig {
    let config = env.with_gate_authdata(cli.gate_authdata);
    match &cli.log_level {
        Some(level) => config.with_log_level(level.clone()),
        None => config,
    }
}

fn cmd_seed(dir: &Path) -> Result<()> {
    let bytes = seed::canonical()
        .to_vec()
        .context("Failed to encode canonical seed")?;
    let path = write_corpus_file(dir, &bytes)?;
    info!(path = %path.display(), len = bytes.len(), "seed written");
    println!("{}", path.display());
    Ok(())
}

fn cmd_replay(config: HarnessConfig, paths: &[PathBuf], json: bool) -> Result<()> {
    let harness = FidoHarness::fido(config, SeededMutator::new(0))?;

    for file in expand(paths)? {
        let data = fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
        let report = harness.run(&data);
        let record = ReplayRecord {
            path: file.display().to_string(),
            len: data.len(),
            decoded: report.is_some(),
            report,
        };

        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", describe(&record));
        }
    }
    Ok(())
}

fn describe(record: &ReplayRecord) -> String {
    match &record.report {
        None => format!("{}: {} bytes, undecodable", record.path, record.len),
        Some(r) => format!(
            "{}: {} bytes, pubkey {} bytes, id {} bytes, {}",
            record.path,
            record.len,
            r.pubkey_len,
            r.id_len,
            match &r.verify_error {
                None => "verified".to_string(),
                Some(e) => format!("not verified ({e})"),
            }
        ),
    }
}

fn cmd_mutate(
    config: HarnessConfig,
    input: Option<&Path>,
    out: &Path,
    rounds: u32,
    rng_seed: u32,
    max_size: usize,
) -> Result<()> {
    let start = match input {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => seed::canonical().to_vec()?,
    };
    if start.len() > max_size {
        warn!(len = start.len(), max_size, "input longer than max_size");
    }

    let mut harness = FidoHarness::fido(config, SeededMutator::new(u64::from(rng_seed)))?;
    let mut buf = vec![0u8; max_size.max(start.len())];
    buf[..start.len()].copy_from_slice(&start);
    let mut size = start.len();
    let mut written = 0usize;

    for round in 0..rounds {
        let n = harness.custom_mutate(&mut buf, size, max_size, rng_seed.wrapping_add(round));
        if n == 0 {
            debug!(round, "mutation rejected");
            continue;
        }
        size = n;
        write_corpus_file(out, &buf[..n])?;
        written += 1;
    }

    info!(rounds, written, out = %out.display(), "mutation finished");
    println!("{written} of {rounds} mutations written to {}", out.display());
    Ok(())
}

fn cmd_show(file: &Path) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let params = match ParamSet::decode(&data) {
        Ok(p) => p,
        Err(e) => bail!("{}: {e}", file.display()),
    };
    print!("{}", summary(&params));
    let trailing = data.len() - params.encoded_len();
    if trailing > 0 {
        println!("trailing:  {trailing} bytes ignored");
    }
    Ok(())
}

fn summary(p: &ParamSet) -> String {
    format!(
        "algorithm: {:?}\n\
         format:    {}\n\
         cdh:       {}\n\
         rp id:     {:?}\n\
         rp name:   {:?}\n\
         authdata:  {} bytes {}\n\
         ext:       {:#x}\n\
         rk/uv:     {}/{}\n\
         x509:      {} bytes\n\
         sig:       {} bytes\n\
         encoded:   {} bytes\n",
        p.algorithm(),
        p.format().name(),
        hex::encode(p.cdh.as_slice()),
        String::from_utf8_lossy(p.rp_id.as_bytes()),
        String::from_utf8_lossy(p.rp_name.as_bytes()),
        p.authdata.len(),
        hex::encode(&p.authdata.as_slice()[..p.authdata.len().min(16)]),
        p.ext,
        p.rk,
        p.uv,
        p.x509.len(),
        p.sig.len(),
        p.encoded_len(),
    )
}

/// Files named directly plus the regular files of named directories.
fn expand(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)
                .with_context(|| format!("Failed to list {}", path.display()))?
                .map(|e| e.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()?;
            entries.retain(|p| p.is_file());
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Content-addressed corpus file name.
fn corpus_name(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn write_corpus_file(dir: &Path, data: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(corpus_name(data));
    fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_name_is_content_hash() {
        assert_eq!(
            corpus_name(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_summary_of_seed() {
        let text = summary(&seed::canonical());
        assert!(text.contains("algorithm: Es256"));
        assert!(text.contains("format:    packed"));
        assert!(text.contains("rp id:     \"localhost\""));
        assert!(text.contains("authdata:  198 bytes 58c4"));
        assert!(text.contains("encoded:   1102 bytes"));
    }

    #[test]
    fn test_describe_undecodable() {
        let record = ReplayRecord {
            path: "x".into(),
            len: 3,
            decoded: false,
            report: None,
        };
        assert_eq!(describe(&record), "x: 3 bytes, undecodable");
    }

    #[test]
    fn test_replay_record_json_flattens_report() {
        let record = ReplayRecord {
            path: "x".into(),
            len: 1102,
            decoded: true,
            report: Some(DriveReport {
                verify_error: None,
                pubkey_len: 64,
                id_len: 64,
            }),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pubkey_len"], 64);
        assert_eq!(json["decoded"], true);
    }

    #[test]
    fn test_log_level_flag_beats_environment() {
        let env = HarnessConfig::default().with_log_level("error");

        let cli = Cli::try_parse_from(["cred-corpus", "--log-level", "debug", "show", "f"]).unwrap();
        assert_eq!(harness_config(&cli, env.clone()).log_level, "debug");

        let cli = Cli::try_parse_from(["cred-corpus", "show", "f"]).unwrap();
        assert_eq!(harness_config(&cli, env).log_level, "error");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["cred-corpus", "replay", "a", "b", "--json"]).unwrap();
        match cli.command {
            Commands::Replay { paths, json } => {
                assert_eq!(paths.len(), 2);
                assert!(json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
