//! Command line arguments and workflow configuration.
//!
//! Values not given on the command line are taken from the Solana CLI
//! configuration file (the one `solana config set` writes) and if that
//! doesn’t set them either, from built-in defaults matching a local test
//! validator.

use std::path::{Path, PathBuf};

use bank_account::state::BankAccount;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};


/// Default cluster endpoint: a local `solana-test-validator`.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Default bank program directory, relative to the working directory.
pub const DEFAULT_PROGRAM_DIR: &str = "program";


/// Provisions the payer’s bank account and calls the bank program on it.
#[derive(clap::Parser, Debug, Clone)]
#[command(name = "bank-client", version, about)]
pub struct Cli {
    /// URL of the cluster’s JSON RPC endpoint.
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Path to the payer keypair file.
    #[arg(long, short = 'k', conflicts_with = "ephemeral")]
    pub keypair: Option<PathBuf>,

    /// Use a freshly generated payer keypair.  It starts with no funds so
    /// this only works on clusters which support airdrops.
    #[arg(long)]
    pub ephemeral: bool,

    /// Directory of the bank program; its build artifacts are expected in
    /// `target/deploy`.
    #[arg(long, default_value = DEFAULT_PROGRAM_DIR)]
    pub program_dir: PathBuf,

    /// Address of the bank program.  If not given, it’s read from the
    /// program keypair in the program directory.
    #[arg(long)]
    pub program_id: Option<Pubkey>,

    /// Seed the bank account address is derived from.
    #[arg(long, default_value = bank_account::instruction::DEFAULT_SEED)]
    pub seed: String,

    /// Commitment level: processed, confirmed or finalized.
    #[arg(long)]
    pub commitment: Option<String>,

    /// Path to the Solana CLI configuration file.
    #[arg(long, short = 'C')]
    pub config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log debug messages.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}


/// Subset of the Solana CLI configuration file.
#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SolanaConfig {
    pub json_rpc_url: Option<String>,
    pub keypair_path: Option<String>,
    pub commitment: Option<String>,
}

impl SolanaConfig {
    /// Returns default location of the configuration file,
    /// `~/.config/solana/cli/config.yml`.
    pub fn default_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(std::env::var_os("HOME")?);
        path.push(".config/solana/cli/config.yml");
        Some(path)
    }

    /// Reads the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|err| {
            Error::Config(format!("{}: {err}", path.display()))
        })?;
        serde_yaml::from_reader(file).map_err(|err| {
            Error::Config(format!("{}: {err}", path.display()))
        })
    }

    /// Reads the configuration file given explicitly or, if `path` is
    /// `None`, from the default location.
    ///
    /// An explicitly given file must exist.  A missing file at the default
    /// location is treated as an empty configuration.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}


/// Where the payer keypair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayerSource {
    File(PathBuf),
    Ephemeral,
}


/// Location of the bank program and its build artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramArtifacts {
    /// Address given explicitly; if set, the keypair isn’t read.
    pub program_id: Option<Pubkey>,
    pub keypair_path: PathBuf,
    pub so_path: PathBuf,
}

impl ProgramArtifacts {
    /// Returns artifacts at their `cargo build-sbf` locations in
    /// `program_dir`.
    pub fn in_dir(program_dir: &Path) -> Self {
        let deploy = program_dir.join("target/deploy");
        Self {
            program_id: None,
            keypair_path: deploy.join("bank-keypair.json"),
            so_path: deploy.join("bank.so"),
        }
    }
}


/// Transaction fee budget the payer is funded for.
///
/// The payer is funded for `signatures` signatures times a `multiplier` on
/// top of the rent so that fee changes between funding and sending
/// transactions don’t require another airdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBudget {
    pub signatures: u64,
    pub multiplier: u64,
}

impl Default for FeeBudget {
    /// Budget for the account creation and the bank instruction
    /// transactions.
    fn default() -> Self { Self { signatures: 2, multiplier: 50 } }
}


/// Configuration of the workflow.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub payer: PayerSource,
    pub program: ProgramArtifacts,
    pub seed: String,
    /// Size of the bank account; always [`BankAccount::LEN`] outside of
    /// tests.
    pub record_size: usize,
    pub fee_budget: FeeBudget,
}

impl Config {
    /// Builds configuration from command line arguments falling back to
    /// the Solana CLI configuration.
    pub fn new(cli: &Cli, solana: SolanaConfig) -> Result<Self> {
        let rpc_url = cli
            .url
            .clone()
            .or(solana.json_rpc_url)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let commitment = cli
            .commitment
            .as_deref()
            .or(solana.commitment.as_deref())
            .map(parse_commitment)
            .transpose()?
            .unwrap_or_else(CommitmentConfig::confirmed);

        let payer = if cli.ephemeral {
            PayerSource::Ephemeral
        } else if let Some(path) = cli.keypair.clone() {
            PayerSource::File(path)
        } else if let Some(path) = solana.keypair_path {
            PayerSource::File(path.into())
        } else {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                Error::Config("HOME not set; use --keypair".to_string())
            })?;
            let mut path = PathBuf::from(home);
            path.push(".config/solana/id.json");
            PayerSource::File(path)
        };

        let mut program = ProgramArtifacts::in_dir(&cli.program_dir);
        program.program_id = cli.program_id;

        Ok(Self {
            rpc_url,
            commitment,
            payer,
            program,
            seed: cli.seed.clone(),
            record_size: BankAccount::LEN,
            fee_budget: FeeBudget::default(),
        })
    }
}


fn parse_commitment(value: &str) -> Result<CommitmentConfig> {
    value.parse().map_err(|_| {
        Error::Config(format!("invalid commitment level ‘{value}’"))
    })
}
