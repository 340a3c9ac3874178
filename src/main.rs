use anyhow::{Context, Result, bail};
use cipherdesk::crypto::ChaCha20;
use cipherdesk::dispatch::{self, FIXED_NONCE};
use cipherdesk::fileio::{self, OutputFile};
use cipherdesk::keygen::{CharClass, DEFAULT_SEPARATOR, DEFAULT_WORD_COUNT};
use cipherdesk::{Algorithm, CipherDesk, KeyOptions, Preset, StrengthAssessment, StrengthLevel};
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;
mod input;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    /// 6 digits
    Pin,
    /// 12 characters, letters and digits
    Basic,
    /// 16 characters, all classes
    Strong,
    /// 32 characters, all classes
    Maximum,
    /// 16 characters, letters and digits
    Memorable,
    /// 20 characters, all classes
    Custom,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Pin => Preset::Pin,
            PresetArg::Basic => Preset::Basic,
            PresetArg::Strong => Preset::Strong,
            PresetArg::Maximum => Preset::Maximum,
            PresetArg::Memorable => Preset::Memorable,
            PresetArg::Custom => Preset::Custom,
        }
    }
}

#[derive(Debug, clap::Args)]
struct KeyArgs {
    /// Start from a named preset instead of the defaults (32 characters, all classes)
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Key length, clamped to 4..=128
    #[arg(short, long)]
    length: Option<usize>,

    #[arg(long)]
    no_lowercase: bool,

    #[arg(long)]
    no_uppercase: bool,

    #[arg(long)]
    no_digits: bool,

    #[arg(long)]
    no_special: bool,

    /// Leave out i, l, 1, o, 0, I, L and O
    #[arg(long)]
    exclude_similar: bool,

    /// Leave out brackets, quotes and separators
    #[arg(long)]
    exclude_ambiguous: bool,
}

impl KeyArgs {
    fn to_options(&self) -> KeyOptions {
        let mut options = self
            .preset
            .map(|p| Preset::from(p).options())
            .unwrap_or_default();

        if let Some(length) = self.length {
            options = options.with_length(length);
        }
        for (class, disabled) in [
            (CharClass::Lowercase, self.no_lowercase),
            (CharClass::Uppercase, self.no_uppercase),
            (CharClass::Digits, self.no_digits),
            (CharClass::Special, self.no_special),
        ] {
            if disabled {
                options = options.with_class(class, false);
            }
        }

        options
            .exclude_similar(self.exclude_similar)
            .exclude_ambiguous(self.exclude_ambiguous)
    }
}

#[derive(Debug, clap::Args)]
struct FileArgs {
    /// File to read
    input: PathBuf,

    /// File to write
    output: PathBuf,

    /// Key string, padded or cut to 32 bytes
    #[arg(short, long, env = "CIPHERDESK_KEY", hide_env_values = true)]
    key: Option<String>,

    /// 12-byte nonce as 24 hex characters (default: twelve 0x01 bytes)
    #[arg(long)]
    nonce: Option<String>,

    /// Initial block counter
    #[arg(long, default_value_t = 0)]
    counter: u32,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,
}

#[derive(Debug, Parser)]
#[command(name = "cipherdesk")]
#[command(
    version,
    about = "ChaCha20 and Caesar text encryption, secure key generation and key strength checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts text and prints the result
    #[command(arg_required_else_help = true)]
    Encrypt {
        text: String,

        /// chacha20, caesar or base64
        #[arg(short, long, default_value = "chacha20")]
        algorithm: Algorithm,

        /// Key string (chacha20) or shift (caesar)
        #[arg(short, long, env = "CIPHERDESK_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Print the operation record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypts text and prints the result
    #[command(arg_required_else_help = true)]
    Decrypt {
        text: String,

        #[arg(short, long, default_value = "chacha20")]
        algorithm: Algorithm,

        #[arg(short, long, env = "CIPHERDESK_KEY", hide_env_values = true)]
        key: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Encrypts a file with ChaCha20
    #[command(arg_required_else_help = true)]
    EncryptFile(FileArgs),

    /// Decrypts a file encrypted with ChaCha20
    #[command(arg_required_else_help = true)]
    DecryptFile(FileArgs),

    /// Generates random keys
    Generate {
        #[command(flatten)]
        key: KeyArgs,

        /// Number of keys to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Regenerate until the key reaches this strength level (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        min_level: Option<u8>,

        /// Print the strength assessment next to each key
        #[arg(long)]
        assess: bool,

        /// Copy the last generated key to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Generates a passphrase from the built-in word list
    Passphrase {
        #[arg(short, long, default_value_t = DEFAULT_WORD_COUNT,
              value_parser = clap::value_parser!(u16).range(1..=64).map(usize::from))]
        words: usize,

        #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
        separator: String,

        #[arg(long)]
        no_capitalize: bool,

        #[arg(long)]
        assess: bool,

        #[arg(long)]
        copy: bool,
    },

    /// Estimates the strength of a key
    Assess {
        /// Key to assess; read from stdin or prompted when omitted
        candidate: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CIPHERDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_key(algorithm: Algorithm, key: Option<String>) -> Result<Zeroizing<String>> {
    match algorithm {
        Algorithm::ChaCha20 => input::read_secret(key, "Key: "),
        Algorithm::Caesar | Algorithm::Base64 => Ok(Zeroizing::new(key.unwrap_or_default())),
    }
}

fn level_from(value: u8) -> StrengthLevel {
    match value {
        0 => StrengthLevel::NoKey,
        1 => StrengthLevel::Weak,
        2 => StrengthLevel::Medium,
        3 => StrengthLevel::Good,
        4 => StrengthLevel::VeryStrong,
        _ => StrengthLevel::Excellent,
    }
}

fn summary(a: &StrengthAssessment) -> String {
    match a.crack_time {
        Some(t) => format!(
            "[{}, {} bits, cracked in {}]",
            a.label(),
            a.entropy_bits,
            t
        ),
        None => format!("[{}]", a.label()),
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to copy to clipboard")?;
    eprintln!("copied to clipboard");
    Ok(())
}

fn process_file(args: FileArgs, key: &str) -> Result<u64> {
    if args.output.exists() && !args.force {
        bail!(
            "output file {} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let key = dispatch::chacha_key_from_str(key)?;
    let nonce = match args.nonce.as_deref() {
        Some(h) => hex::decode(h).context("nonce must be hex encoded")?,
        None => FIXED_NONCE.to_vec(),
    };
    let cipher = ChaCha20::with_counter(&key, &nonce, args.counter)?;

    fileio::apply_chacha20(&cipher, &args.input, &OutputFile::new(args.output))
}

fn print_done(verb: &str, bytes: u64, output: &Path) {
    println!("{verb} {bytes} bytes into {}", output.display());
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Cli::parse();
    let mut desk = CipherDesk::new();

    match args.command {
        Commands::Encrypt {
            text,
            algorithm,
            key,
            json,
        } => {
            let key = resolve_key(algorithm, key)?;
            let record = desk.encrypt(&text, algorithm, &key)?;
            if json {
                println!("{}", record.to_json()?);
            } else {
                println!("{}", record.output());
            }
        }
        Commands::Decrypt {
            text,
            algorithm,
            key,
            json,
        } => {
            let key = resolve_key(algorithm, key)?;
            let record = desk.decrypt(&text, algorithm, &key)?;
            if json {
                println!("{}", record.to_json()?);
            } else {
                println!("{}", record.output());
            }
        }
        Commands::EncryptFile(mut file) => {
            let key = input::read_new_secret_with_confirmation(file.key.take())?;
            let output = file.output.clone();
            let bytes = process_file(file, &key)?;
            print_done("encrypted", bytes, &output);
        }
        Commands::DecryptFile(mut file) => {
            let key = input::read_secret(file.key.take(), "Key: ")?;
            let output = file.output.clone();
            let bytes = process_file(file, &key)?;
            print_done("decrypted", bytes, &output);
        }
        Commands::Generate {
            key,
            count,
            min_level,
            assess,
            copy,
        } => {
            let options = key.to_options();
            let mut last = None;
            for _ in 0..count {
                let (candidate, assessment) = match min_level {
                    Some(level) => desk.generate_until(&options, level_from(level), 100)?,
                    None => {
                        let candidate = desk.generate_key(&options)?;
                        let assessment = desk.assess(candidate.as_str());
                        (candidate, assessment)
                    }
                };
                if assess {
                    println!("{}  {}", candidate.as_str(), summary(&assessment));
                } else {
                    println!("{}", candidate.as_str());
                }
                last = Some(candidate);
            }
            if let (true, Some(candidate)) = (copy, last) {
                copy_to_clipboard(candidate.as_str())?;
            }
        }
        Commands::Passphrase {
            words,
            separator,
            no_capitalize,
            assess,
            copy,
        } => {
            let phrase = desk.generate_passphrase(words, &separator, !no_capitalize)?;
            if assess {
                println!("{}  {}", phrase.as_str(), summary(&desk.assess(&phrase)));
            } else {
                println!("{}", phrase.as_str());
            }
            if copy {
                copy_to_clipboard(&phrase)?;
            }
        }
        Commands::Assess { candidate, json } => {
            let candidate = match candidate {
                Some(given) => Zeroizing::new(given),
                None => input::read_secret(None, "Key to assess: ")?,
            };
            let a = desk.assess(&candidate);
            if json {
                println!("{}", serde_json::to_string(&a)?);
            } else {
                println!("level:      {} ({})", a.level.value(), a.label());
                println!("score:      {}/100", a.score);
                println!("entropy:    {} bits", a.entropy_bits);
                if let Some(t) = a.crack_time {
                    println!("crack time: {t}");
                }
                println!("{}", a.description());
            }
        }
    }

    Ok(())
}
