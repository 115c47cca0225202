use std::io::Write;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use passgen::{
    CharacterClass, ClassSelection, Config, GeneratorState, IndexRounding, RngSource,
    UniformSource,
};

use crate::ProgError;

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Password length; clamped into the configured range.
    #[arg(short = 'n', long)]
    length: Option<usize>,
    /// Include uppercase letters.
    #[arg(short, long)]
    uppercase: bool,
    /// Include lowercase letters.
    #[arg(short, long)]
    lowercase: bool,
    /// Include digits.
    #[arg(short, long)]
    digits: bool,
    /// Include symbols.
    #[arg(short, long)]
    symbols: bool,
    /// Use round-to-nearest indexing, which can produce short passwords.
    #[arg(long)]
    faithful: bool,
    /// Seed the random number generator, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Also copy the password to the clipboard.
    #[arg(short, long)]
    copy: bool,
    /// Print a JSON object instead of the bare password.
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    /// The classes given on the command line, or the configured ones if none were.
    fn selection(&self, config: &Config) -> ClassSelection {
        let given = ClassSelection {
            uppercase: self.uppercase,
            lowercase: self.lowercase,
            digits: self.digits,
            symbols: self.symbols,
        };
        if given.is_empty() {
            config.selection()
        } else {
            given
        }
    }

    fn rounding(&self, config: &Config) -> IndexRounding {
        if self.faithful {
            IndexRounding::Round
        } else {
            config.index_rounding
        }
    }

    fn source(&self) -> Box<dyn UniformSource> {
        match self.seed {
            Some(seed) => Box::new(RngSource::new(StdRng::seed_from_u64(seed))),
            None => Box::new(RngSource::thread()),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    password: &'a passgen::Secret,
    length: usize,
    strength: passgen::StrengthScore,
    classes: Vec<CharacterClass>,
}

impl<'a> JsonOutput<'a> {
    fn from_state(state: &'a GeneratorState) -> Option<Self> {
        let password = state.password()?;
        Some(JsonOutput {
            password,
            length: password.char_count(),
            strength: state.strength(),
            classes: state.selection().classes().collect(),
        })
    }
}

fn generate_state(
    config: &Config,
    args: &GenerateArgs,
    source: &mut dyn UniformSource,
) -> Result<GeneratorState, ProgError> {
    let limits = config.length_limits()?;
    let state = GeneratorState::new(&limits)
        .with_length(args.length.unwrap_or(limits.default_length()), &limits)
        .with_selection(args.selection(config));
    if let Some(requested) = args.length {
        if requested != state.length() {
            tracing::warn!(
                requested,
                clamped = state.length(),
                "length outside {}..={}; clamped",
                limits.min(),
                limits.max()
            );
        }
    }
    Ok(state.generate(source, args.rounding(config))?)
}

pub(crate) fn generate(config: &Config, args: GenerateArgs) -> Result<(), ProgError> {
    let mut source = args.source();
    let state = generate_state(config, &args, &mut *source)?;
    let password = state
        .password()
        .expect("a successful generation always stores a password");

    {
        let mut stdout = std::io::stdout().lock();
        match JsonOutput::from_state(&state) {
            Some(output) if args.json => {
                serde_json::to_writer(&mut stdout, &output)
                    .context("failed to write JSON to stdout")?;
                writeln!(stdout).context("failed to write to stdout")?;
            }
            _ => {
                writeln!(stdout, "{}", password.as_str()).context("failed to write to stdout")?;
            }
        }
    }

    if !args.json {
        eprintln!("Strength: {}", crate::notify::Meter(state.strength()));
    }
    if args.copy {
        state.copy(&mut crate::clipboard::CommandClipboard)?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}
