use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
#[macro_use]
extern crate text_io;

use lexicon_engine::lexicon::alphagram::canonicalize;
use lexicon_engine::lexicon::challenge::{
    generate_blank_challenges, generate_build_challenge, BlankChallengeRequest,
    BuildChallengeRequest,
};
use lexicon_engine::lexicon::combinations::Combinator;
use lexicon_engine::lexicon::ranking::LexiconTable;
use lexicon_engine::{Config, Lexicon, LexiconCache, Mode};

#[derive(Parser)]
#[command(name = "lexicon", about = "Anagram search and alphagram statistics", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(short, long, global = true, env = "LEXICON_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of word lists, overriding the config
    #[arg(long, global = true, env = "LEXICON_PATH")]
    lexicon_path: Option<PathBuf>,

    /// Lexicon to search, defaults to the configured one
    #[arg(short, long, global = true)]
    lexicon: Option<String>,

    /// Most free blanks a query may have
    #[arg(long, global = true)]
    max_blanks: Option<usize>,

    /// Append log output to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Anagram a rack, e.g. AE(JQXZ)NR?(KY)?
    Anagram {
        letters: String,

        /// Words using any subset of the rack
        #[arg(short, long, conflicts_with = "super_length")]
        build: bool,

        /// Words of this length containing the whole rack
        #[arg(long = "super", value_name = "LENGTH")]
        super_length: Option<usize>,
    },

    /// Number of ways to draw an alphagram from a full bag
    Combos {
        alphagram: String,

        #[arg(long)]
        no_blanks: bool,
    },

    /// Canonical sorted form of a word
    Alphagram { word: String },

    /// Front and back hooks of a word
    Hooks { word: String },

    /// Blank anagram quiz
    Blanks {
        #[arg(long, default_value_t = 7)]
        word_length: usize,

        #[arg(short, long, default_value_t = 10)]
        num_questions: usize,

        #[arg(long, default_value_t = 2)]
        two_blanks: usize,

        #[arg(long, default_value_t = 10)]
        max_solutions: usize,
    },

    /// A rack with a bounded number of buildable words
    BuildChallenge {
        #[arg(long, default_value_t = 3)]
        min_length: usize,

        #[arg(long, default_value_t = 7)]
        max_length: usize,

        #[arg(long, default_value_t = 10)]
        min_solutions: usize,

        #[arg(long, default_value_t = 100)]
        max_solutions: usize,

        #[arg(long)]
        require_length_solution: bool,
    },

    /// Rank every alphagram of the lexicon by probability
    Table {
        #[arg(short, long)]
        out: PathBuf,

        /// Write JSON instead of bincode
        #[arg(long)]
        json: bool,
    },

    /// Read racks from stdin and anagram them
    Interactive,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .with_context(|| format!("Failed to open log file {}", file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }
    builder.init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = &cli.lexicon_path {
        config.lexicon_path = path.clone();
    }
    if let Some(max_blanks) = cli.max_blanks {
        config.max_blanks = max_blanks;
    }
    if let Some(lexicon) = &cli.lexicon {
        config.default_lexicon = lexicon.clone();
    }
    Ok(config)
}

fn print_words(words: &[String]) {
    for word in words {
        println!("{}", word);
    }
    println!("{} words", words.len());
}

fn print_hooks(lexicon: &Lexicon, word: &str) -> lexicon_engine::Result<()> {
    println!(
        "{} {} {}",
        lexicon.front_hooks(word)?.to_lowercase(),
        word.to_uppercase(),
        lexicon.back_hooks(word)?.to_lowercase()
    );
    Ok(())
}

/// Reads queries a line at a time until EOF or `:quit`. A plain line is an
/// exact anagram; `:build`, `:super N`, `:combos` and `:hooks` switch modes.
fn interactive(lexicon: &Lexicon, max_blanks: usize) -> Result<()> {
    loop {
        println!("Enter rack:");
        let line: String = match try_read!("{}\n") {
            Ok(line) => line,
            Err(_) => break,
        };
        let mut parts = line.split_whitespace();
        let outcome = match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => continue,
            (Some(":quit"), _, _) => break,
            (Some(":build"), Some(query), _) => lexicon
                .anagram(query, Mode::Build, max_blanks)
                .map(|words| print_words(&words)),
            (Some(":super"), Some(length), Some(query)) => match length.parse() {
                Ok(length) => lexicon
                    .anagram(query, Mode::Super { length }, max_blanks)
                    .map(|words| print_words(&words)),
                Err(_) => {
                    println!("Not a length: {}", length);
                    continue;
                }
            },
            (Some(":combos"), Some(alphagram), _) => lexicon
                .combinations(alphagram, true)
                .map(|combos| println!("{}", combos)),
            (Some(":hooks"), Some(word), _) => print_hooks(lexicon, word),
            (Some(query), _, _) => lexicon
                .anagram(query, Mode::Exact, max_blanks)
                .map(|words| print_words(&words)),
        };
        if let Err(e) = outcome {
            println!("{}", e);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    let config = load_config(&cli)?;
    let name = config.default_lexicon.clone();
    let max_blanks = config.max_blanks;
    let timeout = Duration::from_millis(config.challenge_timeout_ms);

    let cache = LexiconCache::new(config);
    let load = || {
        cache
            .get(&name)
            .with_context(|| format!("Failed to load lexicon {}", name))
    };

    match cli.command {
        // Only the letter distribution is needed here, not the word list
        Commands::Combos {
            alphagram,
            no_blanks,
        } => {
            let combinator = Combinator::new(cache.config().distribution(&name)?);
            println!("{}", combinator.combinations(&alphagram, !no_blanks)?);
        }
        Commands::Alphagram { word } => {
            let dist = cache.config().distribution(&name)?;
            println!("{}", canonicalize(&word, dist.tile_mapping())?);
        }
        Commands::Anagram {
            letters,
            build,
            super_length,
        } => {
            let mode = match (build, super_length) {
                (_, Some(length)) => Mode::Super { length },
                (true, None) => Mode::Build,
                (false, None) => Mode::Exact,
            };
            print_words(&load()?.anagram(&letters, mode, max_blanks)?);
        }
        Commands::Hooks { word } => print_hooks(&*load()?, &word)?,
        Commands::Blanks {
            word_length,
            num_questions,
            two_blanks,
            max_solutions,
        } => {
            let req = BlankChallengeRequest {
                word_length,
                num_questions,
                num_with_two_blanks: two_blanks,
                max_solutions,
            };
            let deadline = Instant::now() + timeout;
            let questions =
                generate_blank_challenges(&*load()?, &req, deadline, &mut rand::thread_rng())?;
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        Commands::BuildChallenge {
            min_length,
            max_length,
            min_solutions,
            max_solutions,
            require_length_solution,
        } => {
            let req = BuildChallengeRequest {
                min_length,
                max_length,
                min_solutions,
                max_solutions,
                require_length_solution,
            };
            let deadline = Instant::now() + timeout;
            let challenge =
                generate_build_challenge(&*load()?, &req, deadline, &mut rand::thread_rng())?;
            println!("{}", serde_json::to_string_pretty(&challenge)?);
        }
        Commands::Table { out, json } => {
            let table = LexiconTable::for_lexicon(&*load()?)?;
            table
                .save(&out, json)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!("Wrote {} alphagrams to {}", table.alphagrams.len(), out.display());
        }
        Commands::Interactive => interactive(&*load()?, max_blanks)?,
    }
    Ok(())
}
