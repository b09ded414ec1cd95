//! hmmpos command-line tool
//!
//! Trains an HMM tagger from a corpus file, tags sentences with a saved
//! model, and reports accuracy on gold-tagged data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hmmpos_core::DecoderConfig;
use hmmpos_trainer::{
    TrainingConfig, default_model_path, evaluate, load_corpus, load_model, load_tagger,
    run_training,
};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "hmmpos")]
#[command(about = "Train and run a Hidden Markov Model part-of-speech tagger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Model file
    #[arg(short, long, global = true, env = "HMMPOS_MODEL")]
    model: Option<PathBuf>,

    /// Score paths in log space
    #[arg(
        long,
        global = true,
        env = "HMMPOS_LOG_SPACE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    log_space: bool,

    /// Probability used for unseen table entries
    #[arg(long, global = true, env = "HMMPOS_FLOOR")]
    floor: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a tab-separated corpus
    Train {
        /// Corpus file: `token<TAB>tag` per line, blank line between sentences
        corpus: PathBuf,
        /// Fraction of sentences held out for evaluation
        #[arg(long, default_value_t = 0.0)]
        holdout: f64,
        /// Seed for the held-out shuffle
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Tag a whitespace-separated sentence
    Tag {
        /// Sentence words
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Measure accuracy on a gold-tagged corpus
    Evaluate {
        /// Corpus file in the training format
        corpus: PathBuf,
    },
    /// Show the tag alphabet and table sizes of a model
    Inspect,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let model_path = cli.model.unwrap_or_else(default_model_path);
    let mut decoder = DecoderConfig::new().with_log_space(cli.log_space);
    if let Some(floor) = cli.floor {
        decoder = decoder.with_floor(floor);
    }
    decoder.validate()?;

    match cli.command {
        Commands::Train {
            corpus,
            holdout,
            seed,
        } => {
            let config = TrainingConfig::new(corpus)
                .with_model_path(&model_path)
                .with_holdout(holdout)
                .with_seed(seed)
                .with_decoder(decoder);
            let report = run_training(&config)?;

            println!(
                "Trained on {} sentences: {} tags, {} distinct tokens",
                report.train_sentences, report.tags, report.vocabulary
            );
            if let Some(eval) = report.evaluation {
                println!(
                    "Held-out accuracy: {:.2}% over {} tokens ({:.2}% on {} unknown)",
                    eval.accuracy() * 100.0,
                    eval.tokens,
                    eval.unknown_accuracy() * 100.0,
                    eval.unknown_tokens
                );
            }
            println!("Model saved to {}", report.model_path.display());
        }
        Commands::Tag { words } => {
            let tagger = load_tagger(&model_path, decoder)?;
            let text = words.join(" ");
            for (token, tag) in tagger.tag_text(&text)? {
                println!("{token}  ->  {tag}");
            }
        }
        Commands::Evaluate { corpus } => {
            let tagger = load_tagger(&model_path, decoder)?;
            let sentences = load_corpus(&corpus)
                .with_context(|| format!("failed to read corpus {}", corpus.display()))?;
            info!(sentences = sentences.len(), "evaluating");

            let eval = evaluate(&tagger, &sentences)?;
            println!(
                "Accuracy: {:.2}% ({}/{} tokens, {} sentences)",
                eval.accuracy() * 100.0,
                eval.correct,
                eval.tokens,
                eval.sentences
            );
            println!(
                "Unknown-token accuracy: {:.2}% ({}/{})",
                eval.unknown_accuracy() * 100.0,
                eval.unknown_correct,
                eval.unknown_tokens
            );
        }
        Commands::Inspect => {
            let params = load_model(&model_path)?;
            println!("Model: {}", model_path.display());
            println!("Tags ({}): {}", params.num_tags(), params.tags().join(" "));
            println!("Vocabulary: {}", params.vocabulary_size());
            println!("Sentence-initial tags: {}", params.initial_table().len());
            println!(
                "Observed transitions: {}",
                params
                    .transition_table()
                    .values()
                    .map(|row| row.len())
                    .sum::<usize>()
            );
        }
    }

    Ok(())
}
