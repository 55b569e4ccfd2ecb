use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use matcher::{load_corpus, truncate, IdfMode, RecipeMatcher, Threshold, VectorizerConfig, DEFAULT_THRESHOLD};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Recommend and search recipes from a local corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Recipe corpus: a CSV/JSON/JSONL file or a directory of them
    #[arg(long, env = "RECIPES_CORPUS")]
    corpus: String,
    /// IDF weighting: smooth or plain
    #[arg(long, default_value_t = IdfMode::Smooth)]
    idf: IdfMode,
    /// Weight terms by raw count instead of 1 + ln(count)
    #[arg(long, default_value_t = false)]
    raw_tf: bool,
}

impl CorpusArgs {
    fn open(&self) -> Result<RecipeMatcher> {
        let recipes = load_corpus(&self.corpus)?;
        let config = VectorizerConfig { idf: self.idf, sublinear_tf: !self.raw_tf };
        let matcher = RecipeMatcher::with_config(recipes, config)?;
        tracing::info!(corpus = %self.corpus, recipes = matcher.len(), "corpus ready");
        Ok(matcher)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes by ingredient similarity to a query
    Recommend {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Ingredients to match, e.g. "tomato basil garlic"
        #[arg(long, default_value = "")]
        query: String,
        /// Minimum cosine similarity, within [0, 1]
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
        /// Show at most this many recipes
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List recipes whose name contains the query, ignoring case
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print corpus and vocabulary statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Serialize)]
struct Stats {
    recipes: usize,
    terms: usize,
    idf: IdfMode,
    sublinear_tf: bool,
}

const PREVIEW_LEN: usize = 60;

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { corpus, query, threshold, limit, json } => {
            let threshold = Threshold::new(threshold)?;
            let matcher = corpus.open()?;
            let mut hits = matcher.recommend(&query, threshold);
            if let Some(limit) = limit {
                hits.truncate(limit);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for (rank, m) in hits.iter().enumerate() {
                    println!(
                        "{:>3}. {:.3}  {}  [{}]",
                        rank + 1,
                        m.similarity,
                        m.recipe.name,
                        truncate(&m.recipe.ingredients, PREVIEW_LEN)
                    );
                }
                if hits.is_empty() {
                    println!("no recipes above threshold {}", threshold.value());
                }
            }
        }
        Commands::Search { corpus, query, json } => {
            let matcher = corpus.open()?;
            let hits = matcher.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for recipe in hits {
                    println!("{}  [{}]", recipe.name, truncate(&recipe.ingredients, PREVIEW_LEN));
                }
            }
        }
        Commands::Stats { corpus } => {
            let matcher = corpus.open()?;
            let space = matcher.space();
            let config = space.config();
            let stats = Stats { recipes: matcher.len(), terms: space.num_terms(), idf: config.idf, sublinear_tf: config.sublinear_tf };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
