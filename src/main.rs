use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use article_recommender::{
    loader::{load_articles, FileFormat},
    RecommendError, Recommender, RecommenderConfig, SessionMode,
};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "article-recommender")]
#[command(about = "Browse an article collection with content based recommendations", long_about = None)]
#[command(version)]
struct Cli {
    /// Article files to explore (.json or .csv)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML config file, defaults to recommender.yaml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Load at most this many articles, picked at random
    #[arg(long)]
    limit: Option<usize>,
}

enum SessionExit {
    Quit,
    ReturnToFiles,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RecommenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RecommenderConfig::load_or_default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("Invalid config")?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let single_file = cli.files.len() == 1;

    loop {
        let path = if single_file {
            cli.files[0].clone()
        } else {
            match choose_file(&cli.files, &mut input)? {
                Some(path) => path,
                None => return Ok(()),
            }
        };

        let recommender = FileFormat::from_path(&path)
            .and_then(|format| load_articles(&path, format, cli.limit, &mut rng))
            .with_context(|| format!("Failed to load {}", path.display()))
            .and_then(|corpus| {
                println!("{} articles loaded", corpus.len());
                Recommender::new(Arc::new(corpus), config.clone())
                    .with_context(|| format!("Cannot recommend from {}", path.display()))
            });
        let mut recommender = match recommender {
            Ok(recommender) => recommender,
            Err(e) if !single_file => {
                eprintln!("[error] {e:#}");
                continue;
            }
            Err(e) => return Err(e),
        };

        loop {
            match run_session(&mut recommender, &mut input)? {
                SessionExit::Quit => {
                    println!("Goodbye!");
                    return Ok(());
                }
                // nothing to choose from, start over with a new sample
                SessionExit::ReturnToFiles if single_file => {
                    recommender.reset()?;
                }
                SessionExit::ReturnToFiles => break,
            }
        }
    }
}

/// Read one line, None on end of input
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn choose_file(files: &[PathBuf], input: &mut impl BufRead) -> Result<Option<PathBuf>> {
    println!("\nWelcome to the article recommender. Choose a file to explore:\n");
    for (i, file) in files.iter().enumerate() {
        println!("{}. {}", i + 1, display_name(file));
    }
    println!("{}. Quit", files.len() + 1);

    loop {
        let Some(line) = prompt(input, "\nYour choice? ")? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => return Ok(Some(files[n - 1].clone())),
            Ok(n) if n == files.len() + 1 => return Ok(None),
            _ => println!(
                "Invalid choice. Please choose a number between 1 and {}, or {} to quit",
                files.len(),
                files.len() + 1
            ),
        }
    }
}

fn run_session(recommender: &mut Recommender, input: &mut impl BufRead) -> Result<SessionExit> {
    loop {
        display_recommendations(recommender);
        println!("\nEnter 'q' to quit the application or 'r' to return to the file selection menu.");
        let Some(line) = prompt(input, "\nYour choice? ")? else {
            return Ok(SessionExit::Quit);
        };
        match line.to_lowercase().as_str() {
            "q" => return Ok(SessionExit::Quit),
            "r" => return Ok(SessionExit::ReturnToFiles),
            _ => {}
        }

        let position = match line.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                println!("Invalid choice. Please enter a valid number or 'r' to return or 'q' to quit.");
                continue;
            }
        };
        let Some(index) = recommender.current().get(position) else {
            println!("Invalid choice. Please pick a number between 1 and {}.", recommender.current().len());
            continue;
        };

        display_article(recommender, index);
        if prompt(input, "Press Enter")?.is_none() {
            return Ok(SessionExit::Quit);
        }

        match recommender.select(position) {
            Ok(_) => {}
            Err(e @ RecommendError::InvalidSelection { .. }) => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
}

fn display_recommendations(recommender: &Recommender) {
    let view = recommender.display();

    match recommender.mode() {
        SessionMode::Initial => println!("\n\n\nHere is a list of articles for you:\n"),
        SessionMode::Refined => println!("\n\n\nHere are some new recommendations for you:\n"),
    }
    for (position, &index) in view.similar.iter().enumerate() {
        println!("{}. {}", position + 1, title(recommender, index));
    }
    if !view.explore.is_empty() {
        println!("\nOr if you want something different, how about...\n");
        for (i, &index) in view.explore.iter().enumerate() {
            println!("{}. {}", view.explore_offset + i + 1, title(recommender, index));
        }
    }
}

fn title(recommender: &Recommender, index: usize) -> &str {
    recommender.document(index).map_or("", |doc| doc.title.as_str())
}

fn display_article(recommender: &Recommender, index: usize) {
    let Some(doc) = recommender.document(index) else {
        return;
    };
    println!("\n\n");
    println!("article {index}");
    println!("=========================================");
    println!("{}", doc.title);
    println!();
    println!("{}", doc.text);
    println!("=========================================");
    println!("\n\n");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
