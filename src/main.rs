//! librarium CLI - seed and query the authors/books catalog

use clap::{Parser, Subcommand, ValueEnum};
use librarium::schema::builtin::{AUTHORS, BOOKS};
use librarium::{query, seed, Catalog};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "librarium")]
#[command(about = "A schema-validated authors/books catalog", long_about = None)]
struct Cli {
    /// Catalog directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new catalog with the authors and books collections
    Init,

    /// Insert the sample authors and books (not idempotent)
    Seed,

    /// Run one of the fixed catalog reports
    Report {
        /// Which report to run
        #[arg(value_enum)]
        kind: ReportKind,
    },

    /// Count books matching a language and year
    Count {
        #[arg(long)]
        language: String,

        #[arg(long)]
        year: i64,
    },

    /// Show catalog status
    Status,

    /// List collections and their document counts
    Collections,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    /// Book count per author, zero-book authors included
    BookCounts,
    /// Authors with books, ordered by count then name
    RankedAuthors,
    /// Each book with its author's name and contacts
    BooksDetailed,
    /// Each book merged with its full author document
    BooksFull,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init_catalog(&cli.catalog).await,
        Commands::Seed => seed_catalog(&cli.catalog).await,
        Commands::Report { kind } => run_report(&cli.catalog, kind).await,
        Commands::Count { language, year } => count_books(&cli.catalog, &language, year).await,
        Commands::Status => show_status(&cli.catalog).await,
        Commands::Collections => list_collections(&cli.catalog).await,
    }
}

async fn init_catalog(path: &PathBuf) -> anyhow::Result<()> {
    println!("Initializing catalog at {:?}...", path);

    // Opening registers the built-in schemas
    let catalog = Catalog::open(path).await?;
    for name in [AUTHORS, BOOKS] {
        catalog.collection(name).ensure_exists().await?;
    }

    println!("Catalog initialized successfully!");
    println!();
    println!("Directory structure:");
    println!("  collections/authors/  - Author documents");
    println!("  collections/books/    - Book documents");
    println!("  .librarium/schemas/   - Collection schemas");
    println!();
    println!("Get started:");
    println!("  librarium seed");
    println!("  librarium report book-counts");
    println!("  librarium count --language English --year 1949");

    Ok(())
}

async fn seed_catalog(path: &PathBuf) -> anyhow::Result<()> {
    let catalog = Catalog::open(path).await?;
    let report = seed::seed(&catalog).await?;

    println!(
        "Seeded {} author(s) and {} book(s).",
        report.authors, report.books
    );
    println!("Note: seeding is not idempotent; running it again duplicates the fixture.");

    Ok(())
}

async fn run_report(path: &PathBuf, kind: ReportKind) -> anyhow::Result<()> {
    let catalog = Catalog::open(path).await?;

    let rendered = match kind {
        ReportKind::BookCounts => {
            serde_json::to_string_pretty(&query::author_book_counts(&catalog).await?)?
        }
        ReportKind::RankedAuthors => {
            serde_json::to_string_pretty(&query::authors_ranked_by_books(&catalog).await?)?
        }
        ReportKind::BooksDetailed => {
            serde_json::to_string_pretty(&query::books_with_author(&catalog).await?)?
        }
        ReportKind::BooksFull => {
            serde_json::to_string_pretty(&query::books_with_author_full(&catalog).await?)?
        }
    };

    println!("{}", rendered);
    Ok(())
}

async fn count_books(path: &PathBuf, language: &str, year: i64) -> anyhow::Result<()> {
    let catalog = Catalog::open(path).await?;
    let count = query::count_books(&catalog, language, year).await?;
    println!("{}", count);
    Ok(())
}

async fn show_status(path: &PathBuf) -> anyhow::Result<()> {
    let catalog = Catalog::open(path).await?;

    println!("Catalog Status");
    println!("==============");
    println!("Path: {:?}", catalog.root);
    println!();

    for name in [AUTHORS, BOOKS] {
        let collection = catalog.collection(name);
        if collection.exists() {
            println!("{}: {} document(s)", name, collection.count().await?);
        } else {
            println!("{}: not initialized", name);
        }
    }

    Ok(())
}

async fn list_collections(path: &PathBuf) -> anyhow::Result<()> {
    let catalog = Catalog::open(path).await?;

    println!("Collections:");
    for schema in catalog.schemas() {
        let collection = catalog.collection(&schema.name);
        let count = if collection.exists() {
            collection.count().await?
        } else {
            0
        };
        println!("  {} ({} documents)", schema.name, count);
    }

    Ok(())
}
