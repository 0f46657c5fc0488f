//! # Exam Paper Search CLI
//!
//! ## Purpose
//! Command-line entry point: loads configuration and resources, runs one
//! search, prints the ordered result list with derived download filenames,
//! and persists the search inputs for the next session.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Read the persisted last search (used when inputs are omitted)
//! 4. Load corpus and department mapping, build the search engine
//! 5. Run the search, print results, save the inputs on success

use clap::{Arg, ArgAction, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use exam_paper_search::{
    Config, LastSearchStore, Result, SearchEngine, SearchQuery, SearchStatus,
};
use exam_paper_search::utils::strip_pdf_extension;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("paper-search")
        .version("0.1.0")
        .about("Fuzzy subject and department search over an exam paper archive")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .value_name("TEXT")
                .help("Free-text subject query (fuzzy matched)"),
        )
        .arg(
            Arg::new("department")
                .short('d')
                .long("department")
                .value_name("TEXT")
                .help("Department name, code, or alias"),
        )
        .arg(
            Arg::new("no-last-search")
                .long("no-last-search")
                .help("Ignore the persisted last search when inputs are omitted")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").expect("has default");
    let config = Config::from_file(config_path)?;

    init_logging(&config);
    info!("Starting exam paper search");
    println!("{}", SearchStatus::Loading);

    let store = LastSearchStore::open(&config.storage.state_db_path).await?;

    // CLI inputs win; omitted inputs fall back to the persisted last search.
    let last = if matches.get_flag("no-last-search") {
        None
    } else {
        store.load()?
    };
    let subject = matches
        .get_one::<String>("subject")
        .cloned()
        .or_else(|| last.as_ref().map(|l| l.subject.clone()))
        .unwrap_or_default();
    let department = matches
        .get_one::<String>("department")
        .cloned()
        .or_else(|| last.as_ref().map(|l| l.department.clone()))
        .unwrap_or_default();

    let engine = match SearchEngine::new(&config).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("{} ({})", e, e.category());
            println!("{}", SearchStatus::LoadFailed);
            return Err(e);
        }
    };
    println!("{}", SearchStatus::Ready);

    let query = SearchQuery {
        subject: subject.clone(),
        department: department.clone(),
    };
    let mut results = engine.search(&query);
    if config.search.max_results > 0 {
        results.truncate(config.search.max_results);
    }

    if results.is_empty() {
        println!("{}", SearchStatus::NoMatches);
        println!("Please try different keywords or fewer filters.");
        return Ok(());
    }

    println!("Found {} papers.", results.len());
    for (index, result) in results.iter().enumerate() {
        let subject_name = strip_pdf_extension(&result.entry.original_filename);
        println!(
            "{}. Year: {}, Semester: {}, Dept: {}, Subject: {}",
            index + 1,
            result.year,
            result.semester,
            result.department_display,
            subject_name
        );
        println!("   URL:  {}", result.entry.url);
        println!("   Save: {}", result.download_filename());
    }

    store.save(&subject, &department)?;
    Ok(())
}

/// Initialize logging and tracing from the configuration.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}
