use anyhow::{Context, Result};
use clap::Parser;
use snipgen_core::{
    evaluate, Query, SearchProvider, Strategy, StrategyRunner, SynonymProvider,
};
use snipgen_local::search::SearxngSearchProvider;
use snipgen_local::summarize::TextRankSummarizer;
use snipgen_local::thesaurus::{EmptyThesaurus, FileThesaurus};
use snipgen_local::wordvec::WordVectors;
use snipgen_local::{LocalPageProvider, PageFetcher};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

mod report;

#[derive(Parser, Debug)]
#[command(name = "snipgen")]
#[command(
    about = "Synthesize search-result snippets five ways and score them against reference snippets",
    long_about = None
)]
struct Cli {
    /// Query to run. When omitted, one line is read from stdin.
    #[arg(long)]
    query: Option<String>,

    /// Word-embedding table (word2vec text format, optionally .gz).
    #[arg(long, env = "SNIPGEN_VECTORS_PATH")]
    vectors: PathBuf,

    /// Thesaurus file (term<TAB>syn1,syn2,...). Without it, the
    /// synonym-aware strategies reduce to plain term matching.
    #[arg(long, env = "SNIPGEN_THESAURUS_PATH")]
    thesaurus: Option<PathBuf>,

    /// SearXNG endpoint (repeatable). Falls back to
    /// SNIPGEN_SEARXNG_ENDPOINT[S] when omitted.
    #[arg(long)]
    endpoint: Vec<String>,

    /// Reference results to keep (entries without a snippet are skipped).
    #[arg(long, default_value_t = 10)]
    max_results: usize,

    /// Per-URL fetch timeout.
    #[arg(long, default_value_t = 20_000)]
    timeout_ms: u64,

    /// Hard cap on bytes read per page body.
    #[arg(long, default_value_t = 5_000_000)]
    max_bytes: usize,

    /// Also write the report as a JSON artifact.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn read_query_from_stdin() -> Result<String> {
    eprint!("Enter query: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading query from stdin")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let raw_query = match cli.query {
        Some(q) => q,
        None => read_query_from_stdin()?,
    };
    let query = Query::parse(&raw_query)?;

    // Process-wide state with explicit init: the embedding table loads
    // once, before any network traffic, and is passed down by reference.
    eprintln!("loading word vectors from {} ...", cli.vectors.display());
    let vectors = WordVectors::load(&cli.vectors)?;
    eprintln!(
        "loaded {} vectors ({} dimensions)",
        vectors.len(),
        vectors.dim()
    );

    let synonyms: Box<dyn SynonymProvider> = match cli.thesaurus.as_deref() {
        Some(path) => Box::new(FileThesaurus::load(path)?),
        None => {
            eprintln!("no thesaurus configured; synonym strategies reduce to term matching");
            Box::new(EmptyThesaurus)
        }
    };
    let query = query.with_synonyms(synonyms.as_ref());

    let client = reqwest::Client::new();
    let provider = if cli.endpoint.is_empty() {
        SearxngSearchProvider::from_env(client.clone())?
    } else {
        SearxngSearchProvider::new(client.clone(), cli.endpoint.clone())?
    };

    let max_results = cli.max_results.clamp(1, 10);
    let refs = provider.search(&raw_query, max_results).await?;
    if refs.is_empty() {
        eprintln!("no reference results with snippets for this query; nothing to compare");
        return Ok(());
    }
    if refs.len() < max_results {
        eprintln!(
            "retrieval returned {} of {max_results} requested results; continuing with the shorter list",
            refs.len()
        );
    }
    let urls: Vec<String> = refs.iter().map(|r| r.url.clone()).collect();

    let fetcher = PageFetcher::new(Duration::from_millis(cli.timeout_ms), cli.max_bytes)?;
    let pages = LocalPageProvider::new(fetcher);
    let summarizer = TextRankSummarizer;
    let runner = StrategyRunner::new(&pages, &summarizer);

    // All five strategies, fixed order, over the same URL set.
    let mut runs = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        let t0 = std::time::Instant::now();
        let snippets = runner.run(strategy, &query, &urls).await;
        let records = evaluate(&refs, &snippets, &vectors);
        let run = report::StrategyRun {
            strategy,
            warnings: report::StrategyRun::warnings_from(&snippets),
            records,
            elapsed_ms: t0.elapsed().as_millis(),
        };
        print!("{}", report::render_strategy(&run));
        runs.push(run);
    }

    if let Some(out) = cli.out {
        let payload = report::artifact(&raw_query, provider.name(), &runs, report::now_epoch_s());
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(&out, serde_json::to_string_pretty(&payload)? + "\n")
            .with_context(|| format!("writing report to {}", out.display()))?;
        eprintln!("wrote report to {}", out.display());
    }

    Ok(())
}
