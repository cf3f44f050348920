use clap::Parser;
use std::collections::BTreeMap;
use std::error::Error;
use web_link_extractor::{Extractor, ExtractorConfig, PageLinks};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };
    let config = args.apply_overrides(config);

    // An unreadable input aborts before anything is fetched or printed
    let extractor = Extractor::from_file(&args.input)?.with_config(config);

    ::log::info!("Extracting links from URLs in {}", args.input.display());

    let start_time = std::time::Instant::now();
    let mut extraction = extractor.start().await?;

    if !args.json {
        while let Some(page) = extraction.pages.recv().await {
            print_page(&page);
        }
    }

    let report = extraction.finish().await?;

    if args.json {
        let sorted = report.results.iter().collect::<BTreeMap<_, _>>();
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    }

    ::log::info!(
        "Extraction complete - {} pages in {:.2} seconds ({} failed, {} evicted)",
        report.results.len(),
        start_time.elapsed().as_secs_f64(),
        report.stats.failed,
        report.stats.evicted
    );

    Ok(())
}

fn print_page(page: &PageLinks) {
    println!("{} {:?}", page.url, page.links);
}
