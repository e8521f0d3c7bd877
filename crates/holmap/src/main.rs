//! `holmap`: load a GeoJSON map, print its navigation tree and walk the
//! timeline from the command line.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use holmap::{HolMap, HolMapConfig, TracingRenderer};
use holmap_core::models::StartupQuery;
use holmap_core::observability::init_tracing;
use holmap_store::FileSource;
use holmap_timeline::{drive_playback, ManualScheduler, Step};

#[derive(Parser, Debug)]
#[command(name = "holmap", version, about)]
struct Args {
    /// GeoJSON FeatureCollection to load.
    file: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Startup query string, e.g. `taxonomy=byEra&featIds=fort`.
    #[arg(long)]
    query: Option<String>,

    /// Filter the navigation tree by label before printing.
    #[arg(long)]
    search: Option<String>,

    /// Enable the timeline and step forward this many windows.
    #[arg(long, default_value_t = 0)]
    steps: usize,

    /// Enable the timeline and play it through in real time.
    #[arg(long, default_value_t = false)]
    play: bool,

    /// Print the navigation tree as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<HolMapConfig> {
    let Some(path) = path else {
        return Ok(HolMapConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    HolMapConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn print_tree(map: &HolMap) {
    let display = map.display();
    println!("{}", map.map_title().unwrap_or("(untitled map)"));
    for (index, taxonomy) in display.taxonomies().taxonomies().iter().enumerate() {
        let marker = if display.active_taxonomy() == Some(index) { '*' } else { ' ' };
        println!("{marker} [{index}] {} ({})", taxonomy.name, taxonomy.id);
    }
    for category in &display.nav().categories {
        if category.hidden {
            continue;
        }
        println!("  {:?} {}", category.checkbox, category.name);
        for entry in category.entries.iter().filter(|e| !e.hidden) {
            let check = if entry.checked { 'x' } else { ' ' };
            let sel = if entry.selected { " <" } else { "" };
            println!("    [{check}] {}{sel}", entry.label);
        }
    }
}

fn print_timeline(map: &HolMap) {
    let timeline = map.timeline();
    if let Some(point) = timeline.current_point() {
        let showing: Vec<&str> = timeline
            .last_showing()
            .iter()
            .filter_map(|&f| map.display().store().get(f))
            .map(|f| f.id.as_str())
            .collect();
        println!(
            "timeline [{}/{}] {}: {}",
            timeline.index() + 1,
            timeline.points().len(),
            point.label,
            showing.join(", ")
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    init_tracing(&config.observability);

    let source = FileSource::new(&args.file);
    let mut map = HolMap::load(
        &source,
        config,
        Box::new(TracingRenderer),
        Box::new(ManualScheduler::new()),
    )
    .await
    .with_context(|| format!("loading {}", args.file.display()))?;

    if let Some(query) = &args.query {
        let outcome = map.apply_startup_query(&StartupQuery::parse(query));
        info!(?outcome, "startup query");
        if let Some(doc) = &outcome.doc_path {
            println!("document: {doc}");
        }
    }

    if args.steps > 0 || args.play {
        if !map.timeline().has_timeline() {
            bail!("{} has no timeline", args.file.display());
        }
        map.toggle_timeline(true);
        print_timeline(&map);
        for _ in 0..args.steps {
            if !map.timeline_step(Step::Forward) {
                break;
            }
            print_timeline(&map);
        }
        if args.play && map.timeline_play() {
            let (engine, display) = map.parts_mut();
            let ticks = drive_playback(engine, display).await;
            info!(ticks, "playback finished");
            print_timeline(&map);
        }
    }

    if let Some(query) = &args.search {
        let hits = map.search(query);
        println!("search {query:?}: {hits} match(es)");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(map.display().nav())?);
    } else {
        print_tree(&map);
    }
    Ok(())
}
