mod atlas;
mod attestation;
mod audit;
mod color;
mod error;
mod history;
mod lineage;
mod loader;
mod regions;
mod resolver;
mod state;
mod year;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use atlas::Atlas;
use attestation::AttestationCache;
use color::Emphasis;
use state::{Action, AppState};

const BAR_WIDTH: usize = 60;

#[derive(Parser)]
#[command(
    name = "bahasejarah",
    about = "Historical language map of the Indonesian archipelago"
)]
struct Cli {
    /// Directory holding regionTimeline.json and languageDefinitions*.json
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Languages active in a region at a year, after fallback
    Resolve {
        region: String,
        /// Year, e.g. "800", "-200", "200 BC"
        #[arg(allow_hyphen_values = true)]
        year: String,
    },
    /// Derived color of a language at a year
    Color {
        language: String,
        #[arg(allow_hyphen_values = true)]
        year: String,
        /// Render as the focused language
        #[arg(long, conflicts_with = "opacity")]
        selected: bool,
        /// Explicit alpha between 0 and 1
        #[arg(long)]
        opacity: Option<f64>,
    },
    /// Fill of every map region at a year
    Map {
        #[arg(allow_hyphen_values = true)]
        year: String,
        /// Highlight only the regions where this language is active
        #[arg(long)]
        select: Option<String>,
    },
    /// Every language a region has seen, as a text chart
    History {
        region: String,
        #[arg(allow_hyphen_values = true)]
        year: String,
        /// Print JSON instead of the chart
        #[arg(long)]
        json: bool,
    },
    /// Hover an SVG map group at a year and open its history panel
    Hover {
        /// SVG group id, e.g. "Jawa-Barat"
        svg_id: String,
        #[arg(allow_hyphen_values = true)]
        year: String,
    },
    /// Definition, lineage and timeline appearances of a language
    Language { id: String },
    /// Check the datasets against each other and the map
    Audit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let root = loader::data_root(cli.data);
    info!(root = %root.display(), "loading datasets");
    let atlas = loader::load_atlas(&root, &mut AttestationCache::new());

    match cli.command {
        Command::Resolve { region, year } => run_resolve(&atlas, &region, parse_year_arg(&year)?),
        Command::Color {
            language,
            year,
            selected,
            opacity,
        } => {
            let emphasis = match (selected, opacity) {
                (true, _) => Emphasis::Selected,
                (false, Some(alpha)) => Emphasis::Opacity(alpha),
                (false, None) => Emphasis::Overlay,
            };
            run_color(&atlas, &language, parse_year_arg(&year)?, emphasis)
        }
        Command::Map { year, select } => run_map(&atlas, parse_year_arg(&year)?, select.as_deref()),
        Command::History { region, year, json } => {
            run_history(&atlas, &region, parse_year_arg(&year)?, json)
        }
        Command::Hover { svg_id, year } => run_hover(&atlas, &svg_id, parse_year_arg(&year)?),
        Command::Language { id } => run_language(&atlas, &id),
        Command::Audit => run_audit(&atlas),
    }
}

fn parse_year_arg(raw: &str) -> Result<i32> {
    year::parse_year(raw).ok_or_else(|| anyhow!("not a year: {raw:?} (try 800, -200, \"200 BC\")"))
}

fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  RESOLVE / COLOR / MAP
// ═══════════════════════════════════════════════════════════════════════

fn run_resolve(atlas: &Atlas, region: &str, year: i32) -> Result<()> {
    let set = atlas.resolve(region, year);
    info!(
        region,
        year = %year::format_year(year),
        tier = ?set.tier,
        active = set.intervals.len(),
        "resolved"
    );

    #[derive(serde::Serialize)]
    struct ResolveResult<'a> {
        region: &'a str,
        year: i32,
        #[serde(flatten)]
        set: &'a resolver::ActiveSet<'a>,
        #[serde(skip_serializing_if = "Option::is_none")]
        dominant: Option<&'a str>,
    }

    print_json(&ResolveResult {
        region,
        year,
        set: &set,
        dominant: set.dominant().map(|iv| iv.language_id.as_str()),
    })
}

fn run_color(atlas: &Atlas, language: &str, year: i32, emphasis: Emphasis) -> Result<()> {
    if atlas.definition(language).is_none() {
        info!(language, "no definition, color falls back to neutral");
    }
    let hsla = atlas.color_for(language, year, emphasis);

    #[derive(serde::Serialize)]
    struct ColorResult<'a> {
        language: &'a str,
        year: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        first_attested: Option<i32>,
        css: String,
        #[serde(flatten)]
        channels: color::Hsla,
    }

    print_json(&ColorResult {
        language,
        year,
        first_attested: atlas.first_seen().get(language),
        css: hsla.to_string(),
        channels: hsla,
    })
}

fn run_map(atlas: &Atlas, year: i32, selected: Option<&str>) -> Result<()> {
    let fills = regions::paint_map(atlas, year, selected);
    let colored = fills.iter().filter(|f| f.language_id.is_some()).count();
    info!(
        year = %year::format_year(year),
        colored,
        total = fills.len(),
        "painted map"
    );
    print_json(&fills)
}

// ═══════════════════════════════════════════════════════════════════════
//  HISTORY: render a region's languages as bars on the year axis
// ═══════════════════════════════════════════════════════════════════════

fn run_history(atlas: &Atlas, region: &str, year: i32, json: bool) -> Result<()> {
    let chart = history::region_history(atlas, region, year);
    if json {
        return print_json(&chart);
    }
    if chart.segments.is_empty() {
        bail!("no history recorded for region '{region}'");
    }

    println!("{} @ {}", region, year::format_year(year));
    let label_width = chart
        .segments
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    for seg in &chart.segments {
        let end = seg
            .end_year
            .map(year::format_year)
            .unwrap_or_else(|| "present".to_string());
        println!(
            "  {:<label_width$} |{}| {} – {}{}",
            seg.label,
            render_bar(seg.left_percent, seg.width_percent),
            year::format_year(seg.start_year),
            end,
            if seg.active { "  ◀" } else { "" },
        );
    }

    let axis: Vec<String> = history::axis_ticks().into_iter().map(|t| t.label).collect();
    println!("  {:<label_width$}  {}", "", axis.join(" · "));
    Ok(())
}

/// Draw `width` percent of a bar starting `left` percent from the edge.
fn render_bar(left: f64, width: f64) -> String {
    let scale = BAR_WIDTH as f64 / 100.0;
    let start = ((left * scale).round() as usize).min(BAR_WIDTH - 1);
    let len = ((width * scale).round() as usize).clamp(1, BAR_WIDTH - start);
    format!(
        "{}{}{}",
        " ".repeat(start),
        "█".repeat(len),
        " ".repeat(BAR_WIDTH - start - len)
    )
}

// ═══════════════════════════════════════════════════════════════════════
//  HOVER: drive the app state the way the map does
// ═══════════════════════════════════════════════════════════════════════

fn run_hover(atlas: &Atlas, svg_id: &str, year: i32) -> Result<()> {
    let region_id = regions::data_region(svg_id)
        .with_context(|| format!("'{svg_id}' is not a map region"))?;

    let state = [
        Action::SetYear(year),
        Action::HoverRegion {
            region_id: region_id.to_string(),
            region_name: regions::display_name(svg_id),
        },
        Action::ClickRegion,
    ]
    .into_iter()
    .fold(AppState::default(), |state, action| state.reduce(atlas, action));

    if state.hover.is_none() {
        info!(svg_id, region_id, "nothing displayable at this year");
    }
    print_json(&state)
}

// ═══════════════════════════════════════════════════════════════════════
//  LANGUAGE / AUDIT
// ═══════════════════════════════════════════════════════════════════════

fn run_language(atlas: &Atlas, id: &str) -> Result<()> {
    let definitions = atlas
        .languages()
        .context("language definitions are not loaded")?;
    let Some(definition) = definitions.get(id) else {
        bail!("unknown language id '{id}'");
    };

    #[derive(serde::Serialize)]
    struct Appearance<'a> {
        region: &'a str,
        #[serde(flatten)]
        interval: &'a lang_types::OccupancyInterval,
    }

    #[derive(serde::Serialize)]
    struct LanguageResult<'a> {
        id: &'a str,
        #[serde(flatten)]
        definition: &'a lang_types::LanguageDefinition,
        #[serde(skip_serializing_if = "Option::is_none")]
        first_attested: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lineage: Option<lineage::Lineage>,
        appearances: Vec<Appearance<'a>>,
    }

    let appearances = lineage::appearances(atlas.timeline(), id)
        .into_iter()
        .map(|(region, interval)| Appearance { region, interval })
        .collect();

    print_json(&LanguageResult {
        id,
        definition,
        first_attested: atlas.first_seen().get(id),
        lineage: lineage::lineage(definitions, id),
        appearances,
    })
}

fn run_audit(atlas: &Atlas) -> Result<()> {
    let report = audit::audit(atlas);
    for finding in &report.findings {
        println!("{finding}");
    }
    info!(
        errors = report.errors(),
        warnings = report.warnings(),
        "audit finished"
    );
    if !report.passed() {
        bail!("audit failed with {} error(s)", report.errors());
    }
    Ok(())
}
