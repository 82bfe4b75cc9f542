//! riskmatrix CLI - command-line interface for hazard risk assessment

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output (timestamps aside)

use anyhow::Context;
use clap::{Parser, Subcommand};
use riskmatrix_core::config::{self, ReportFormat, ResolvedConfig};
use riskmatrix_core::report::{self, render_json, ReportOptions};
use riskmatrix_core::{ahp, tram};
use riskmatrix_core::{Method, ScaleFamily, Selection, Worksheet};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "riskmatrix")]
#[command(about = "Mine hazard risk assessment using the DGMS and TRAM methods")]
struct Cli {
    /// Path to a JSON config file (default: discover in working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the consequence, exposure and probability scales
    Scales {
        #[arg(long)]
        method: Option<MethodArg>,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// List hazard categories, or the hazards of one category
    Hazards {
        #[arg(long)]
        method: Option<MethodArg>,

        /// Category name (exact, case-sensitive)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive substring filter on hazard names
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Score one selection without recording it
    Score {
        #[arg(long)]
        method: Option<MethodArg>,

        /// Hazard category (selects the TRAM category weight)
        #[arg(long)]
        category: String,

        #[arg(long)]
        consequence: Option<String>,

        #[arg(long)]
        exposure: Option<String>,

        #[arg(long)]
        probability: Option<String>,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Sample the TRAM triangular membership functions of one scale
    Membership {
        #[arg(long, default_value = "consequence")]
        family: FamilyArg,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Show TRAM category weights and the AHP pairwise analysis
    Weights {
        /// Use weights derived from the AHP matrix instead of configured ones
        #[arg(long)]
        ahp: bool,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Run a worksheet of assessments and print the report
    Assess {
        /// Path to worksheet JSON
        worksheet: PathBuf,

        #[arg(long)]
        method: Option<MethodArg>,

        /// Report view (default: grouped for DGMS, ranked for TRAM)
        #[arg(long)]
        view: Option<ReportView>,

        #[arg(long)]
        format: Option<OutputFormat>,

        /// Show only top N rows (per category for grouped view)
        #[arg(long)]
        top: Option<usize>,

        /// Minimum score threshold
        #[arg(long)]
        min_score: Option<f64>,

        /// Fail if any worksheet entry is rejected
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MethodArg {
    Dgms,
    Tram,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FamilyArg {
    Consequence,
    Exposure,
    Probability,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ReportView {
    Grouped,
    Ranked,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Dgms => Method::Dgms,
            MethodArg::Tram => Method::Tram,
        }
    }
}

impl From<FamilyArg> for ScaleFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Consequence => ScaleFamily::Consequence,
            FamilyArg::Exposure => ScaleFamily::Exposure,
            FamilyArg::Probability => ScaleFamily::Probability,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, cli.config.as_deref())?;
    if let Some(path) = &resolved.config_path {
        tracing::info!(path = %path.display(), "using config");
    }

    match cli.command {
        Commands::Scales { method, format } => {
            let method = pick_method(method, &resolved);
            let table = method.scales();
            match pick_format(format, &resolved) {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "method": method,
                        "consequence": table.consequence,
                        "exposure": table.exposure,
                        "probability": table.probability,
                    });
                    println!("{}", render_json(&value));
                }
                OutputFormat::Text => {
                    for family in ScaleFamily::ALL {
                        println!("{} ({})", family, method);
                        for level in table.levels_of(family) {
                            let fuzzy = level
                                .fuzzy
                                .map(|t| format!("  fuzzy {}", t))
                                .unwrap_or_default();
                            println!(
                                "  {:<32} {:>8}  {}{}",
                                level.label, level.weight, level.description, fuzzy
                            );
                        }
                    }
                }
            }
        }
        Commands::Hazards {
            method,
            category,
            search,
            format,
        } => {
            let method = pick_method(method, &resolved);
            let session = resolved.new_session(method)?;
            let catalog = session.catalog();
            let format = pick_format(format, &resolved);

            match category {
                None => {
                    let listing: Vec<(String, usize)> = catalog
                        .categories()
                        .iter()
                        .map(|c| (c.as_str().to_string(), catalog.hazards_in(*c).len()))
                        .collect();
                    match format {
                        OutputFormat::Json => println!("{}", render_json(&listing)),
                        OutputFormat::Text => {
                            for (name, count) in listing {
                                println!("{} ({} hazards)", name, count);
                            }
                        }
                    }
                }
                Some(name) => {
                    // Fail loudly here; the catalog itself answers unknown names with an empty list
                    session.category(&name)?;
                    let hazards = catalog.search(&name, search.as_deref().unwrap_or(""));
                    match format {
                        OutputFormat::Json => println!("{}", render_json(&hazards)),
                        OutputFormat::Text => {
                            for hazard in hazards {
                                println!("{}", hazard);
                            }
                        }
                    }
                }
            }
        }
        Commands::Score {
            method,
            category,
            consequence,
            exposure,
            probability,
            format,
        } => {
            let method = pick_method(method, &resolved);
            let session = resolved.new_session(method)?;
            let category = session.category(&category)?;
            let selection = Selection::from_parts(
                consequence.as_deref(),
                exposure.as_deref(),
                probability.as_deref(),
            )?;
            let card = session.preview(category, &selection)?;

            match pick_format(format, &resolved) {
                OutputFormat::Json => println!("{}", render_json(&card)),
                OutputFormat::Text => match method {
                    Method::Dgms => {
                        println!("Risk score: {:.4}", card.score);
                        println!("Risk level: {}", card.risk_level);
                    }
                    Method::Tram => {
                        println!("Fuzzy score: {:.3}", card.score);
                        if let Some(weight) = card.category_weight {
                            println!("Category weight: {:.2}", weight);
                        }
                        if let Some(vikor) = card.vikor_score {
                            println!("VIKOR score: {:.3}", vikor);
                        }
                        println!("Risk level: {}", card.risk_level);
                    }
                },
            }
        }
        Commands::Membership { family, format } => {
            let curve = tram::membership_curve(family.into());
            match pick_format(format, &resolved) {
                OutputFormat::Json => println!("{}", render_json(&curve)),
                OutputFormat::Text => print!("{}", report::render_membership_text(&curve)),
            }
        }
        Commands::Weights { ahp: use_ahp, format } => {
            let weights = if use_ahp {
                ahp::suggested_weights()
            } else {
                resolved.weights.clone()
            };
            let analysis = ahp::analyze(&ahp::TRAM_PAIRWISE);
            let listing: Vec<(String, f64)> = weights
                .iter()
                .map(|(c, w)| (c.as_str().to_string(), w))
                .collect();

            match pick_format(format, &resolved) {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "weights": listing,
                        "total": weights.total(),
                        "ahp": analysis,
                    });
                    println!("{}", render_json(&value));
                }
                OutputFormat::Text => {
                    println!("{:<20} {:>6} {:>10}", "CATEGORY", "WEIGHT", "AHP");
                    for ((name, weight), (_, priority)) in
                        listing.iter().zip(analysis.priorities.iter())
                    {
                        println!("{:<20} {:>6.2} {:>10.4}", name, weight, priority);
                    }
                    println!("{:<20} {:>6.2}", "Total", weights.total());
                    println!(
                        "\nConsistency ratio: {:.4} ({})",
                        analysis.consistency_ratio,
                        if analysis.is_consistent() {
                            "acceptable"
                        } else {
                            "inconsistent"
                        }
                    );
                }
            }
        }
        Commands::Assess {
            worksheet,
            method,
            view,
            format,
            top,
            min_score,
            strict,
        } => {
            let sheet = Worksheet::load(&worksheet)?;
            let method = method
                .map(Method::from)
                .or(sheet.method)
                .unwrap_or(resolved.method);
            if let Some(declared) = sheet.method {
                if declared != method {
                    anyhow::bail!(
                        "worksheet is for {} but {} was requested",
                        declared,
                        method
                    );
                }
            }

            let mut session = resolved.new_session(method)?;
            let outcome = sheet
                .apply(&mut session)
                .with_context(|| format!("failed to apply worksheet: {}", worksheet.display()))?;

            for rejection in &outcome.rejected {
                eprintln!(
                    "Entry {} ({}) not added: {}",
                    rejection.index, rejection.hazard, rejection.error
                );
            }
            if strict && !outcome.rejected.is_empty() {
                anyhow::bail!("{} worksheet entries rejected", outcome.rejected.len());
            }

            config::validate_report_filters(top, min_score)?;
            let options = ReportOptions {
                min_score: min_score.or(resolved.min_score),
                top_n: top.or(resolved.top_n),
            };
            let view = view.unwrap_or(match method {
                Method::Dgms => ReportView::Grouped,
                Method::Tram => ReportView::Ranked,
            });
            let rows = match view {
                ReportView::Grouped => report::grouped_rows(session.ledger(), options),
                ReportView::Ranked => report::ranked_rows(session.ledger(), options),
            };

            match pick_format(format, &resolved) {
                OutputFormat::Json => println!("{}", render_json(&rows)),
                OutputFormat::Text => {
                    println!(
                        "{} assessment results ({} hazards)\n",
                        method,
                        session.ledger().len()
                    );
                    match view {
                        ReportView::Grouped => print!("{}", report::render_grouped_text(&rows)),
                        ReportView::Ranked => print!("{}", report::render_ranked_text(&rows)),
                    }
                }
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `RISKMATRIX_LOG` (default: warn)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("RISKMATRIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn pick_method(arg: Option<MethodArg>, resolved: &ResolvedConfig) -> Method {
    arg.map(Method::from).unwrap_or(resolved.method)
}

fn pick_format(arg: Option<OutputFormat>, resolved: &ResolvedConfig) -> OutputFormat {
    arg.unwrap_or(match resolved.format {
        ReportFormat::Text => OutputFormat::Text,
        ReportFormat::Json => OutputFormat::Json,
    })
}
