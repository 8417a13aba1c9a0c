// catalog-audit: checks the public pages behind published product selections
//
// Logs into the DMS console, walks each requested brand's Product Selections
// listing and writes a slug report per brand.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use catalog_audit::{
    AuditConfig, BrandTarget, ConsoleSession, ValidationReport, launch_browser, load_brands,
    save_report, validate_listed_products,
};
use catalog_audit::utils::DEFAULT_CONSOLE_URL;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "catalog-audit", version, about = "Audit published product selection pages")]
struct Cli {
    #[arg(long, help = "Admin console base URL [default: staging DMS console]")]
    console_url: Option<String>,

    #[arg(long, default_value = "reports", help = "Directory for reports and screenshots")]
    report_dir: PathBuf,

    #[arg(long, help = "Maximum products checked per brand")]
    limit: Option<usize>,

    #[arg(long = "brand", value_name = "NAME=SLUG", help = "Brand to audit (repeatable)")]
    brands: Vec<BrandTarget>,

    #[arg(long, help = "JSON file with a list of {\"name\", \"slug\"} brands")]
    brands_file: Option<PathBuf>,

    #[arg(long, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Show the browser window")]
    headed: bool,

    #[arg(long, help = "Also treat HTTP status >= 400 as broken")]
    status_check: bool,

    #[arg(long, env = "CATALOG_AUDIT_USERNAME", hide_env_values = true)]
    username: String,

    #[arg(long, env = "CATALOG_AUDIT_PASSWORD", hide_env_values = true)]
    password: String,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,chromiumoxide::handler=off,chromiumoxide::conn=off")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}

async fn build_config(cli: &Cli) -> Result<AuditConfig> {
    let base = match &cli.config {
        Some(path) => AuditConfig::from_json_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AuditConfig::default(),
    };

    let console_url = cli
        .console_url
        .clone()
        .or_else(|| (!base.console_url().is_empty()).then(|| base.console_url().to_string()))
        .unwrap_or_else(|| DEFAULT_CONSOLE_URL.to_string());
    let limit = cli.limit.unwrap_or(base.limit());
    let headless = base.headless() && !cli.headed;
    let status_check = base.status_check() || cli.status_check;

    let config = base
        .into_builder()
        .console_url(console_url)
        .report_dir(cli.report_dir.clone())
        .limit(limit)
        .headless(headless)
        .status_check(status_check)
        .build()?;
    Ok(config)
}

async fn collect_brands(cli: &Cli) -> Result<Vec<BrandTarget>> {
    let mut brands = cli.brands.clone();
    if let Some(path) = &cli.brands_file {
        brands.extend(
            load_brands(path)
                .await
                .with_context(|| format!("Failed to load brands from {}", path.display()))?,
        );
    }
    if brands.is_empty() {
        bail!("no brands given; use --brand NAME=SLUG or --brands-file");
    }
    Ok(brands)
}

/// Run every brand in order. Returns the reports and the number of brands
/// that could not be audited.
async fn run(cli: &Cli, config: &AuditConfig, brands: &[BrandTarget]) -> Result<(Vec<ValidationReport>, usize)> {
    let browser = launch_browser(config).await?;
    let page = browser
        .browser()
        .new_page("about:blank")
        .await
        .context("Failed to open console tab")?;

    let session = ConsoleSession::new(page, config);
    let result = audit_brands(&session, &browser, cli, config, brands).await;

    if let Err(e) = browser.shutdown().await {
        warn!("Browser shutdown failed: {e:#}");
    }
    result
}

async fn audit_brands(
    session: &ConsoleSession<'_>,
    browser: &catalog_audit::AuditBrowser,
    cli: &Cli,
    config: &AuditConfig,
    brands: &[BrandTarget],
) -> Result<(Vec<ValidationReport>, usize)> {
    session
        .login(&cli.username, &cli.password)
        .await
        .context("Console login failed")?;

    let surface = session.catalog_surface(browser.browser());
    let mut reports = Vec::with_capacity(brands.len());
    let mut failed = 0;

    for brand in brands {
        info!("==================== {} ====================", brand.name.to_uppercase());

        let outcome = async {
            let mut context = session.open_brand(brand).await?;
            validate_listed_products(&surface, &mut context, config.limit(), config).await
        }
        .await;

        match outcome {
            Ok(report) => {
                match save_report(&report, config.report_dir()).await {
                    Ok(saved) => info!("JSON report: {}", saved.json_path.display()),
                    Err(e) => error!("Could not save report for {}: {e}", brand.slug),
                }
                reports.push(report);
            }
            Err(e) if e.is_brand_fatal() => {
                warn!("Brand {} skipped: {e}", brand.name);
                failed += 1;
            }
            Err(e) => {
                error!("Brand {} failed: {e}", brand.name);
                failed += 1;
            }
        }

        catalog_audit::utils::settle(config.navigation_settle()).await;
    }

    Ok((reports, failed))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match build_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let brands = match collect_brands(&cli).await {
        Ok(brands) => brands,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let (reports, failed) = match run(&cli, &config, &brands).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let broken: usize = reports.iter().map(|r| r.summary().broken).sum();
    info!(
        "All brand checks completed: {} audited, {failed} failed, {broken} broken pages",
        reports.len()
    );

    if broken > 0 {
        ExitCode::from(2)
    } else if failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
