//! quote-calc - CLI tool to price sign and advertising jobs from a catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quote_core::store::{search, sort_quotes, total_revenue};
use quote_core::validation::parse_area;
use quote_core::{
    compose_quote, load_catalog, render_quote_sheet, CatalogIndex, ClientInfo, JsonFileStore,
    PricingConfig, QuoteRequest, QuoteStore, SavedQuote, SortBy,
};

/// Price sign and advertising jobs from a service catalog.
#[derive(Parser, Debug)]
#[command(name = "quote-calc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Service catalog file (`;`-separated)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON file overriding unit prices and tax rate
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Saved quote history file
    #[arg(long, global = true, default_value = "quotes.json")]
    store: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List service types
    Types,

    /// List categories for a service type
    Categories {
        /// Service type
        #[arg(long = "type")]
        service_type: String,
    },

    /// List thickness options for a service type and category
    Options {
        /// Service type
        #[arg(long = "type")]
        service_type: String,

        /// Category
        #[arg(long)]
        category: String,
    },

    /// Compute a quote
    Quote(QuoteArgs),

    /// List saved quotes
    History {
        /// Filter by client, company, service type or category
        #[arg(long)]
        search: Option<String>,

        /// Ordering
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
    },

    /// Print a saved quote
    Show {
        /// Quote id
        #[arg(long)]
        id: String,
    },

    /// Delete a saved quote
    Delete {
        /// Quote id
        #[arg(long)]
        id: String,
    },
}

#[derive(clap::Args, Debug)]
struct QuoteArgs {
    /// Service type
    #[arg(long = "type")]
    service_type: String,

    /// Category
    #[arg(long)]
    category: String,

    /// Thickness option index (see `options`)
    #[arg(long)]
    option: Option<usize>,

    /// Area in ft² (comma decimals accepted)
    #[arg(long)]
    area: String,

    /// LED module count, instead of one per ft²
    #[arg(long)]
    led_units: Option<u32>,

    /// Add the custom color surcharge (cut letters only)
    #[arg(long)]
    custom_color: bool,

    /// Add installation at this flat cost
    #[arg(long)]
    installation: Option<f64>,

    /// Discount percentage
    #[arg(long, default_value = "0")]
    discount: f64,

    /// Apply tax
    #[arg(long)]
    tax: bool,

    /// Client name
    #[arg(long)]
    client_name: Option<String>,

    /// Client company
    #[arg(long)]
    company: Option<String>,

    /// Client email
    #[arg(long)]
    email: Option<String>,

    /// Client phone
    #[arg(long)]
    phone: Option<String>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,

    /// Save the quote to the history
    #[arg(long)]
    save: bool,

    /// Print the quote as JSON instead of a sheet
    #[arg(long)]
    json: bool,

    /// Also write the sheet to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    Date,
    Total,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortBy::Date,
            SortArg::Total => SortBy::Total,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Types => {
            let catalog = open_catalog(args.catalog.as_deref())?;
            for service_type in catalog.service_types() {
                println!("{}", service_type);
            }
        }
        Command::Categories { service_type } => {
            let catalog = open_catalog(args.catalog.as_deref())?;
            for category in catalog.categories(&service_type) {
                println!("{}", category);
            }
        }
        Command::Options {
            service_type,
            category,
        } => {
            let catalog = open_catalog(args.catalog.as_deref())?;
            for (idx, variant) in catalog.options(&service_type, &category).iter().enumerate() {
                println!(
                    "[{}] {} ({}/ft²)",
                    idx,
                    variant.display_label(),
                    config.format_currency(variant.schema.rate())
                );
            }
        }
        Command::Quote(quote_args) => {
            let catalog = open_catalog(args.catalog.as_deref())?;
            run_quote(&catalog, &config, &args.store, quote_args)?;
        }
        Command::History { search: term, sort } => {
            let store = JsonFileStore::new(&args.store);
            let quotes = store.load().context("Failed to read quote history")?;
            let mut view = search(&quotes, term.as_deref().unwrap_or(""));
            sort_quotes(&mut view, sort.into());

            for quote in &view {
                println!(
                    "{}  {}  {:<40}  {:>14}",
                    quote.id,
                    quote.created_at.format("%Y-%m-%d"),
                    quote.breakdown.service_label(),
                    config.format_currency(quote.total())
                );
            }
            println!(
                "{} quote(s), total {}",
                view.len(),
                config.format_currency(total_revenue(view.iter().copied()))
            );
        }
        Command::Show { id } => {
            let store = JsonFileStore::new(&args.store);
            let quote = store
                .get(&id)?
                .with_context(|| format!("No saved quote with id {}", id))?;
            print!("{}", render_quote_sheet(&quote, &config));
        }
        Command::Delete { id } => {
            let mut store = JsonFileStore::new(&args.store);
            if !store.remove(&id)? {
                anyhow::bail!("No saved quote with id {}", id);
            }
            info!("Deleted quote {}", id);
        }
    }

    Ok(())
}

fn run_quote(
    catalog: &CatalogIndex,
    config: &PricingConfig,
    store_path: &Path,
    args: QuoteArgs,
) -> Result<()> {
    let area = parse_area(&args.area)?;
    let variant = catalog.select(&args.service_type, &args.category, args.option)?;

    let mut request = QuoteRequest::new(area).with_discount(args.discount);
    if let Some(units) = args.led_units {
        request = request.with_led_units(units);
    }
    if args.custom_color {
        request = request.with_custom_color();
    }
    if let Some(cost) = args.installation {
        request = request.with_installation(cost);
    }
    if args.tax {
        request = request.with_tax();
    }

    if args.custom_color && !variant.is_cut_letters() {
        warn!("Custom color only applies to cut letters; ignoring");
    }

    let breakdown = compose_quote(Some(variant), &request, config)?;
    let client = args.client_name.map(|name| ClientInfo {
        name,
        company: args.company,
        email: args.email,
        phone: args.phone,
    });
    let quote = SavedQuote::new(breakdown, client, args.notes);
    let sheet = render_quote_sheet(&quote, config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print!("{}", sheet);
    }

    if let Some(path) = &args.output {
        std::fs::write(path, &sheet)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Generated: {}", path.display());
    }

    if args.save {
        let mut store = JsonFileStore::new(store_path);
        store.append(quote).context("Failed to save quote")?;
    }

    Ok(())
}

fn open_catalog(path: Option<&Path>) -> Result<CatalogIndex> {
    let path = path.context("--catalog is required for this command")?;
    info!("Loading catalog: {}", path.display());

    let catalog =
        load_catalog(path).with_context(|| format!("Failed to load {}", path.display()))?;
    if catalog.is_empty() {
        anyhow::bail!("Catalog {} has no usable rows", path.display());
    }
    Ok(catalog)
}

fn load_config(path: Option<&Path>) -> Result<PricingConfig> {
    let Some(path) = path else {
        return Ok(PricingConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PricingConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const CATALOG: &str = "\
TIPO;CATEGORIA;BASE;ESPESOR;DESC;PIE2;TOTAL PIE2;CONDICIONAL;MINIMO;INSTALACION
LETRAS RECORTADAS;PVC;$3,70;3MM;PVC;$11,30;;SI ES ≤ A 3 PIE2 REDONDEAR A 50;N/A;NO
VINIL;IMPRESO;;N/A;MATE;;$6,00;N/A;N/A;NO
";

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_quote_args_parse() {
        let args = parse(&[
            "quote-calc",
            "quote",
            "--catalog",
            "c.csv",
            "--type",
            "VINIL",
            "--category",
            "IMPRESO",
            "--area",
            "2,5",
            "--tax",
        ]);
        assert_eq!(args.catalog, Some(PathBuf::from("c.csv")));
        assert_eq!(args.store, PathBuf::from("quotes.json"));
        match args.command {
            Command::Quote(quote) => {
                assert_eq!(quote.area, "2,5");
                assert!(quote.tax);
                assert_eq!(quote.discount, 0.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_history_sort_arg() {
        let args = parse(&["quote-calc", "history", "--sort", "total"]);
        match args.command {
            Command::History { sort, search } => {
                assert_eq!(SortBy::from(sort), SortBy::Total);
                assert!(search.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_quote_saves_and_writes_sheet() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.csv");
        let store = dir.path().join("quotes.json");
        let sheet = dir.path().join("quote.txt");
        std::fs::write(&catalog, CATALOG).unwrap();

        let args = parse(&[
            "quote-calc",
            "--catalog",
            catalog.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
            "quote",
            "--type",
            "LETRAS RECORTADAS",
            "--category",
            "PVC",
            "--area",
            "2",
            "--client-name",
            "Ana",
            "--save",
            "--output",
            sheet.to_str().unwrap(),
        ]);
        run(args).unwrap();

        let saved = JsonFileStore::new(&store).load().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].total(), 50.0);
        assert_eq!(
            saved[0].client.as_ref().map(|c| c.name.as_str()),
            Some("Ana")
        );
        assert!(std::fs::read_to_string(&sheet)
            .unwrap()
            .contains("Subtotal (minimum charge)"));
    }

    #[test]
    fn test_quote_below_zero_area_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.csv");
        std::fs::write(&catalog, CATALOG).unwrap();

        let args = parse(&[
            "quote-calc",
            "--catalog",
            catalog.to_str().unwrap(),
            "quote",
            "--type",
            "VINIL",
            "--category",
            "IMPRESO",
            "--area",
            "abc",
        ]);
        assert!(run(args).is_err());
    }

    #[test]
    fn test_catalog_required_for_catalog_commands() {
        let err = run(parse(&["quote-calc", "types"])).unwrap_err();
        assert!(err.to_string().contains("--catalog"));
    }

    #[test]
    fn test_delete_unknown_id() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("quotes.json");
        let args = parse(&[
            "quote-calc",
            "--store",
            store.to_str().unwrap(),
            "delete",
            "--id",
            "nope",
        ]);
        assert!(run(args).is_err());
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricing.json");
        std::fs::write(&path, r#"{ "tax_rate": 0.1 }"#).unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.tax_rate, 0.1);
        assert_eq!(load_config(None).unwrap(), PricingConfig::default());
    }

    #[test]
    fn test_config_file_with_zero_coverage_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricing.json");
        std::fs::write(&path, r#"{ "transformer_coverage": 0 }"#).unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(format!("{:#}", err).contains("transformer_coverage"));
    }
}
