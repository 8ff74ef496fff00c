//! VTEX console CLI - credential management, catalog tools, exports and
//! diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Store credentials
//! vtex-cli settings set -a mystore -k vtexappkey-mystore-XXXX -t TOKEN
//!
//! # Browse page 3 of the catalog, show one product
//! vtex-cli products page 3
//! vtex-cli products show 1234
//!
//! # Export page 3, or the whole catalog
//! vtex-cli export page 3
//! vtex-cli export all -o out/
//!
//! # Catalog diagnostic with a stock file
//! vtex-cli diagnose --stock stock.xlsx
//!
//! # Create a product with its SKU, price and stock
//! vtex-cli product create -n "Morral" -d 1 -c 10 -r MOR-1 --price 149.90 --quantity 20
//!
//! # Update price and stock of a SKU
//! vtex-cli price set 1234 149.90
//! vtex-cli inventory set 1234 25
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vtex_console_admin::settings::SettingsStore;

mod commands;

#[derive(Parser)]
#[command(name = "vtex-cli")]
#[command(author, version, about = "VTEX console CLI tools")]
struct Cli {
    /// Settings file (defaults to `$VTEX_CONSOLE_SETTINGS` or `.vtex-console/settings.json`)
    #[arg(long = "settings-file", global = true)]
    settings_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored credentials
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Export products to an .xlsx workbook
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Run the catalog diagnostic and write the report workbook
    Diagnose {
        /// Stock file (.xlsx, .xls, .ods or .csv) with SKU and Stock columns
        #[arg(short, long)]
        stock: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List or fetch orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Create products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Read and modify SKUs
    Sku {
        #[command(subcommand)]
        action: SkuAction,
    },
    /// Set SKU prices
    Price {
        #[command(subcommand)]
        action: PriceAction,
    },
    /// Set SKU stock
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
}

/// Where workbooks are written and how fast the catalog is walked.
#[derive(Args)]
struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Pause between catalog pages, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the stored credentials with masked secrets
    Show,
    /// Save credentials
    Set {
        /// VTEX account name
        #[arg(short, long)]
        account: String,

        /// App key
        #[arg(short = 'k', long)]
        app_key: String,

        /// App token
        #[arg(short = 't', long)]
        app_token: String,

        /// Environment (`myvtex`, `vtexcommercestable`, ...)
        #[arg(short, long, default_value = "myvtex")]
        environment: String,
    },
    /// Remove the stored credentials
    Clear,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Load a page of 250 product ids and open its first product
    Page {
        #[arg(default_value_t = 1)]
        page: u64,
    },
    /// Print a product detail
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Export one catalog page
    Page {
        page: u64,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export every catalog page
    All {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 15)]
        per_page: u32,
    },
    /// Fetch one order
    Get {
        /// Order id, e.g. 1234567890123-01
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product; with --price and --quantity also its SKU, price and stock
    Create {
        #[arg(short, long)]
        name: String,

        /// Department id
        #[arg(short, long)]
        department: String,

        /// Category id
        #[arg(short, long)]
        category: String,

        /// Brand id (defaults to 1)
        #[arg(short, long)]
        brand: Option<String>,

        /// Reference code
        #[arg(short, long)]
        ref_id: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Base price of the SKU
        #[arg(long, requires = "quantity")]
        price: Option<String>,

        /// Stock in warehouse 1_1
        #[arg(long, requires = "price")]
        quantity: Option<String>,
    },
}

#[derive(Subcommand)]
enum SkuAction {
    /// Print a SKU
    Show { id: String },
    /// Create a SKU with the default packaging
    Create {
        /// Product id
        #[arg(short, long)]
        product: String,

        #[arg(short, long)]
        name: String,

        /// Reference code
        #[arg(short, long)]
        ref_id: String,
    },
    /// Attach an image to a SKU
    Image {
        sku: String,
        url: String,

        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Attach a specification value to a SKU
    Spec {
        sku: String,
        field: String,
        value: String,
    },
}

#[derive(Subcommand)]
enum PriceAction {
    /// Set the base price (cost 70%, markup 30%)
    Set {
        sku: String,
        base_price: String,

        /// List price (defaults to the base price)
        #[arg(short, long)]
        list_price: Option<String>,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    /// Set the stock in a warehouse
    Set {
        sku: String,
        quantity: String,

        #[arg(short, long, default_value = "1_1")]
        warehouse: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr, stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vtex_cli=info,vtex_console_admin=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let store = cli
        .settings_file
        .map_or_else(SettingsStore::from_env, SettingsStore::open);

    match cli.command {
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&store)?,
            SettingsAction::Set {
                account,
                app_key,
                app_token,
                environment,
            } => commands::settings::set(&store, &account, &app_key, &app_token, &environment)?,
            SettingsAction::Clear => commands::settings::clear(&store)?,
        },
        Commands::Products { action } => match action {
            ProductsAction::Page { page } => commands::catalog::page(&store, page).await?,
            ProductsAction::Show { id } => commands::catalog::product(&store, &id).await?,
        },
        Commands::Export { target } => match target {
            ExportTarget::Page { page, output } => {
                commands::catalog::export(&store, Some(page), &output.output, output.delay_ms)
                    .await?;
            }
            ExportTarget::All { output } => {
                commands::catalog::export(&store, None, &output.output, output.delay_ms).await?;
            }
        },
        Commands::Diagnose { stock, output } => {
            commands::catalog::diagnose(&store, stock.as_deref(), &output.output, output.delay_ms)
                .await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List { page, per_page } => {
                commands::orders::list(&store, page, per_page).await?;
            }
            OrdersAction::Get { id } => commands::orders::get(&store, &id).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::Create {
                name,
                department,
                category,
                brand,
                ref_id,
                description,
                price,
                quantity,
            } => {
                let form = commands::mutations::product_form(
                    name,
                    department,
                    category,
                    brand,
                    ref_id,
                    description,
                );
                commands::mutations::create_product(&store, form, price.zip(quantity)).await?;
            }
        },
        Commands::Sku { action } => match action {
            SkuAction::Show { id } => commands::catalog::sku(&store, &id).await?,
            SkuAction::Create {
                product,
                name,
                ref_id,
            } => commands::mutations::create_sku(&store, product, name, ref_id).await?,
            SkuAction::Image { sku, url, name } => {
                commands::mutations::add_image(&store, &sku, &url, &name).await?;
            }
            SkuAction::Spec { sku, field, value } => {
                commands::mutations::add_specification(&store, &sku, &field, &value).await?;
            }
        },
        Commands::Price { action } => match action {
            PriceAction::Set {
                sku,
                base_price,
                list_price,
            } => {
                commands::mutations::set_price(&store, &sku, &base_price, list_price.as_deref())
                    .await?;
            }
        },
        Commands::Inventory { action } => match action {
            InventoryAction::Set {
                sku,
                quantity,
                warehouse,
            } => commands::mutations::set_inventory(&store, &sku, &quantity, &warehouse).await?,
        },
    }
    Ok(())
}
