use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use terralink::config::Config;
use terralink::filter::{CriteriaDraft, ListingBoard, LocationCatalog};
use terralink::models::{PropertyId, PropertyRecord};
use terralink::sources::{
    AddOutcome, ContactOutcome, DemoListings, JsonFileSource, ListingSource, MarketplaceClient,
    Shortlist, ShortlistSource, ShortlistStore,
};
use terralink::upload::ListingDraft;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terralink", version, about = "Browse and filter TerraLink property listings")]
struct Cli {
    /// Config file (default: ~/.terralink/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Buyer account id (overrides config)
    #[arg(long, global = true)]
    buyer: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List listings matching the given filters
    Explore {
        #[arg(long, value_enum, default_value_t = SourceKind::Api)]
        source: SourceKind,

        /// Listing payload to read when --source file
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Also write the visible listings to this JSON file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show the full details of one listing
    Show { id: PropertyId },
    /// Manage the buyer's favorites or interests
    Shortlist {
        #[command(subcommand)]
        action: ShortlistAction,

        /// Operate on interests instead of favorites
        #[arg(long, global = true)]
        interests: bool,
    },
    /// Exchange contact emails with the seller of a favorite
    Contact { id: PropertyId },
    /// Publish a listing from a seller form JSON file
    Upload { form: PathBuf },
    /// Search the location picker's city list
    Cities { query: Option<String> },
}

#[derive(Subcommand)]
enum ShortlistAction {
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    Add { id: PropertyId },
    Remove { id: PropertyId },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    Api,
    File,
    Demo,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Text to find in the name or location
    #[arg(long, default_value = "")]
    search: String,
    /// Property type, e.g. "Agricultural Land"
    #[arg(long = "type", default_value = "")]
    property_type: String,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// Exact location, e.g. "Chennai, Tamil Nadu"
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    size: String,
    /// Required amenity; repeat for several
    #[arg(long = "amenity")]
    amenities: Vec<String>,
}

impl From<FilterArgs> for CriteriaDraft {
    fn from(args: FilterArgs) -> Self {
        CriteriaDraft {
            search_text: args.search,
            property_type: args.property_type,
            price_min: args.min_price,
            price_max: args.max_price,
            location: args.location,
            size: args.size,
            amenities: args.amenities,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.buyer.is_some() {
        config.buyer_id = cli.buyer;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Explore {
            source,
            file,
            filters,
            save,
        } => {
            let source: Box<dyn ListingSource> = match source {
                SourceKind::Api => Box::new(MarketplaceClient::from_config(&config)?),
                SourceKind::Demo => Box::new(DemoListings::new()),
                SourceKind::File => {
                    let path = file.context("--source file needs --file <PATH>")?;
                    Box::new(JsonFileSource::new(path))
                }
            };
            let board = load_board(source.as_ref(), filters.into()).await?;
            render(&board);

            if let Some(path) = save {
                let json = serde_json::to_string_pretty(&board.visible())?;
                tokio::fs::write(&path, json).await?;
                info!("💾 Saved visible listings to {}", path.display());
            }
        }
        Command::Show { id } => {
            let client = MarketplaceClient::from_config(&config)?;
            info!("Looking up listing {} at {}", id, client.base_url());
            let details = client.property_details(&id).await?;
            println!("{} ({})", details.property_type, details.location);
            println!("   Address: {}", details.address);
            let negotiable = if details.negotiable { " (negotiable)" } else { "" };
            println!("   Price: ₹{}{}", details.price, negotiable);
            println!("   Size: {}", details.size);
            println!("   Owner: {} ({})", details.owner, details.contacts);
            println!("   Amenities: {}", join(details.amenities.iter()));
            println!("   {}", details.description);
            for image in &details.images {
                println!("   Image: {}", image);
            }
        }
        Command::Shortlist { action, interests } => {
            let kind = if interests {
                Shortlist::Interests
            } else {
                Shortlist::Favorites
            };
            let buyer = require_buyer(&config)?;
            let client = Arc::new(MarketplaceClient::from_config(&config)?);

            match action {
                ShortlistAction::List { filters } => {
                    let source = ShortlistSource::new(client, kind, buyer);
                    let board = load_board(&source, filters.into()).await?;
                    render(&board);
                }
                ShortlistAction::Add { id } => {
                    match client.add(kind, buyer, &id).await? {
                        AddOutcome::Added => println!("Added {} to {}", id, kind),
                        AddOutcome::AlreadyPresent => println!("{} is already in {}", id, kind),
                    }
                }
                ShortlistAction::Remove { id } => {
                    let source = ShortlistSource::new(client.clone(), kind, buyer);
                    let mut board = ListingBoard::new();
                    board.load(&source).await;
                    let removed = board
                        .remove_from_shortlist(client.as_ref(), kind, buyer, &id)
                        .await?;
                    match removed {
                        Some(record) => println!("Removed '{}' from {}", record.name, kind),
                        None => println!("Removed {} from {}", id, kind),
                    }
                    render(&board);
                }
            }
        }
        Command::Contact { id } => {
            let buyer = require_buyer(&config)?;
            let client = MarketplaceClient::from_config(&config)?;
            match client.contact(buyer, &id).await? {
                ContactOutcome::Emails {
                    buyer_email,
                    seller_email,
                } => {
                    println!("Seller: {}", seller_email);
                    println!("Shared your address: {}", buyer_email);
                }
                ContactOutcome::LimitReached => {
                    println!("Contact details for {} were already shared", id)
                }
            }
        }
        Command::Upload { form } => {
            let content = tokio::fs::read_to_string(&form)
                .await
                .with_context(|| format!("Failed to read {}", form.display()))?;
            let draft: ListingDraft =
                serde_json::from_str(&content).context("Seller form is not valid JSON")?;
            let request = draft.validate()?;
            MarketplaceClient::from_config(&config)?
                .upload(&request)
                .await?;
            println!("✅ Uploaded '{}'", request.name);
        }
        Command::Cities { query } => {
            let catalog = LocationCatalog::default();
            let cities: Vec<&str> = match query.as_deref() {
                Some(q) => catalog.search(q),
                None => catalog.cities().iter().map(String::as_str).collect(),
            };
            for city in cities {
                println!("{}", city);
            }
        }
    }

    Ok(())
}

async fn load_board(source: &dyn ListingSource, draft: CriteriaDraft) -> Result<ListingBoard> {
    let mut board = ListingBoard::new();
    board.load(source).await;
    if let Some(err) = board.load_error() {
        bail!("Could not load listings from {}: {}", source.source_name(), err);
    }
    board.submit(&draft)?;
    Ok(board)
}

fn require_buyer(config: &Config) -> Result<u64> {
    config
        .buyer_id
        .context("No buyer id: pass --buyer or set buyer_id in the config")
}

fn render(board: &ListingBoard) {
    let visible = board.visible();
    info!(
        "{} of {} listings match ({} active filters)",
        visible.len(),
        board.records().len(),
        board.criteria().active_count()
    );

    if visible.is_empty() {
        println!("No properties match your filters.");
        return;
    }

    for (i, property) in visible.iter().enumerate() {
        print_listing(i + 1, property);
    }
}

fn print_listing(n: usize, property: &PropertyRecord) {
    println!("{}. {} (₹{})", n, property.name, property.price);
    println!("   {}", property.location);
    if let Some(kind) = property.property_type {
        println!("   Type: {}", kind);
    }
    if !property.size.is_empty() {
        println!("   Size: {}", property.size);
    }
    println!("   Amenities: {}", join(property.amenities.iter()));
    println!("   ID: {}", property.id);
    println!();
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = items.map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}
