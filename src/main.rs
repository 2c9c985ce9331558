//! bizplan - structured business plans from the command line

use std::path::PathBuf;

use bizplan::commands;
use bizplan::config::BizplanPaths;
use bizplan::models::{
    BillingCycle, ExportFormat, MilestoneCategory, MilestoneStatus, ProductCategory,
};
use bizplan::store::PlanDetails;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bizplan")]
#[command(author, version, about = "Create and manage structured business plans")]
struct Cli {
    /// Data directory (defaults to ~/.bizplan)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize bizplan (first-time setup)
    Init {
        /// Seed the store with a filled-in example plan
        #[arg(long)]
        sample: bool,
    },

    /// Create a new plan
    New {
        /// Plan name
        name: String,

        /// Template: blank, plugin-business, saas, consulting, nonprofit
        #[arg(short, long)]
        template: Option<String>,
    },

    /// List all plans
    List,

    /// Show a plan (the active one by default)
    Show {
        /// Plan ID
        id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make a plan the active one
    Activate {
        /// Plan ID
        id: String,
    },

    /// Edit a plan's header fields
    Edit {
        /// Plan ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        /// Hex color, e.g. "#27ae60"
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a plan and everything in it
    Delete {
        /// Plan ID
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Delete all plans
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show dashboard numbers for a plan
    Stats {
        /// Plan ID
        id: Option<String>,
    },

    /// Validate a plan
    Validate {
        /// Plan ID
        id: Option<String>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Export all plans to a file
    Export {
        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format: json or markdown
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// Import plans from an export file
    Import {
        /// JSON export file
        file: PathBuf,

        /// Reject the whole file if any record is malformed
        #[arg(long)]
        strict: bool,
    },

    /// Manage products of the active plan
    Product {
        /// Plan ID (defaults to the active plan)
        #[arg(long)]
        plan: Option<String>,

        #[command(subcommand)]
        operation: ProductOperationCli,
    },

    /// Manage roadmap milestones of the active plan
    Milestone {
        /// Plan ID (defaults to the active plan)
        #[arg(long)]
        plan: Option<String>,

        #[command(subcommand)]
        operation: MilestoneOperationCli,
    },

    /// Manage core values of the active plan
    Value {
        /// Plan ID (defaults to the active plan)
        #[arg(long)]
        plan: Option<String>,

        #[command(subcommand)]
        operation: ValueOperationCli,
    },

    /// Set a text field, e.g. `bizplan set executive.mission "..."`
    Set {
        /// Field path or name (e.g. executive.tagline, mission)
        field: String,

        value: String,

        /// Plan ID (defaults to the active plan)
        #[arg(long)]
        plan: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductOperationCli {
    /// Add a product
    Add {
        name: String,

        /// wordpress-product, obsidian-product, service, other
        #[arg(short, long, default_value = "other")]
        category: ProductCategory,

        #[arg(long)]
        sku: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Price of a single "Standard" tier
        #[arg(short, long)]
        price: Option<f64>,

        /// one-time, monthly, yearly, lifetime
        #[arg(long, default_value = "one-time")]
        cycle: BillingCycle,
    },
    /// List products
    List,
    /// Copy a product with fresh identifiers
    Duplicate { id: String },
    /// Move a product to its next lifecycle stage
    Advance { id: String },
    /// Remove a product
    Remove { id: String },
}

#[derive(Subcommand)]
enum MilestoneOperationCli {
    /// Add a milestone
    Add {
        title: String,

        #[arg(short, long, default_value = "other")]
        category: MilestoneCategory,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        target: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// List milestones
    List,
    /// Set a milestone's status: planned, in-progress, completed, delayed
    Status { id: String, status: MilestoneStatus },
    /// Remove a milestone
    Remove { id: String },
}

#[derive(Subcommand)]
enum ValueOperationCli {
    /// Append a core value
    Add { value: String },
    /// Move a core value (positions start at 1)
    Move { from: usize, to: usize },
    /// Remove a core value by position
    Remove { index: usize },
}

// Conversion functions from CLI enums to library enums
impl From<ProductOperationCli> for commands::ProductOperation {
    fn from(op: ProductOperationCli) -> Self {
        match op {
            ProductOperationCli::Add {
                name,
                category,
                sku,
                description,
                price,
                cycle,
            } => commands::ProductOperation::Add {
                name,
                category,
                sku,
                description,
                price,
                cycle,
            },
            ProductOperationCli::List => commands::ProductOperation::List,
            ProductOperationCli::Duplicate { id } => commands::ProductOperation::Duplicate { id },
            ProductOperationCli::Advance { id } => commands::ProductOperation::Advance { id },
            ProductOperationCli::Remove { id } => commands::ProductOperation::Remove { id },
        }
    }
}

impl From<MilestoneOperationCli> for commands::MilestoneOperation {
    fn from(op: MilestoneOperationCli) -> Self {
        match op {
            MilestoneOperationCli::Add {
                title,
                category,
                target,
                description,
            } => commands::MilestoneOperation::Add {
                title,
                category,
                target_date: target,
                description,
            },
            MilestoneOperationCli::List => commands::MilestoneOperation::List,
            MilestoneOperationCli::Status { id, status } => {
                commands::MilestoneOperation::Status { id, status }
            }
            MilestoneOperationCli::Remove { id } => commands::MilestoneOperation::Remove { id },
        }
    }
}

impl From<ValueOperationCli> for commands::ValueOperation {
    fn from(op: ValueOperationCli) -> Self {
        match op {
            ValueOperationCli::Add { value } => commands::ValueOperation::Add { value },
            ValueOperationCli::Move { from, to } => commands::ValueOperation::Move { from, to },
            ValueOperationCli::Remove { index } => commands::ValueOperation::Remove { index },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let paths = match cli.home {
        Some(home) => BizplanPaths::at(home),
        None => BizplanPaths::new()?,
    };

    match cli.command {
        Commands::Init { sample } => {
            commands::init(&paths, sample)?;
        }
        Commands::New { name, template } => {
            commands::new_plan(&paths, &name, template.as_deref())?;
        }
        Commands::List => {
            commands::list(&paths)?;
        }
        Commands::Show { id, json } => {
            let format = if json {
                commands::OutputFormat::Json
            } else {
                commands::OutputFormat::Summary
            };
            commands::show(&paths, id.as_deref(), format)?;
        }
        Commands::Activate { id } => {
            commands::activate(&paths, &id)?;
        }
        Commands::Edit {
            id,
            name,
            description,
            icon,
            color,
        } => {
            let details = PlanDetails {
                name,
                description,
                icon,
                color,
            };
            commands::edit(&paths, &id, details)?;
        }
        Commands::Delete { id, yes } => {
            commands::delete(&paths, &id, yes)?;
        }
        Commands::Reset { yes } => {
            commands::reset(&paths, yes)?;
        }
        Commands::Stats { id } => {
            commands::stats(&paths, id.as_deref())?;
        }
        Commands::Validate { id, strict } => {
            commands::validate(&paths, id.as_deref(), strict)?;
        }
        Commands::Export { output, format } => {
            commands::export(&paths, output.as_deref(), format)?;
        }
        Commands::Import { file, strict } => {
            commands::import(&paths, &file, strict)?;
        }
        Commands::Product { plan, operation } => {
            commands::product(&paths, plan.as_deref(), operation.into())?;
        }
        Commands::Milestone { plan, operation } => {
            commands::milestone(&paths, plan.as_deref(), operation.into())?;
        }
        Commands::Value { plan, operation } => {
            commands::value(&paths, plan.as_deref(), operation.into())?;
        }
        Commands::Set { field, value, plan } => {
            commands::set(&paths, plan.as_deref(), &field, &value).await?;
        }
    }
    Ok(())
}
