// ABOUTME: Larder CLI - unified command-line tool for the meal planning engine
// ABOUTME: Drives recipes, planner, pantry, shopping, interchange and AI discovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors
//!
//! Usage:
//! ```bash
//! # Add a recipe with two ingredient lines
//! larder-cli recipe add --title "Pasta al pomodoro" \
//!     --ingredient "Pasta:400:g" --ingredient "Tomato sauce:250:ml"
//!
//! # Plan it for dinner and send the ingredients to the shopping list
//! larder-cli plan set 2025-06-10 dinner "Pasta al pomodoro"
//! larder-cli plan send 2025-06-10 dinner
//!
//! # Consolidated view for the store
//! larder-cli shop list --consolidated
//!
//! # Recurring groups and the in-stock reserve
//! larder-cli pantry save Weekly --item "Rice:500:g" --item "Olive oil:1:l"
//! larder-cli pantry send Weekly
//!
//! # Ask for a suggestion using what's in the reserve
//! larder-cli ai suggest --use-reserve --criteria "quick weeknight dinner"
//!
//! # Record a dietary restriction the AI suggestions must respect
//! larder-cli settings diet-add vegetarian
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use larder::{
    ai::{AiService, GeminiClient},
    config::{EngineConfig, StoreBackend},
    errors::AppResult,
    logging::LoggingConfig,
    state::AppState,
    store::Store,
};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "larder-cli",
    about = "Larder meal planning CLI",
    long_about = "Unified command-line tool for managing recipes, the weekly meal plan, pantry groups, the shopping list and AI-backed recipe discovery."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (or "memory" for an ephemeral session)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Recipe library commands
    Recipe {
        #[command(subcommand)]
        action: RecipeCommand,
    },

    /// Meal planner commands
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Shopping list commands
    Shop {
        #[command(subcommand)]
        action: ShopCommand,
    },

    /// Recurring pantry group commands
    Pantry {
        #[command(subcommand)]
        action: PantryCommand,
    },

    /// In-stock reserve commands
    Reserve {
        #[command(subcommand)]
        action: ReserveCommand,
    },

    /// Backup and sheet import/export commands
    Data {
        #[command(subcommand)]
        action: DataCommand,
    },

    /// Profile and preference commands
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// AI-backed discovery commands (requires `GEMINI_API_KEY`)
    Ai {
        #[command(subcommand)]
        action: AiCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum RecipeCommand {
    /// Add a recipe to the library
    Add {
        /// Recipe title
        #[arg(long)]
        title: String,

        /// Category (breakfast, starter, main, side, dessert, snack, drink)
        #[arg(long, default_value = "main")]
        category: String,

        /// Servings the ingredient amounts describe
        #[arg(long, default_value = "4")]
        servings: u8,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Preparation time in minutes
        #[arg(long, default_value = "0")]
        prep_mins: u16,

        /// Cooking time in minutes
        #[arg(long, default_value = "0")]
        cook_mins: u16,

        /// Ingredient line as "name:amount:unit" (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Preparation step (repeatable, in order)
        #[arg(long = "step")]
        steps: Vec<String>,

        /// Free-form tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List recipes, optionally filtered
    List {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Title substring filter
        #[arg(long)]
        search: Option<String>,

        /// Ingredient name filter (repeatable, any match)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
    },

    /// Show one recipe in full
    Show {
        /// Recipe id, id prefix, or title
        recipe: String,

        /// Scale ingredient amounts to this servings count
        #[arg(long)]
        servings: Option<u8>,
    },

    /// Remove a recipe from the library
    Remove {
        /// Recipe id, id prefix, or title
        recipe: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Assign a recipe to a date and slot
    Set {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Slot (lunch or dinner)
        slot: String,

        /// Recipe id, id prefix, or title
        recipe: String,
    },

    /// Clear a date and slot
    Clear {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Slot (lunch or dinner)
        slot: String,
    },

    /// Show the plan, optionally restricted to a date range
    Show {
        /// First date to show (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last date to show (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Send a planned meal's ingredients to the shopping list
    Send {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Slot (lunch or dinner)
        slot: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ShopCommand {
    /// Add an item to the shopping list
    Add {
        /// Item name
        name: String,

        /// Quantity
        #[arg(long, default_value = "1")]
        amount: f64,

        /// Unit
        #[arg(long, default_value = "pcs")]
        unit: String,

        /// Category label for display grouping
        #[arg(long)]
        category: Option<String>,
    },

    /// List the shopping list
    List {
        /// Show the consolidated store-ready view
        #[arg(long)]
        consolidated: bool,
    },

    /// Mark an item as purchased
    Check {
        /// Item id, id prefix, or name
        item: String,
    },

    /// Mark an item as not purchased
    Uncheck {
        /// Item id, id prefix, or name
        item: String,
    },

    /// Remove an item from the list
    Remove {
        /// Item id, id prefix, or name
        item: String,
    },

    /// Clear the list
    Clear {
        /// Only remove purchased items
        #[arg(long)]
        checked: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PantryCommand {
    /// Create or replace a recurring group's items
    Save {
        /// Group name
        name: String,

        /// Template item as "name:amount:unit" (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,
    },

    /// List every group and its items
    List,

    /// Send a group's missing items to the shopping list
    Send {
        /// Group id, id prefix, or name
        group: String,
    },

    /// Toggle an item's in-stock flag
    Toggle {
        /// Group id, id prefix, or name
        group: String,

        /// Item id, id prefix, or name
        item: String,
    },

    /// Move an item between groups
    Move {
        /// Item id, id prefix, or name
        item: String,

        /// Source group id, id prefix, or name
        #[arg(long)]
        from: String,

        /// Target group id, id prefix, or name
        #[arg(long)]
        to: String,
    },

    /// Delete a group
    Delete {
        /// Group id, id prefix, or name
        group: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ReserveCommand {
    /// Add an item to the in-stock reserve
    Add {
        /// Item name
        name: String,

        /// Quantity
        #[arg(long, default_value = "1")]
        amount: f64,

        /// Unit
        #[arg(long, default_value = "pcs")]
        unit: String,
    },

    /// List the reserve
    List,

    /// Update an item's quantity
    Update {
        /// Item id, id prefix, or name
        item: String,

        /// New quantity
        #[arg(long)]
        amount: f64,
    },

    /// Remove an item from the reserve
    Remove {
        /// Item id, id prefix, or name
        item: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum DataCommand {
    /// Export a whole-state JSON backup
    ExportBackup {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a JSON backup, replacing the sections it carries
    ImportBackup {
        /// Backup file to read
        file: PathBuf,
    },

    /// Export the recurring-lists and in-stock CSV sheets
    ExportSheets {
        /// Directory to write the sheet files into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Import CSV sheets
    ImportSheets {
        /// Recurring-lists sheet file
        #[arg(long)]
        groups: Option<PathBuf>,

        /// In-stock sheet file
        #[arg(long)]
        stock: Option<PathBuf>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the profile and preferences
    Show,

    /// Update profile fields
    Set {
        /// Display name shown in greetings
        #[arg(long)]
        display_name: Option<String>,

        /// Servings basis preselected for new recipes
        #[arg(long)]
        default_servings: Option<u8>,

        /// Interface language code (en, fr)
        #[arg(long)]
        language: Option<String>,
    },

    /// Add a dietary restriction honored by AI suggestions
    DietAdd {
        /// Tag ("vegetarian", "gluten-free", ...)
        tag: String,
    },

    /// Remove a dietary restriction
    DietRemove {
        /// Tag to remove
        tag: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AiCommand {
    /// Suggest one recipe
    Suggest {
        /// Free-form wishes ("quick", "one pot", ...)
        #[arg(long)]
        criteria: Option<String>,

        /// Available ingredient (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Include reserve item names as available ingredients
        #[arg(long)]
        use_reserve: bool,

        /// Save the suggestion straight into the library
        #[arg(long)]
        save: bool,
    },

    /// Search the web for recipes
    Search {
        /// Search query
        query: String,
    },

    /// Generate a cover image for a recipe
    Image {
        /// Recipe id, id prefix, or title
        recipe: String,

        /// Also write the decoded image to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Compare shopping list prices across nearby stores
    Prices {
        /// Location to search around
        #[arg(long)]
        location: String,
    },

    /// Locate stores stocking the shopping list
    Stores {
        /// Location to search around
        #[arg(long)]
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    // Load configuration
    let mut config = EngineConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.store = StoreBackend::parse_backend(&dir);
    }

    let store = Store::open(&config.store)?;
    let mut state = AppState::load(store);

    // Profile language applies unless the environment set one explicitly
    if std::env::var("LARDER_LANGUAGE").is_err() {
        config.language = state.settings().language.clone();
    }

    // Execute command
    match cli.command {
        Command::Recipe { action } => match action {
            RecipeCommand::Add {
                title,
                category,
                servings,
                description,
                prep_mins,
                cook_mins,
                ingredients,
                steps,
                tags,
            } => {
                commands::recipe::add(
                    &mut state,
                    title,
                    &category,
                    servings,
                    description,
                    prep_mins,
                    cook_mins,
                    &ingredients,
                    steps,
                    tags,
                )?;
            }
            RecipeCommand::List {
                category,
                search,
                ingredients,
            } => {
                commands::recipe::list(&state, category.as_deref(), search.as_deref(), &ingredients)?;
            }
            RecipeCommand::Show { recipe, servings } => {
                commands::recipe::show(&state, &recipe, servings)?;
            }
            RecipeCommand::Remove { recipe } => {
                commands::recipe::remove(&mut state, &recipe)?;
            }
        },
        Command::Plan { action } => match action {
            PlanCommand::Set { date, slot, recipe } => {
                commands::plan::set(&mut state, &date, &slot, &recipe)?;
            }
            PlanCommand::Clear { date, slot } => {
                commands::plan::clear(&mut state, &date, &slot)?;
            }
            PlanCommand::Show { from, to } => {
                commands::plan::show(&state, from.as_deref(), to.as_deref())?;
            }
            PlanCommand::Send { date, slot } => {
                commands::plan::send(&mut state, &date, &slot)?;
            }
        },
        Command::Shop { action } => match action {
            ShopCommand::Add {
                name,
                amount,
                unit,
                category,
            } => {
                commands::shop::add(&mut state, &name, amount, &unit, category)?;
            }
            ShopCommand::List { consolidated } => {
                commands::shop::list(&state, consolidated);
            }
            ShopCommand::Check { item } => {
                commands::shop::set_checked(&mut state, &item, true)?;
            }
            ShopCommand::Uncheck { item } => {
                commands::shop::set_checked(&mut state, &item, false)?;
            }
            ShopCommand::Remove { item } => {
                commands::shop::remove(&mut state, &item)?;
            }
            ShopCommand::Clear { checked } => {
                commands::shop::clear(&mut state, checked)?;
            }
        },
        Command::Pantry { action } => match action {
            PantryCommand::Save { name, items } => {
                commands::pantry::save(&mut state, &name, &items)?;
            }
            PantryCommand::List => {
                commands::pantry::list(&state);
            }
            PantryCommand::Send { group } => {
                commands::pantry::send(&mut state, &group)?;
            }
            PantryCommand::Toggle { group, item } => {
                commands::pantry::toggle(&mut state, &group, &item)?;
            }
            PantryCommand::Move { item, from, to } => {
                commands::pantry::move_item(&mut state, &item, &from, &to)?;
            }
            PantryCommand::Delete { group } => {
                commands::pantry::delete(&mut state, &group)?;
            }
        },
        Command::Reserve { action } => match action {
            ReserveCommand::Add { name, amount, unit } => {
                commands::reserve::add(&mut state, &name, amount, &unit)?;
            }
            ReserveCommand::List => {
                commands::reserve::list(&state);
            }
            ReserveCommand::Update { item, amount } => {
                commands::reserve::update(&mut state, &item, amount)?;
            }
            ReserveCommand::Remove { item } => {
                commands::reserve::remove(&mut state, &item)?;
            }
        },
        Command::Data { action } => match action {
            DataCommand::ExportBackup { out } => {
                commands::data::export_backup(&state, out.as_deref())?;
            }
            DataCommand::ImportBackup { file } => {
                commands::data::import_backup(&mut state, &file)?;
            }
            DataCommand::ExportSheets { dir } => {
                commands::data::export_sheets(&state, &dir)?;
            }
            DataCommand::ImportSheets { groups, stock } => {
                commands::data::import_sheets(&mut state, groups.as_deref(), stock.as_deref())?;
            }
        },
        Command::Settings { action } => match action {
            SettingsCommand::Show => {
                commands::settings::show(&state);
            }
            SettingsCommand::Set {
                display_name,
                default_servings,
                language,
            } => {
                commands::settings::set(&mut state, display_name, default_servings, language)?;
            }
            SettingsCommand::DietAdd { tag } => {
                commands::settings::diet_add(&mut state, &tag)?;
            }
            SettingsCommand::DietRemove { tag } => {
                commands::settings::diet_remove(&mut state, &tag)?;
            }
        },
        Command::Ai { action } => {
            let provider = GeminiClient::from_config(&config.ai)?;
            let service = AiService::new(provider);
            match action {
                AiCommand::Suggest {
                    criteria,
                    ingredients,
                    use_reserve,
                    save,
                } => {
                    commands::ai::suggest(
                        &mut state,
                        &service,
                        &config.language,
                        criteria,
                        ingredients,
                        use_reserve,
                        save,
                    )
                    .await?;
                }
                AiCommand::Search { query } => {
                    commands::ai::search(&service, &config.language, &query).await?;
                }
                AiCommand::Image { recipe, out } => {
                    commands::ai::image(&mut state, &service, &recipe, out.as_deref()).await?;
                }
                AiCommand::Prices { location } => {
                    commands::ai::prices(&state, &service, &config.language, &location).await?;
                }
                AiCommand::Stores { location } => {
                    commands::ai::stores(&state, &service, &config.language, &location).await?;
                }
            }
        }
    }

    Ok(())
}
