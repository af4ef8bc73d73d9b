//! Category management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use storefront_core::error::AppError;
use storefront_core::types::page_window;
use storefront_entity::category::{Category, CategoryDraft, CategoryQuery, SubCategoryDraft};

use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List categories one page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u64,
        /// Only categories whose name matches
        #[arg(short, long)]
        search: Option<String>,
        /// Categories per page (defaults to `ui.page_size`)
        #[arg(long)]
        size: Option<u64>,
    },
    /// Show one category with its sub-categories
    Show {
        /// Category ID
        id: String,
    },
    /// Create a category
    Create {
        /// Category name
        #[arg(short, long)]
        name: String,
        /// Category description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Sub-category, repeatable
        #[arg(long = "sub", value_name = "NAME[:DESCRIPTION]")]
        sub_categories: Vec<String>,
    },
    /// Update a category; omitted fields keep their current value
    Update {
        /// Category ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Replace all sub-categories, repeatable
        #[arg(long = "sub", value_name = "NAME[:DESCRIPTION]")]
        sub_categories: Vec<String>,
    },
}

/// Category display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct CategoryRow {
    /// Category ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Number of sub-categories
    sub_categories: usize,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.uuid.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            sub_categories: category.sub_category_count(),
        }
    }
}

/// Sub-category display row
#[derive(Debug, Serialize, Tabled)]
struct SubCategoryRow {
    /// Sub-category ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
}

/// Execute category commands
pub async fn execute(
    args: &CategoryArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    ctx.require_session()?;

    match &args.command {
        CategoryCommand::List { page, search, size } => {
            let size = size.unwrap_or(ctx.config.ui.page_size);
            let mut query = CategoryQuery::page(page.saturating_sub(1), size);
            if let Some(term) = search {
                query = query.with_search(term.clone());
            }

            let result = ctx.categories.search(&query).await?;

            match format {
                OutputFormat::Table => {
                    let rows: Vec<CategoryRow> =
                        result.categories.iter().map(CategoryRow::from).collect();
                    output::print_list(&rows, format);
                    if result.page_count > 0 {
                        println!(
                            "Page {} of {} ({} total)",
                            query.page.page + 1,
                            result.page_count,
                            result.total_count
                        );
                        output::print_pager(&page_window(query.page.page, result.page_count));
                    }
                }
                OutputFormat::Json => output::print_json(&result),
            }
        }
        CategoryCommand::Show { id } => {
            let category = ctx.categories.get(id).await?;
            print_category(&category, format);
        }
        CategoryCommand::Create {
            name,
            description,
            sub_categories,
        } => {
            let draft = CategoryDraft {
                name: name.clone(),
                description: description.clone(),
                sub_categories: parse_sub_categories(sub_categories),
                ..CategoryDraft::default()
            };

            match ctx.categories.create(&draft).await? {
                Some(category) => print_category(&category, format),
                None => output::print_success(&format!("Category '{}' created", draft.name)),
            }
        }
        CategoryCommand::Update {
            id,
            name,
            description,
            sub_categories,
        } => {
            let mut draft = CategoryDraft::from(ctx.categories.get(id).await?);
            if let Some(name) = name {
                draft.name = name.clone();
            }
            if let Some(description) = description {
                draft.description = description.clone();
            }
            if !sub_categories.is_empty() {
                draft.sub_categories = parse_sub_categories(sub_categories);
            }

            match ctx.categories.update(id, &draft).await? {
                Some(category) => print_category(&category, format),
                None => output::print_success(&format!("Category '{id}' updated")),
            }
        }
    }

    Ok(())
}

fn print_category(category: &Category, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_kv("ID", &category.uuid);
            output::print_kv("Name", &category.name);
            output::print_kv("Description", &category.description);
            let rows: Vec<SubCategoryRow> = category
                .sub_categories
                .iter()
                .map(|sub| SubCategoryRow {
                    id: sub.uuid.clone().unwrap_or_default(),
                    name: sub.name.clone(),
                    description: sub.description.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_json(category),
    }
}

/// Parse `NAME[:DESCRIPTION]` arguments.
fn parse_sub_categories(args: &[String]) -> Vec<SubCategoryDraft> {
    args.iter()
        .map(|arg| {
            let (name, description) = arg.split_once(':').unwrap_or((arg.as_str(), ""));
            SubCategoryDraft {
                uuid: None,
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            }
        })
        .collect()
}
