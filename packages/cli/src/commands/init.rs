use super::{report_save, Workspace};
use crate::config::DEFAULT_CONFIG_NAME;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use weddingsite_document::{next_item_id, DocumentPatch, ScalarField, Theme, WeddingDocument};
use weddingsite_editor::{PersistenceGateway, SavePayload};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Owner the site belongs to
    #[arg(short, long)]
    pub owner: String,

    /// Names of the couple
    #[arg(short, long, num_args = 2, value_names = ["PARTNER_1", "PARTNER_2"])]
    pub names: Vec<String>,

    /// Wedding date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Theme (classic, modern, boho)
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Force overwrite an existing site
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, cwd: &Path, workspace: &Workspace) -> Result<()> {
    if workspace.gateway.load(&args.owner)?.is_some() && !args.force {
        println!(
            "{} A site for {} already exists",
            "⚠️".yellow(),
            args.owner.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Creating wedding site...".bright_blue().bold());

    let config_path = cwd.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        fs::write(&config_path, serde_json::to_string_pretty(&workspace.config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let mut patch = DocumentPatch::new();
    if let [first, second] = args.names.as_slice() {
        patch.set_scalar(ScalarField::CoupleName1, first.as_str());
        patch.set_scalar(ScalarField::CoupleName2, second.as_str());
    }
    if let Some(date) = &args.date {
        patch.set_scalar(ScalarField::WeddingDate, date.as_str());
    }
    patch.theme = args.theme;

    let mut doc = WeddingDocument::new(format!("w-{}", next_item_id()), args.owner.as_str());
    doc.apply(&patch);

    if args.date.is_some() && doc.wedding_day().is_none() {
        println!(
            "  {} Date is not YYYY-MM-DD; the countdown will stay hidden",
            "⚠️".yellow()
        );
    }

    let (persister, mut notices) = workspace.persister(&args.owner);
    persister.persist(SavePayload::Full(doc));
    report_save(&mut notices).await?;

    println!();
    println!("✨ {} Site created for {}", "Done".green().bold(), args.owner);
    Ok(())
}
