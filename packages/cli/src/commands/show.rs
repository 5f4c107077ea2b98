use super::Workspace;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use weddingsite_document::{PartyGroup, ScalarField};
use weddingsite_editor::EditableField;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Owner the site belongs to
    #[arg(short, long)]
    pub owner: String,

    /// Print the stored document as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, workspace: &Workspace) -> Result<()> {
    let (_persister, _notices, doc) = workspace.load(&args.owner).await?;

    if args.json {
        println!("{}", doc.to_json_pretty()?);
        return Ok(());
    }

    let display = |field| EditableField::new(field).display_value(&doc);

    println!(
        "{} & {}",
        display(ScalarField::CoupleName1).bright_white().bold(),
        display(ScalarField::CoupleName2).bright_white().bold()
    );
    for field in [
        ScalarField::WeddingDate,
        ScalarField::VenueName,
        ScalarField::VenueLocation,
    ] {
        println!("  {:<16} {}", field.to_string().dimmed(), display(field));
    }
    println!("  {:<16} {}", "theme".dimmed(), doc.theme());
    println!(
        "  {:<16} {}",
        "story".dimmed(),
        if doc.story_enabled() { "shown" } else { "hidden" }
    );
    println!("  {:<16} {}", "timeline".dimmed(), doc.story_timeline().len());
    for group in PartyGroup::ALL {
        println!("  {:<16} {}", group.key().dimmed(), doc.party(group).len());
    }
    println!("  {:<16} {}", "faqs".dimmed(), doc.faqs().len());
    println!("  {:<16} {}", "schedule_events".dimmed(), doc.schedule_events().len());

    Ok(())
}
