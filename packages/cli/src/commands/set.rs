use super::{report_save, Workspace};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use weddingsite_document::ScalarField;
use weddingsite_editor::EditableField;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Owner the site belongs to
    #[arg(short, long)]
    pub owner: String,

    /// Attribute to edit (couple_name_1, wedding_date, venue_name, ...)
    pub field: ScalarField,

    /// New value
    pub value: String,
}

pub async fn set(args: SetArgs, workspace: &Workspace) -> Result<()> {
    let (persister, mut notices, mut doc) = workspace.load(&args.owner).await?;

    let mut field = EditableField::new(args.field);
    let before = field.display_value(&doc);

    field.start(&doc);
    field.on_draft_change(args.value);
    let Some(change) = field.save(&mut doc) else {
        return Ok(());
    };

    println!(
        "{} {}: {} → {}",
        "✏️".bright_blue(),
        args.field.to_string().bright_white(),
        before.dimmed(),
        field.display_value(&doc).green()
    );

    persister.persist_change(&change);
    report_save(&mut notices).await
}
