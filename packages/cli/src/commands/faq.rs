use super::{report_save, Workspace};
use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use weddingsite_document::FaqField;
use weddingsite_editor::{FormSession, SectionKind};

#[derive(Debug, Args)]
pub struct FaqArgs {
    /// Owner the site belongs to
    #[arg(short, long)]
    pub owner: String,

    #[command(subcommand)]
    pub action: FaqAction,
}

#[derive(Debug, Subcommand)]
pub enum FaqAction {
    /// List questions and answers
    List,

    /// Append a question
    Add {
        question: String,

        /// Answer (defaults to a placeholder)
        answer: Option<String>,
    },

    /// Remove a question by its 1-based position
    Remove { position: usize },
}

pub async fn faq(args: FaqArgs, workspace: &Workspace) -> Result<()> {
    let (persister, mut notices, mut doc) = workspace.load(&args.owner).await?;

    if let FaqAction::List = args.action {
        if doc.faqs().is_empty() {
            println!("{}", "No questions yet".yellow());
        }
        for (i, item) in doc.faqs().iter().enumerate() {
            println!("{}. {}", i + 1, item.question.bright_white());
            println!("   {}", item.answer);
        }
        return Ok(());
    }

    let mut session = FormSession::open(SectionKind::Faq, &doc);

    match args.action {
        FaqAction::Add { question, answer } => {
            let key = session
                .add_faq()
                .ok_or_else(|| anyhow!("FAQ form is not open"))?;
            let faqs = session
                .faqs_mut()
                .ok_or_else(|| anyhow!("FAQ form is not open"))?;
            faqs.set_field_draft(key, FaqField::Question, question);
            if let Some(answer) = answer {
                faqs.set_field_draft(key, FaqField::Answer, answer);
            }
        }
        FaqAction::Remove { position } => {
            let faqs = session
                .faqs_mut()
                .ok_or_else(|| anyhow!("FAQ form is not open"))?;
            let key = position
                .checked_sub(1)
                .and_then(|index| faqs.key_at(index))
                .ok_or_else(|| anyhow!("No question at position {position}"))?;
            faqs.remove_item(key);
        }
        FaqAction::List => {}
    }

    if !session.can_submit() {
        bail!("Every question needs text before it can be saved");
    }

    let Some(change) = session.submit(&mut doc) else {
        return Ok(());
    };
    println!(
        "{} FAQ updated ({} questions)",
        "✏️".bright_blue(),
        doc.faqs().len()
    );

    persister.persist_change(&change);
    report_save(&mut notices).await
}
