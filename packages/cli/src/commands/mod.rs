pub mod countdown;
pub mod faq;
pub mod init;
pub mod set;
pub mod show;

pub use countdown::{countdown, CountdownArgs};
pub use faq::{faq, FaqArgs};
pub use init::{init, InitArgs};
pub use set::{set, SetArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use weddingsite_document::WeddingDocument;
use weddingsite_editor::{JsonFileGateway, Persister, SaveNotice};

/// Config plus the document store it points at
pub struct Workspace {
    pub config: Config,
    pub gateway: Arc<JsonFileGateway>,
}

impl Workspace {
    pub fn open(cwd: &Path, config: Config) -> Self {
        let gateway = Arc::new(JsonFileGateway::new(config.data_path(cwd)));
        Self { config, gateway }
    }

    pub fn persister(&self, owner: &str) -> (Persister, UnboundedReceiver<SaveNotice>) {
        Persister::new(self.gateway.clone(), owner)
    }

    /// Persister for `owner` together with the owner's stored document
    pub async fn load(
        &self,
        owner: &str,
    ) -> Result<(Persister, UnboundedReceiver<SaveNotice>, WeddingDocument)> {
        let (persister, notices) = self.persister(owner);
        let doc = persister.load().await?.ok_or_else(|| {
            anyhow!("No site for owner {owner:?}. Run `weddingsite init --owner {owner}` first")
        })?;
        Ok((persister, notices, doc))
    }
}

/// Wait for the outcome of the pending save and print it
pub async fn report_save(notices: &mut UnboundedReceiver<SaveNotice>) -> Result<()> {
    match notices.recv().await {
        Some(SaveNotice::Saved { .. }) => {
            println!("  {} Saved", "✓".green());
            Ok(())
        }
        Some(SaveNotice::Failed { reason, .. }) => bail!("Save failed: {reason}"),
        None => bail!("Save task ended without reporting"),
    }
}
