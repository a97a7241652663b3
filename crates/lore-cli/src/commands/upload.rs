use anyhow::{Context, Result, bail};
use lore_application::{Surface, UploadBatchService, UploadSelection, evaluate};
use lore_core::session::GateDecision;
use lore_core::upload::UploadItem;
use std::path::PathBuf;

/// Uploads the given files sequentially and prints the batch summary.
pub async fn run(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        bail!("no files selected");
    }

    let ctx = super::establish()?;

    match evaluate(ctx.provider.as_ref(), Surface::AdminUpload) {
        GateDecision::Allow => {}
        GateDecision::Deny { message } => bail!(message),
        GateDecision::RedirectToLogin => bail!("not signed in"),
    }

    let mut selection = UploadSelection::new();
    for path in files {
        let item = UploadItem::from_path(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        selection.add(item);
    }

    let service = UploadBatchService::new(ctx.api.clone(), ctx.provider.clone());
    let items = selection.take();
    let result = service
        .upload_all_with_progress(&items, |position, total, name| {
            println!("Uploading {position}/{total}: {name}");
        })
        .await;

    println!("{}", result.summary());
    if !result.is_full_success() {
        for outcome in result.outcomes.iter().filter(|o| !o.succeeded) {
            println!("  failed: {}", outcome.file_name);
        }
    }

    Ok(())
}
