use crate::{MergeCommand, MergeUpdate};
use pdf_assemble::{
    MergeOptions, OutputTarget, assemble_into, assemble_with_progress, audit_with_threshold,
};
use pdf_collect::{CollectError, CollectRequest, SelectionState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Async worker task that processes merge commands and sends updates.
///
/// Commands run one at a time, in arrival order. Returns once every sender
/// has been dropped.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<MergeCommand>,
    update_tx: mpsc::UnboundedSender<MergeUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: MergeCommand, update_tx: &mpsc::UnboundedSender<MergeUpdate>) {
    match cmd {
        MergeCommand::Collect { request } => {
            handle_collect(request, update_tx).await;
        }
        MergeCommand::Generate {
            selection,
            options,
            output,
        } => {
            handle_generate(selection, options, output, update_tx).await;
        }
    }
}

async fn handle_collect(request: CollectRequest, update_tx: &mpsc::UnboundedSender<MergeUpdate>) {
    let result = tokio::task::spawn_blocking(move || request.collect()).await;

    let update = match result {
        Ok(Ok(selection)) => MergeUpdate::Selected {
            selection: Arc::new(selection),
        },
        Ok(Err(CollectError::EmptySelection)) => MergeUpdate::EmptySelection {
            message: "No JPEG or PNG images were found in the selection".to_string(),
        },
        Ok(Err(e)) => MergeUpdate::Error {
            message: format!("Failed to collect images: {e}"),
        },
        Err(e) => MergeUpdate::Error {
            message: format!("Collection task failed: {e}"),
        },
    };
    let _ = update_tx.send(update);
}

async fn handle_generate(
    selection: Arc<SelectionState>,
    options: MergeOptions,
    output: Option<PathBuf>,
    update_tx: &mpsc::UnboundedSender<MergeUpdate>,
) {
    if let Err(e) = options.validate() {
        let _ = update_tx.send(MergeUpdate::Error {
            message: e.to_string(),
        });
        return;
    }

    if selection.is_empty() {
        let _ = update_tx.send(MergeUpdate::EmptySelection {
            message: format!("No images to merge in {}", selection.source().display()),
        });
        return;
    }

    let threshold = options.size_warning_pixels;
    let audited = Arc::clone(&selection);
    match tokio::task::spawn_blocking(move || audit_with_threshold(audited.images(), threshold))
        .await
    {
        Ok(warnings) if !warnings.is_empty() => {
            let _ = update_tx.send(MergeUpdate::SizeWarnings { warnings });
        }
        Ok(_) => {}
        Err(e) => log::warn!("Size audit task failed: {e}"),
    }

    let progress_tx = update_tx.clone();
    let progress = move |current, total| {
        let _ = progress_tx.send(MergeUpdate::Progress {
            operation: "Merging images".to_string(),
            current,
            total,
        });
    };

    let result = match output {
        Some(path) => {
            let written =
                assemble_with_progress(selection.images(), &path, options.title, progress).await;
            written.map(|()| path)
        }
        None => {
            let target = OutputTarget::for_selection(&selection, options.output_dir.as_deref());
            assemble_into(selection.images(), &target, options.title, progress).await
        }
    };

    match result {
        Ok(path) => {
            let _ = update_tx.send(MergeUpdate::Complete {
                path,
                page_count: selection.len(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(MergeUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}
