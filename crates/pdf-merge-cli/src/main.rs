use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use pdf_assemble::{MergeOptions, OutputTarget, audit_with_threshold, summarize_warnings};
use pdf_async_runtime::{CollectRequest, MergeCommand, MergeUpdate, SelectionState, worker_task};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

mod logger;

#[derive(Parser)]
#[command(name = "imgmerge", about = "Merge JPEG and PNG images into one PDF", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Folder for the merged PDF (default: <source>/result)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Exact output file, instead of a timestamped name
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// JSON options file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Document title
    #[arg(long, global = true)]
    title: Option<String>,

    /// Show the selection and size warnings, don't generate a PDF
    #[arg(long, global = true)]
    list_only: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge every image in a folder
    Folder {
        dir: PathBuf,

        /// Include images in subfolders
        #[arg(short, long)]
        recursive: bool,
    },

    /// Merge the given image files
    Files {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Merge a drag-and-drop payload ("{with space} plain")
    Drop {
        payload: String,

        /// Include images in subfolders of a dropped folder
        #[arg(short, long)]
        recursive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::from_verbosity(cli.verbose).init()?;

    let mut options = match &cli.config {
        Some(path) => MergeOptions::load(path).await?,
        None => MergeOptions::default(),
    };
    if cli.output_dir.is_some() {
        options.output_dir = cli.output_dir;
    }
    if cli.title.is_some() {
        options.title = cli.title;
    }

    let request = match cli.command {
        Commands::Folder { dir, recursive } => CollectRequest::Folder {
            path: dir,
            recursive: recursive || options.recursive,
        },
        Commands::Files { files } => CollectRequest::Files { paths: files },
        Commands::Drop { payload, recursive } => CollectRequest::Drop {
            payload,
            recursive: recursive || options.recursive,
        },
    };
    options.validate()?;

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(worker_task(command_rx, update_tx));

    command_tx.send(MergeCommand::Collect { request })?;
    let selection = match update_rx.recv().await {
        Some(MergeUpdate::Selected { selection }) => selection,
        Some(MergeUpdate::EmptySelection { message }) => bail!(message),
        Some(MergeUpdate::Error { message }) => bail!(message),
        Some(other) => bail!("Unexpected worker update: {other:?}"),
        None => bail!("Worker stopped unexpectedly"),
    };
    print_selection(&selection);

    if cli.list_only {
        let output = cli.output.unwrap_or_else(|| {
            OutputTarget::for_selection(&selection, options.output_dir.as_deref()).resolve()
        });
        println!("Output: {}", output.display());
        let warnings = audit_with_threshold(selection.images(), options.size_warning_pixels);
        if !warnings.is_empty() {
            println!("Large images (may produce a big PDF):");
            println!("{}", summarize_warnings(&warnings, options.max_listed_warnings));
        }
        return Ok(());
    }

    let max_listed = options.max_listed_warnings;
    command_tx.send(MergeCommand::Generate {
        selection,
        options,
        output: cli.output,
    })?;
    drop(command_tx);

    while let Some(update) = update_rx.recv().await {
        match update {
            MergeUpdate::SizeWarnings { warnings } => {
                println!("Large images (may produce a big PDF):");
                println!("{}", summarize_warnings(&warnings, max_listed));
            }
            MergeUpdate::Progress {
                operation,
                current,
                total,
            } => {
                eprint!("\r{operation}: {current}/{total}");
                let _ = std::io::stderr().flush();
                if current == total {
                    eprintln!();
                }
            }
            MergeUpdate::Complete { path, page_count } => {
                println!("Merged {} pages → {}", page_count, path.display());
                break;
            }
            MergeUpdate::EmptySelection { message } | MergeUpdate::Error { message } => {
                bail!(message)
            }
            MergeUpdate::Selected { .. } => {}
        }
    }

    worker.await?;
    Ok(())
}

fn print_selection(selection: &SelectionState) {
    println!("Source: {}", selection.source().display());
    println!("{} image(s):", selection.len());
    for image in selection.images() {
        println!("  {}", image.file_name());
    }
}
