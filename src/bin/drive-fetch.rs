//! Fetch a single file from Google Drive by id or shareable link.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use drivelib::public;

#[derive(Parser)]
#[command(
    name = "drive-fetch",
    version,
    about = "Download files from Google Drive",
    after_help = "Examples:\n  \
        drive-fetch 1a2B3c4D5e6F7g8H\n  \
        drive-fetch \"https://drive.google.com/file/d/1a2B3c4D5e6F7g8H/view?usp=sharing\"\n  \
        drive-fetch 1a2B3c4D5e6F7g8H -o downloads/archive.zip\n  \
        drive-fetch 1a2B3c4D5e6F7g8H --method direct"
)]
struct Args {
    /// Google Drive file ID or shareable link
    file_id: String,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Download strategy
    #[arg(short, long, value_enum, default_value = "auto")]
    method: Method,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    /// Resolve ids out of any shareable link form
    Auto,
    /// Bare-id endpoint path
    Direct,
}

#[tokio::main]
async fn main() {
    process::exit(run(Args::parse()).await);
}

async fn run(args: Args) -> i32 {
    // Create the output directory if needed.
    if let Some(parent) = args.output.as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("✗ Could not create {}: {}", parent.display(), e);
                return 1;
            }
        }
    }

    let result = match args.method {
        Method::Auto => public::download(&args.file_id, args.output.as_deref(), args.quiet).await,
        Method::Direct => match public::extract_file_id(&args.file_id) {
            Ok(file_id) => {
                public::download_with_id(&file_id, args.output.as_deref(), args.quiet).await
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(path) => {
            println!("✓ Downloaded successfully to: {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            1
        }
    }
}
