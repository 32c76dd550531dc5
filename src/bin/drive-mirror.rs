//! Upload a local directory tree to Google Drive, mirroring its structure.

use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};

use drivelib::{make_progress_bar, AuthConfig, Session};

#[derive(Parser)]
#[command(
    name = "drive-mirror",
    version,
    about = "Upload folders to Google Drive",
    after_help = "Examples:\n  \
        drive-mirror path/to/folder\n  \
        drive-mirror path/to/folder --parent-id FOLDER_ID\n  \
        drive-mirror path/to/folder --service-account sa.json\n  \
        drive-mirror path/to/folder --no-structure\n  \
        drive-mirror --list"
)]
struct Args {
    /// Local folder path to upload
    folder: Option<PathBuf>,

    /// Drive folder ID to upload into
    #[arg(short, long)]
    parent_id: Option<String>,

    /// Path to the OAuth client credentials file
    #[arg(short, long, default_value = "credentials.json")]
    creds: PathBuf,

    /// Path to a service account key file
    #[arg(short = 's', long, alias = "sa")]
    service_account: Option<PathBuf>,

    /// Don't preserve folder structure; upload every file into the
    /// top-level folder
    #[arg(long)]
    no_structure: bool,

    /// List folders in the Drive root
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() {
    process::exit(run(Args::parse()).await);
}

async fn run(args: Args) -> i32 {
    if args.folder.is_none() && !args.list {
        let _ = Args::command().print_help();
        return 1;
    }

    let config = AuthConfig {
        credentials: args.creds,
        service_account: args.service_account,
        ..AuthConfig::default()
    };

    let mut session = match Session::connect(&config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("✗ {}", e);
            return 1;
        }
    };

    if args.list {
        match session.list_folders(10).await {
            Ok(folders) => {
                println!("Folders in Google Drive:");
                for folder in folders {
                    println!("  {} (ID: {})", folder.name, folder.id);
                }
                0
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                1
            }
        }
    } else {
        let Some(folder) = args.folder else {
            return 1; // handled above, before authenticating
        };

        session.set_progress_callback(make_progress_bar());

        println!("Starting upload of: {}", folder.display());
        match session
            .mirror_folder(&folder, args.parent_id.as_deref(), !args.no_structure)
            .await
        {
            Ok(folder_id) => {
                println!("✓ Upload completed successfully! (folder ID: {})", folder_id);
                0
            }
            Err(e) => {
                eprintln!("✗ Upload failed: {}", e);
                1
            }
        }
    }
}
