//! # drivelib
//!
//! Rust client library for Google Drive, built for two command-line
//! workflows: fetching single shared files and mirroring local directory
//! trees into Drive.
//!
//! ## Features
//!
//! - **Authentication**: OAuth installed-app flow with an on-disk token
//!   cache, or non-interactive service-account keys.
//! - **Tree mirroring**: recreate a local directory hierarchy remotely,
//!   one folder per directory and one file node per file, with optional
//!   flattening into a single folder.
//! - **File transfers**:
//!   - Chunked resumable-protocol uploads with progress callbacks.
//!   - Streamed public-link downloads, including the large-file
//!     confirmation step, with percentage progress.
//! - **Browsing**: list folders at the Drive root.
//!
//! All remote calls go through a single authenticated [`Session`], used
//! strictly sequentially; the first error aborts the operation at hand.
//!
//! ## Example: Mirror a folder
//!
//! ```no_run
//! use drivelib::{AuthConfig, Session};
//!
//! # async fn example() -> drivelib::Result<()> {
//! let mut session = Session::connect(&AuthConfig::default()).await?;
//!
//! // Upload ./photos and everything under it, keeping the structure.
//! let folder_id = session.mirror_folder("photos", None, true).await?;
//! println!("Created folder {}", folder_id);
//!
//! for folder in session.list_folders(10).await? {
//!     println!("{} ({})", folder.name, folder.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Fetch a shared file
//!
//! ```no_run
//! # async fn example() -> drivelib::Result<()> {
//! let path = drivelib::public::download(
//!     "https://drive.google.com/file/d/1a2B3c4D/view?usp=sharing",
//!     None,
//!     false,
//! )
//! .await?;
//! println!("Saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod fs;
pub mod http;
pub mod progress;
pub mod public;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthConfig, DRIVE_SCOPE};
pub use error::{DriveError, Result};
pub use fs::{mirror_tree, Node, NodeKind, RemoteStore};
pub use progress::{make_progress_bar, ProgressCallback, TransferProgress};
pub use public::{download, download_with_id, extract_file_id};
pub use session::Session;
