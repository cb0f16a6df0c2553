use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "sekai",
    bin_name = "sekai",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Personal manga collection manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base data directory (overrides SEKAI_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the collection, ordered by title
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show one manga
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Manga id, as shown by `list`
        id: String,
    },

    /// Add a manga
    #[command(alias = "n", display_order = 3)]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a manga; only the given fields change
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Manga id, as shown by `list`
        id: String,

        #[command(flatten)]
        fields: FieldArgs,

        /// Remove the cover image reference
        #[arg(long, conflicts_with = "cover")]
        no_cover: bool,
    },

    /// Delete a manga
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Manga id, as shown by `list`
        id: String,
    },

    /// Print where the collection is stored
    #[command(display_order = 6)]
    Path,
}

/// Form fields. Values are passed through as typed; the form validates them.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub author: Option<String>,

    /// Publication year
    #[arg(short, long, allow_hyphen_values = true)]
    pub year: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Cover image reference (a path or URI, never the image itself)
    #[arg(short, long, value_name = "URI")]
    pub cover: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.description.is_none()
            && self.cover.is_none()
    }
}
