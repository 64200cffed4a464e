use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coursekit", bin_name = "coursekit", version)]
#[command(about = "Organize course modules, links and files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $COURSEKIT_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true, help_heading = "Options")]
    pub yes: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the course outline (default)
    #[command(alias = "ls")]
    List,

    /// Filter modules and resources by title, url or file name
    Search {
        query: String,
    },

    /// Manage modules
    #[command(subcommand)]
    Module(ModuleCommands),

    /// Add links
    #[command(subcommand)]
    Link(LinkCommands),

    /// Add files (metadata only)
    #[command(subcommand)]
    File(FileCommands),

    /// Edit a resource's title, or a link's url
    Edit {
        /// Resource id or title
        resource: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        url: Option<String>,
    },

    /// Delete a resource
    #[command(alias = "delete")]
    Rm {
        /// Resource id or title
        resource: String,
    },

    /// Move a resource into a module, or back with `top`
    Mv {
        /// Resource id or title
        resource: String,

        /// Module position or id, or `top`
        destination: String,
    },

    /// Verify and repair stored data
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    /// Create a module
    Add { name: String },

    /// Rename a module
    Rename {
        /// Module position or id
        module: String,
        name: String,
    },

    /// Delete a module; its resources become unassigned
    #[command(alias = "delete")]
    Rm {
        /// Module position or id
        module: String,
    },

    /// Move a module to a new position
    Mv {
        /// Module position or id
        module: String,
        /// New 1-based position
        position: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Add a link
    Add {
        title: String,
        url: String,

        /// Module position or id to add it to
        #[arg(short, long)]
        module: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Add a file by path; only its name, size and type are stored
    Add {
        path: PathBuf,

        /// Title (default: file name without extension)
        #[arg(short, long)]
        title: Option<String>,

        /// Module position or id to add it to
        #[arg(short, long)]
        module: Option<String>,
    },
}
