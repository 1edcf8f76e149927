pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{domain::Id, utils::config::DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "music-library", version, about = "Browse and manage a music CD catalog")]
pub struct Cli {
    /// Path of the TOML configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// List every CD
    List,

    /// Show a single CD
    Show {
        #[arg(value_parser = Id::parse)]
        id: Id
    },

    ByArtist { artist: String },

    ByName { name: String },

    ByPublisher { username: String },

    /// Add a CD, owned by the logged in publisher
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[command(flatten)]
        cd: CdArgs,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool
    },

    /// Change the fields of a CD you published. Omitted fields keep their value.
    Update {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(value_parser = Id::parse)]
        id: Id,

        #[command(flatten)]
        changes: CdChanges,

        #[arg(long, short)]
        yes: bool
    },

    /// Remove a CD you published
    Remove {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(value_parser = Id::parse)]
        id: Id,

        #[arg(long, short)]
        yes: bool
    }
}

#[derive(Args)]
pub struct Credentials {
    #[arg(long, short)]
    pub username: String,

    #[arg(long, short)]
    pub password: String
}

#[derive(Args)]
pub struct CdArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub artist: String,

    #[arg(long)]
    pub record_company: String,

    #[arg(long)]
    pub genre: String,

    #[arg(long)]
    pub ean_code: String,

    /// Price in euro, e.g. 12.50
    #[arg(long)]
    pub price: String
}

#[derive(Args, Default)]
pub struct CdChanges {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    #[arg(long)]
    pub record_company: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub ean_code: Option<String>,

    #[arg(long)]
    pub price: Option<String>
}
