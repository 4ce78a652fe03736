use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "simple-mercari")]
#[command(about = "Terminal front end for the Simple Mercari marketplace")]
#[command(version)]
pub struct Cli {
    /// Backend origin, overrides MERCARI_BACKEND_URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Launch the interactive item browser and listing form
    Tui,

    /// Print every listed item
    List,

    /// Print a single item
    Show {
        /// Item id
        id: i64,
    },

    /// List a new item
    Add {
        /// Item name
        #[arg(short, long)]
        name: String,

        /// Item category
        #[arg(short, long, default_value = "")]
        category: String,

        /// Image file to upload
        #[arg(short, long)]
        image: PathBuf,
    },
}

impl Cli {
    /// The command to run; no subcommand means the TUI
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["simple-mercari"]).unwrap();
        assert_eq!(cli.command(), Commands::Tui);
        assert!(cli.backend_url.is_none());
    }

    #[test]
    fn test_add_with_global_backend_url() {
        let cli = Cli::try_parse_from([
            "simple-mercari",
            "add",
            "--name",
            "Chair",
            "--image",
            "chair.jpg",
            "--backend-url",
            "http://127.0.0.1:9001",
        ])
        .unwrap();

        assert_eq!(cli.backend_url.as_deref(), Some("http://127.0.0.1:9001"));
        assert_eq!(
            cli.command(),
            Commands::Add {
                name: "Chair".to_string(),
                category: String::new(),
                image: PathBuf::from("chair.jpg"),
            }
        );
    }

    #[test]
    fn test_add_requires_image() {
        assert!(Cli::try_parse_from(["simple-mercari", "add", "--name", "Chair"]).is_err());
    }
}
