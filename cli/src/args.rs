//! CLI argument definitions using clap
//!
//! Commands:
//! - item-admin login --username <name>
//! - item-admin logout
//! - item-admin list [--page N] [--page-size N]
//! - item-admin show <id>
//! - item-admin create --name <name> --price <price> [--description <text>]
//! - item-admin update <id> [--name] [--price] [--description]
//! - item-admin delete <id> [--yes]

use clap::{Parser, Subcommand};

/// Manage the item catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "item-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the item API
    #[arg(long, global = true, env = "ITEM_ADMIN_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exchange credentials for a session token
    Login {
        #[arg(long, short)]
        username: String,

        #[arg(long, short, env = "ITEM_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// List items one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Rows per page (defaults to ITEM_ADMIN_PAGE_SIZE or 5)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show a single item
    Show {
        /// Item identifier
        id: String,
    },

    /// Create a new item
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Price, e.g. 12.50
        #[arg(long)]
        price: String,
    },

    /// Edit an existing item; omitted fields keep their current value
    Update {
        /// Item identifier
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,
    },

    /// Delete an item
    Delete {
        /// Item identifier
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create() {
        let cli = Cli::try_parse_from([
            "item-admin", "create", "--name", "Lamp", "--price", "12.50",
        ])
        .unwrap();
        match cli.command {
            Command::Create {
                name,
                description,
                price,
            } => {
                assert_eq!(name, "Lamp");
                assert!(description.is_none());
                assert_eq!(price, "12.50");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_list_defaults() {
        let cli = Cli::try_parse_from(["item-admin", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                page: 1,
                page_size: None
            }
        ));
    }

    #[test]
    fn parses_delete_with_confirmation_flag() {
        let cli = Cli::try_parse_from(["item-admin", "delete", "4", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { ref id, yes: true } if id == "4"));
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
