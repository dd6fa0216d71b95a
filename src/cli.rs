use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clario", about = "Terminal client for the Clario todo backend")]
pub struct Cli {
    /// Backend base URL [default: http://localhost:8080/api]
    #[arg(long, env = "CLARIO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Launches the interactive board when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all todos, sorted by priority
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a todo
    Add {
        /// Todo title
        title: String,
        /// Longer description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Due date (yyyy-MM-dd)
        #[arg(long)]
        due: Option<String>,
    },

    /// Flip a todo's completed flag
    Toggle {
        /// Todo id
        id: String,
    },

    /// Delete a todo
    Rm {
        /// Todo id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Launch the interactive board (the default)
    Board,
}
