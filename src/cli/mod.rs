//! Command-line interface for study-organizer
//!
//! `serve` runs the HTTP server; every other command is a client of a
//! running server at `--api-url`.

use std::future::Future;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::{ApiClient, Session};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::task::TaskId;
use crate::ui::chart::TextCharts;

mod dashboard;
mod serve;
mod task;

/// study-organizer - a study task tracker
///
/// Serves a small task API with a dashboard, and talks to it from the
/// terminal.
#[derive(Parser, Debug)]
#[command(name = "study-organizer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./study-organizer.toml, then the user config dir)
    #[arg(long, global = true, env = "STUDY_ORGANIZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the task API
    #[arg(long, global = true, env = "STUDY_ORGANIZER_API")]
    pub api_url: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the task API and dashboard server
    Serve {
        /// Address to bind
        #[arg(long, env = "STUDY_ORGANIZER_HOST")]
        host: Option<String>,

        /// Port to bind
        #[arg(long, env = "STUDY_ORGANIZER_PORT")]
        port: Option<u16>,

        /// Disable cross-origin requests
        #[arg(long)]
        no_cors: bool,
    },

    /// List tasks, sorted and filtered
    List {
        /// all, completed or pending
        #[arg(long, default_value = "all")]
        filter: String,

        /// Case-insensitive search over title and description
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long, short)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Change the title, description or due date of a task
    Edit {
        /// Task id
        id: TaskId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Flip a task between pending and completed
    Toggle {
        /// Task id
        id: TaskId,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: TaskId,
    },

    /// Show stats, timeline and charts
    Dashboard {
        /// all, completed or pending
        #[arg(long, default_value = "all")]
        filter: String,

        /// Case-insensitive search over title and description
        #[arg(long, short)]
        search: Option<String>,

        /// Print the dashboard page as HTML
        #[arg(long)]
        html: bool,
    },

    /// Check that the server is reachable
    Ping,
}

/// Resolved configuration plus output flags, shared by every command.
pub struct Context {
    pub config: Config,
    pub output: OutputOptions,
}

impl Context {
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.client)
    }

    pub fn session(&self) -> Result<Session<TextCharts>> {
        Ok(Session::new(
            self.client()?,
            TextCharts::new(),
            self.config.dashboard,
        ))
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let mut config = Config::resolve(self.config.as_deref())?;
        if let Some(api_url) = self.api_url {
            config.client.api_url = api_url;
            config.validate()?;
        }
        let context = Context {
            config,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
        };

        match self.command {
            Commands::Serve {
                host,
                port,
                no_cors,
            } => serve::run(
                context,
                serve::ServeOptions {
                    host,
                    port,
                    no_cors,
                },
            ),
            Commands::List { filter, search } => block_on(task::run_list(
                &context,
                task::ListOptions {
                    filter: filter.parse()?,
                    search: search.unwrap_or_default(),
                },
            )),
            Commands::Add {
                title,
                description,
                due,
            } => block_on(task::run_add(
                &context,
                task::AddOptions {
                    title,
                    description,
                    due,
                },
            )),
            Commands::Edit {
                id,
                title,
                description,
                due,
                clear_due,
            } => block_on(task::run_edit(
                &context,
                task::EditOptions {
                    id,
                    title,
                    description,
                    due,
                    clear_due,
                },
            )),
            Commands::Toggle { id } => block_on(task::run_toggle(&context, id)),
            Commands::Delete { id } => block_on(task::run_delete(&context, id)),
            Commands::Dashboard {
                filter,
                search,
                html,
            } => block_on(dashboard::run(
                &context,
                dashboard::DashboardOptions {
                    filter: filter.parse()?,
                    search: search.unwrap_or_default(),
                    html,
                },
            )),
            Commands::Ping => block_on(task::run_ping(&context)),
        }
    }
}

/// Drive a client command on a single-threaded runtime.
fn block_on<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
