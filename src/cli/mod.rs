mod add;
mod console;
mod delete;
mod edit;
mod list;
pub mod output;

use crate::config;
use crate::error::Result;
use crate::storage::Storage;
use crate::store::AppointmentStore;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "turnero")]
#[command(about = "Manage veterinary clinic appointments from the terminal", long_about = None)]
pub struct Cli {
    /// Custom data directory (overrides TURNERO_HOME and the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List appointments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Filter by raw service value (e.g. vacunacion)
        #[arg(long)]
        service: Option<String>,
    },

    /// Create an appointment
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing appointment (unset flags keep the stored values)
    Edit {
        /// Appointment ID
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete one appointment
    Delete {
        /// Appointment ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete all appointments
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Interactive appointment console
    Console,
}

/// Appointment field flags shared by `add` and `edit`
#[derive(Args)]
pub struct FieldArgs {
    /// Owner name
    #[arg(long)]
    pub owner: Option<String>,

    /// Pet name
    #[arg(long)]
    pub pet: Option<String>,

    /// Species (perro, gato, ave, conejo, otro)
    #[arg(long)]
    pub species: Option<String>,

    /// Service (consulta-general, vacunacion, control, nutricion)
    #[arg(long)]
    pub service: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir)?;
    let store = AppointmentStore::new(Storage::new(data_dir));

    match cli.command {
        Commands::List {
            json,
            date,
            service,
        } => list::cmd_list(&store, json, date, service),
        Commands::Add { fields } => add::cmd_add(&store, fields),
        Commands::Edit { id, fields } => edit::cmd_edit(&store, &id, fields),
        Commands::Delete { id, yes } => delete::cmd_delete(&store, &id, yes),
        Commands::Clear { yes } => delete::cmd_clear(&store, yes),
        Commands::Console => console::cmd_console(&store),
    }
}
