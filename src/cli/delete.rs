use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;

use crate::error::{Error, Result};
use crate::store::AppointmentStore;

use super::output::{self, MessageKind};

pub fn cmd_delete(store: &AppointmentStore, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete this appointment? [y/N] ")? {
        return Ok(());
    }

    if !store.delete_one(id)? {
        return Err(Error::AppointmentNotFound(id.to_string()));
    }

    let use_color = std::io::stdout().is_terminal();
    println!(
        "{}",
        output::render_message(MessageKind::Success, "Appointment deleted.", use_color)
    );

    let rows = output::rows(&store.list());
    let mut stdout = std::io::stdout();
    output::render_table(&rows, &mut stdout)?;

    Ok(())
}

pub fn cmd_clear(store: &AppointmentStore, yes: bool) -> Result<()> {
    if !yes && !confirm("This deletes every stored appointment. Continue? [y/N] ")? {
        return Ok(());
    }

    store.delete_all()?;

    let use_color = std::io::stdout().is_terminal();
    println!(
        "{}",
        output::render_message(MessageKind::Info, "All appointments deleted.", use_color)
    );

    let rows = output::rows(&store.list());
    let mut stdout = std::io::stdout();
    output::render_table(&rows, &mut stdout)?;

    Ok(())
}

/// Blocking yes/no prompt on stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
