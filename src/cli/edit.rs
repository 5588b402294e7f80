use is_terminal::IsTerminal;

use crate::error::{Error, Result};
use crate::model::AppointmentFields;
use crate::store::AppointmentStore;

use super::output::{self, MessageKind};
use super::FieldArgs;

pub fn cmd_edit(store: &AppointmentStore, id: &str, args: FieldArgs) -> Result<()> {
    let existing = store
        .find_by_id(id)
        .ok_or_else(|| Error::AppointmentNotFound(id.to_string()))?;

    // Unset flags keep the stored values, like a prefilled form
    let fields = AppointmentFields {
        owner_name: args.owner.unwrap_or(existing.owner_name),
        pet_name: args.pet.unwrap_or(existing.pet_name),
        species: args.species.unwrap_or(existing.species),
        service_type: args.service.unwrap_or(existing.service_type),
        date: args.date.unwrap_or(existing.date),
        time: args.time.unwrap_or(existing.time),
        notes: args.notes.unwrap_or(existing.notes),
    }
    .trimmed();

    fields.validate()?;

    if !store.update(id, fields)? {
        // The record vanished between the lookup and the write
        return Err(Error::AppointmentNotFound(id.to_string()));
    }

    let use_color = std::io::stdout().is_terminal();
    println!(
        "{}",
        output::render_message(MessageKind::Success, "Appointment updated.", use_color)
    );

    let rows = output::rows(&store.list());
    let mut stdout = std::io::stdout();
    output::render_table(&rows, &mut stdout)?;

    Ok(())
}
