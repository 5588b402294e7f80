use is_terminal::IsTerminal;

use crate::error::Result;
use crate::model::AppointmentFields;
use crate::store::AppointmentStore;

use super::output::{self, MessageKind};
use super::FieldArgs;

pub fn cmd_add(store: &AppointmentStore, args: FieldArgs) -> Result<()> {
    let fields = AppointmentFields {
        owner_name: args.owner.unwrap_or_default(),
        pet_name: args.pet.unwrap_or_default(),
        species: args.species.unwrap_or_default(),
        service_type: args.service.unwrap_or_default(),
        date: args.date.unwrap_or_default(),
        time: args.time.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    }
    .trimmed();

    fields.validate()?;

    let created = store.create(fields)?;

    let use_color = std::io::stdout().is_terminal();
    println!(
        "{}",
        output::render_message(MessageKind::Success, "Appointment created.", use_color)
    );
    println!("ID: {}", created.id);

    let rows = output::rows(&store.list());
    let mut stdout = std::io::stdout();
    output::render_table(&rows, &mut stdout)?;

    Ok(())
}
