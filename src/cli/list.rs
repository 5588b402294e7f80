use crate::error::Result;
use crate::store::AppointmentStore;

use super::output;

pub fn cmd_list(
    store: &AppointmentStore,
    json: bool,
    date_filter: Option<String>,
    service_filter: Option<String>,
) -> Result<()> {
    let mut appointments = store.list();

    if let Some(date) = date_filter {
        appointments.retain(|a| a.date == date);
    }

    if let Some(service) = service_filter {
        appointments.retain(|a| a.service_type == service);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&appointments)?);
        return Ok(());
    }

    let rows = output::rows(&appointments);
    let mut stdout = std::io::stdout();
    output::render_table(&rows, &mut stdout)?;

    Ok(())
}
