use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;

use crate::error::Result;
use crate::model::{Appointment, AppointmentFields, SERVICES, SPECIES};
use crate::session::EditSession;
use crate::store::AppointmentStore;

use super::output::{self, MessageKind, Row};

const STALE_TARGET_MSG: &str =
    "This appointment no longer exists. It may have been deleted elsewhere.";

pub fn cmd_console(store: &AppointmentStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let use_color = stdout.is_terminal();

    let mut console = Console::new(store, stdin.lock(), stdout.lock(), use_color);
    console.run()
}

/// Interactive front end for the appointment book.
///
/// Owns the edit-mode session: while a target id is set, submitting the
/// form updates that record instead of creating a new one. Input and output
/// are injected so the whole dialog can be driven from tests.
pub struct Console<'a, R, W> {
    store: &'a AppointmentStore,
    session: EditSession,
    rows: Vec<Row>,
    input: R,
    output: W,
    use_color: bool,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(store: &'a AppointmentStore, input: R, output: W, use_color: bool) -> Self {
        Self {
            store,
            session: EditSession::new(),
            rows: Vec::new(),
            input,
            output,
            use_color,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.render()?;
        writeln!(self.output, "Type `help` for the list of commands.")?;

        loop {
            let prompt = if self.session.current().is_some() {
                "editing> "
            } else {
                "> "
            };
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let mut parts = line.split_whitespace();
            let command = parts.next().unwrap_or("");
            let arg = parts.next();

            match command {
                "" => continue,
                "quit" | "exit" => break,
                "help" => self.print_help()?,
                "list" => self.render()?,
                "new" => self.run_form(None)?,
                "edit" => self.begin_edit(arg)?,
                "delete" => self.delete(arg)?,
                "clear" => self.clear()?,
                "cancel" => self.cancel()?,
                _ => self.message(
                    MessageKind::Error,
                    "Unknown command. Type `help` for the list of commands.",
                )?,
            }
        }

        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.output, "Commands:")?;
        writeln!(
            self.output,
            "  new          open the appointment form (updates when in edit mode)"
        )?;
        writeln!(self.output, "  edit <n>     edit the appointment in row n")?;
        writeln!(self.output, "  delete <n>   delete the appointment in row n")?;
        writeln!(self.output, "  clear        delete all appointments")?;
        writeln!(self.output, "  cancel       leave edit mode")?;
        writeln!(self.output, "  list         redraw the table")?;
        writeln!(self.output, "  quit         exit the console")?;
        writeln!(
            self.output,
            "Inside the form, type .cancel to abort at any field."
        )?;
        Ok(())
    }

    /// Full-replace redraw of the appointment table.
    fn render(&mut self) -> Result<()> {
        self.rows = output::rows(&self.store.list());
        output::render_table(&self.rows, &mut self.output)?;
        Ok(())
    }

    fn message(&mut self, kind: MessageKind, text: &str) -> Result<()> {
        writeln!(
            self.output,
            "{}",
            output::render_message(kind, text, self.use_color)
        )?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Map a 1-based row number from the last rendered table to its id.
    fn row_id(&self, arg: Option<&str>) -> Option<String> {
        arg?.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id.clone())
    }

    /// Prompt for one field; `Ok(None)` means the form was cancelled.
    fn prompt_field(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(value) => write!(self.output, "{} [{}]: ", label, value)?,
            None => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(None);
        };

        let value = line.trim();
        if value == ".cancel" {
            return Ok(None);
        }
        if value.is_empty() {
            if let Some(default) = default {
                return Ok(Some(default.to_string()));
            }
        }
        Ok(Some(value.to_string()))
    }

    fn begin_edit(&mut self, arg: Option<&str>) -> Result<()> {
        let Some(id) = self.row_id(arg) else {
            return self.message(MessageKind::Error, "No such row in the table.");
        };

        // Re-fetch fresh; the table may be stale
        let Some(appointment) = self.store.find_by_id(&id) else {
            self.message(MessageKind::Error, STALE_TARGET_MSG)?;
            return self.render();
        };

        self.session.begin(appointment.id.clone());
        self.message(
            MessageKind::Info,
            &format!(
                "Editing the appointment for {}. Press Enter to keep a value, type .cancel to abort.",
                appointment.pet_name
            ),
        )?;

        self.run_form(Some(appointment))
    }

    /// Run the appointment form and submit it.
    ///
    /// With the session holding a target the submission becomes an update;
    /// otherwise it creates. `prefill` supplies the prompt defaults when
    /// editing.
    fn run_form(&mut self, prefill: Option<Appointment>) -> Result<()> {
        let defaults = prefill.map(|a| AppointmentFields::from_appointment(&a));
        let defaults = defaults.as_ref();

        let species_label = format!("Species ({})", SPECIES.join(", "));
        let service_label = format!("Service ({})", SERVICES.join(", "));

        let Some(owner_name) = self.prompt_field("Owner", field_default(defaults, |f| &f.owner_name))? else {
            return self.cancel();
        };
        let Some(pet_name) = self.prompt_field("Pet", field_default(defaults, |f| &f.pet_name))? else {
            return self.cancel();
        };
        let Some(species) = self.prompt_field(&species_label, field_default(defaults, |f| &f.species))? else {
            return self.cancel();
        };
        let Some(service_type) =
            self.prompt_field(&service_label, field_default(defaults, |f| &f.service_type))?
        else {
            return self.cancel();
        };
        let Some(date) =
            self.prompt_field("Date (YYYY-MM-DD)", field_default(defaults, |f| &f.date))?
        else {
            return self.cancel();
        };
        let Some(time) = self.prompt_field("Time (HH:MM)", field_default(defaults, |f| &f.time))? else {
            return self.cancel();
        };
        let Some(notes) =
            self.prompt_field("Notes (optional)", field_default(defaults, |f| &f.notes))?
        else {
            return self.cancel();
        };

        let fields = AppointmentFields {
            owner_name,
            pet_name,
            species,
            service_type,
            date,
            time,
            notes,
        }
        .trimmed();

        let missing = fields.missing_fields();
        if !missing.is_empty() {
            // Edit mode, if active, stays active; nothing was written
            return self.message(
                MessageKind::Error,
                &format!(
                    "Please complete all required fields (missing: {}).",
                    missing.join(", ")
                ),
            );
        }

        match self.session.current().map(str::to_string) {
            Some(id) => {
                if self.store.update(&id, fields)? {
                    self.message(MessageKind::Success, "Appointment updated.")?;
                } else {
                    self.message(MessageKind::Error, STALE_TARGET_MSG)?;
                }
                self.session.end();
            }
            None => {
                self.store.create(fields)?;
                self.message(MessageKind::Success, "Appointment created.")?;
            }
        }

        self.render()
    }

    fn cancel(&mut self) -> Result<()> {
        self.session.end();
        self.message(MessageKind::Info, "Edit mode cancelled.")
    }

    fn delete(&mut self, arg: Option<&str>) -> Result<()> {
        let Some(id) = self.row_id(arg) else {
            return self.message(MessageKind::Error, "No such row in the table.");
        };

        if !self.confirm("Delete this appointment? [y/N] ")? {
            return Ok(());
        }

        if self.store.delete_one(&id)? {
            self.message(MessageKind::Success, "Appointment deleted.")?;
        } else {
            self.message(MessageKind::Error, STALE_TARGET_MSG)?;
        }

        if self.session.current() == Some(id.as_str()) {
            self.session.end();
        }

        self.render()
    }

    fn clear(&mut self) -> Result<()> {
        if !self.confirm("This deletes every stored appointment. Continue? [y/N] ")? {
            return Ok(());
        }

        self.store.delete_all()?;
        self.session.end();
        self.message(MessageKind::Info, "All appointments deleted.")?;
        self.render()
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let Some(answer) = self.read_line()? else {
            return Ok(false);
        };
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Prompt default taken from the record being edited; empty values give none.
fn field_default<'a>(
    defaults: Option<&'a AppointmentFields>,
    get: fn(&AppointmentFields) -> &str,
) -> Option<&'a str> {
    defaults.map(get).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, AppointmentStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = AppointmentStore::new(Storage::new(temp_dir.path().to_path_buf()));
        (temp_dir, store)
    }

    fn seed(store: &AppointmentStore) -> Appointment {
        store
            .create(AppointmentFields {
                owner_name: "Ana".to_string(),
                pet_name: "Rex".to_string(),
                species: "perro".to_string(),
                service_type: "vacunacion".to_string(),
                date: "2024-05-01".to_string(),
                time: "10:00".to_string(),
                notes: String::new(),
            })
            .unwrap()
    }

    fn run_console(store: &AppointmentStore, script: &str) -> String {
        let mut console = Console::new(store, Cursor::new(script.to_string()), Vec::new(), false);
        console.run().unwrap();
        String::from_utf8(console.output).unwrap()
    }

    #[test]
    fn test_create_flow() {
        let (_dir, store) = test_store();

        let script = "new\nAna\nRex\nperro\nvacunacion\n2024-05-01\n10:00\n\nquit\n";
        let out = run_console(&store, script);

        assert!(out.contains("Appointment created."));
        assert!(out.contains("Vacunación"));

        let all = store.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].owner_name, "Ana");
        assert_eq!(all[0].notes, "");
        assert!(!all[0].id.is_empty());
        assert!(!all[0].created_at.is_empty());
    }

    #[test]
    fn test_empty_state_rendered() {
        let (_dir, store) = test_store();
        let out = run_console(&store, "quit\n");
        assert!(out.contains("No appointments scheduled."));
    }

    #[test]
    fn test_validation_failure_aborts_without_writing() {
        let (_dir, store) = test_store();

        // Pet left empty
        let script = "new\nAna\n\nperro\nvacunacion\n2024-05-01\n10:00\n\nquit\n";
        let out = run_console(&store, script);

        assert!(out.contains("missing: pet"));
        assert!(!out.contains("Appointment created."));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_edit_flow_keeps_unchanged_fields() {
        let (_dir, store) = test_store();
        let created = seed(&store);

        // Change the owner, keep everything else by pressing Enter
        let script = "edit 1\nMaría\n\n\n\n\n\n\nquit\n";
        let out = run_console(&store, script);

        assert!(out.contains("Editing the appointment for Rex."));
        assert!(out.contains("Appointment updated."));

        let all = store.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].owner_name, "María");
        assert_eq!(all[0].pet_name, "Rex");
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].created_at, created.created_at);
    }

    #[test]
    fn test_stale_edit_target_reports_and_resets() {
        let (_dir, store) = test_store();
        let created = seed(&store);

        // Simulate another actor deleting the record mid-edit: the session
        // targets an id that is gone by the time the form is submitted.
        let script = "Ana\nRex\nperro\ncontrol\n2024-05-02\n11:00\n\n";
        let mut console = Console::new(&store, Cursor::new(script.to_string()), Vec::new(), false);
        console.session.begin(created.id.clone());
        store.delete_one(&created.id).unwrap();

        console.run_form(Some(created)).unwrap();
        let out = String::from_utf8(console.output.clone()).unwrap();

        assert!(out.contains("no longer exists"));
        assert_eq!(console.session.current(), None);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_form_cancel_resets_session() {
        let (_dir, store) = test_store();
        seed(&store);

        let script = "edit 1\n.cancel\nquit\n";
        let mut console = Console::new(&store, Cursor::new(script.to_string()), Vec::new(), false);
        console.run().unwrap();
        let out = String::from_utf8(console.output.clone()).unwrap();

        assert!(out.contains("Edit mode cancelled."));
        assert_eq!(console.session.current(), None);
        assert_eq!(store.list()[0].owner_name, "Ana");
    }

    #[test]
    fn test_validation_failure_keeps_edit_mode() {
        let (_dir, store) = test_store();
        let created = seed(&store);

        // A submission with a blank required field fails and must not drop
        // the pending edit target
        let script = "Ana\n\nperro\ncontrol\n2024-05-02\n11:00\n\n";
        let mut console = Console::new(&store, Cursor::new(script.to_string()), Vec::new(), false);
        console.session.begin(created.id.clone());

        console.run_form(None).unwrap();
        let out = String::from_utf8(console.output.clone()).unwrap();

        assert!(out.contains("missing: pet"));
        assert_eq!(console.session.current(), Some(created.id.as_str()));
        assert_eq!(store.list()[0].owner_name, "Ana");
    }

    #[test]
    fn test_delete_confirmed() {
        let (_dir, store) = test_store();
        seed(&store);

        let out = run_console(&store, "delete 1\ny\nquit\n");

        assert!(out.contains("Appointment deleted."));
        assert!(store.list().is_empty());
        assert!(out.contains("No appointments scheduled."));
    }

    #[test]
    fn test_delete_declined_leaves_state_untouched() {
        let (_dir, store) = test_store();
        seed(&store);

        let out = run_console(&store, "delete 1\nn\nquit\n");

        assert!(!out.contains("Appointment deleted."));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_delete_of_edit_target_resets_session() {
        let (_dir, store) = test_store();
        let created = seed(&store);

        let script = "delete 1\ny\nquit\n";
        let mut console = Console::new(&store, Cursor::new(script.to_string()), Vec::new(), false);
        console.session.begin(created.id);
        console.run().unwrap();

        assert_eq!(console.session.current(), None);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_clear_confirmed() {
        let (_dir, store) = test_store();
        seed(&store);
        seed(&store);

        let out = run_console(&store, "clear\ny\nquit\n");

        assert!(out.contains("All appointments deleted."));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_clear_declined() {
        let (_dir, store) = test_store();
        seed(&store);

        let out = run_console(&store, "clear\nn\nquit\n");

        assert!(!out.contains("All appointments deleted."));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_unknown_command_and_bad_row() {
        let (_dir, store) = test_store();

        let out = run_console(&store, "frobnicate\nedit 7\nquit\n");

        assert!(out.contains("Unknown command."));
        assert!(out.contains("No such row in the table."));
    }

    #[test]
    fn test_eof_ends_console() {
        let (_dir, store) = test_store();
        let out = run_console(&store, "");
        assert!(out.contains("No appointments scheduled."));
    }
}
