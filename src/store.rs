use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Appointment, AppointmentFields};
use crate::storage::Storage;

/// Repository over the persisted appointment collection.
///
/// Every mutating operation reads the collection fresh from storage,
/// transforms it in memory and writes the whole collection back, so storage
/// stays the single source of truth even when another process touched the
/// file in between.
pub struct AppointmentStore {
    storage: Storage,
}

impl AppointmentStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All appointments, in insertion order.
    pub fn list(&self) -> Vec<Appointment> {
        self.storage.load()
    }

    /// Find an appointment by exact id.
    pub fn find_by_id(&self, id: &str) -> Option<Appointment> {
        self.storage.load().into_iter().find(|a| a.id == id)
    }

    /// Create a new appointment from submitted fields and append it.
    pub fn create(&self, fields: AppointmentFields) -> Result<Appointment> {
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            owner_name: fields.owner_name,
            pet_name: fields.pet_name,
            species: fields.species,
            service_type: fields.service_type,
            date: fields.date,
            time: fields.time,
            notes: fields.notes,
            created_at: Utc::now().to_rfc3339(),
        };

        let mut appointments = self.storage.load();
        appointments.push(appointment.clone());
        self.storage.save(&appointments)?;

        Ok(appointment)
    }

    /// Replace the mutable fields of the appointment with the given id.
    ///
    /// `id` and `created_at` are kept; the record stays at its position in
    /// the collection. Returns `Ok(false)` when no record has that id — the
    /// edit target may have been deleted by another actor.
    pub fn update(&self, id: &str, fields: AppointmentFields) -> Result<bool> {
        let mut appointments = self.storage.load();

        let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };

        appointment.owner_name = fields.owner_name;
        appointment.pet_name = fields.pet_name;
        appointment.species = fields.species;
        appointment.service_type = fields.service_type;
        appointment.date = fields.date;
        appointment.time = fields.time;
        appointment.notes = fields.notes;

        self.storage.save(&appointments)?;
        Ok(true)
    }

    /// Remove the appointment with the given id.
    ///
    /// Returns whether a record was actually removed.
    pub fn delete_one(&self, id: &str) -> Result<bool> {
        let mut appointments = self.storage.load();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);

        if appointments.len() == before {
            return Ok(false);
        }

        self.storage.save(&appointments)?;
        Ok(true)
    }

    /// Remove every appointment and the stored file with them.
    pub fn delete_all(&self) -> Result<()> {
        self.storage.clear()
    }
}
