use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Species offered by the clinic's booking form.
pub const SPECIES: &[&str] = &["perro", "gato", "ave", "conejo", "otro"];

/// Services offered by the clinic's booking form.
pub const SERVICES: &[&str] = &["consulta-general", "vacunacion", "control", "nutricion"];

/// A single scheduled clinic visit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique identifier, immutable after creation
    pub id: String,

    /// Name of the pet's owner
    pub owner_name: String,

    /// Name of the pet
    pub pet_name: String,

    /// Raw species value (one of SPECIES for records entered through the form)
    pub species: String,

    /// Raw service value; drives the display label
    pub service_type: String,

    /// Appointment date (YYYY-MM-DD)
    pub date: String,

    /// Appointment time (HH:MM)
    pub time: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Creation timestamp (RFC 3339), never modified
    pub created_at: String,
}

/// Field values submitted for a create or an update.
///
/// Everything mutable about an appointment lives here; `id` and `created_at`
/// are assigned by the store and never pass through this struct.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFields {
    pub owner_name: String,
    pub pet_name: String,
    pub species: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub notes: String,
}

impl AppointmentFields {
    /// Trim whitespace from every text field.
    pub fn trimmed(self) -> Self {
        Self {
            owner_name: self.owner_name.trim().to_string(),
            pet_name: self.pet_name.trim().to_string(),
            species: self.species.trim().to_string(),
            service_type: self.service_type.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.owner_name.is_empty() {
            missing.push("owner");
        }
        if self.pet_name.is_empty() {
            missing.push("pet");
        }
        if self.species.is_empty() {
            missing.push("species");
        }
        if self.service_type.is_empty() {
            missing.push("service");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        if self.time.is_empty() {
            missing.push("time");
        }
        missing
    }

    /// Validate that all six required fields are non-empty.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(missing.join(", ")))
        }
    }

    /// Field values of an existing appointment, used to prefill an edit.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            owner_name: appointment.owner_name.clone(),
            pet_name: appointment.pet_name.clone(),
            species: appointment.species.clone(),
            service_type: appointment.service_type.clone(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            notes: appointment.notes.clone(),
        }
    }
}
