use std::io::{self, Write};

use nu_ansi_term::Color;

use crate::model::Appointment;

/// One displayed appointment row.
///
/// Carries the full id so edit/delete triggers can reference the exact
/// record; the table itself shows a shortened form.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: String,
    pub owner: String,
    pub pet: String,
    pub species: String,
    pub service: String,
    pub date: String,
    pub time: String,
}

/// Project appointments into display rows, in collection order.
pub fn rows(appointments: &[Appointment]) -> Vec<Row> {
    appointments
        .iter()
        .map(|a| Row {
            id: a.id.clone(),
            owner: a.owner_name.clone(),
            pet: a.pet_name.clone(),
            species: capitalize(&a.species),
            service: service_label(&a.service_type),
            date: a.date.clone(),
            time: a.time.clone(),
        })
        .collect()
}

/// Human-readable label for a raw service value.
pub fn service_label(service: &str) -> String {
    match service {
        "consulta-general" => "Consulta general".to_string(),
        "vacunacion" => "Vacunación".to_string(),
        "control" => "Control de rutina".to_string(),
        "nutricion" => "Asesoramiento nutricional".to_string(),
        other => capitalize(other),
    }
}

/// Capitalize the first character of a raw value.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_id_short(id: &str) -> String {
    // Take first 8 characters of ID
    if id.len() > 8 {
        id[..8].to_string()
    } else {
        id.to_string()
    }
}

/// Render the full table, replacing whatever was shown before.
pub fn render_table(rows: &[Row], out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;

    if rows.is_empty() {
        writeln!(out, "No appointments scheduled.")?;
        writeln!(out)?;
        return Ok(());
    }

    let headers = ["#", "ID", "OWNER", "PET", "SPECIES", "SERVICE", "DATE", "TIME"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    let cells: Vec<[String; 8]> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            [
                (i + 1).to_string(),
                format_id_short(&row.id),
                row.owner.clone(),
                row.pet.clone(),
                row.species.clone(),
                row.service.clone(),
                row.date.clone(),
                row.time.clone(),
            ]
        })
        .collect();

    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    write_row(out, &headers.map(String::from), &widths)?;
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    writeln!(out, "{}", "-".repeat(total))?;

    for row in &cells {
        write_row(out, row, &widths)?;
    }
    writeln!(out)?;

    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String; 8], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths[i] - cell.chars().count();
        line.push_str(cell);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// Kind of user-facing outcome message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// Format an outcome message, colored when the target is a terminal.
pub fn render_message(kind: MessageKind, text: &str, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }

    match kind {
        MessageKind::Success => Color::Green.paint(text).to_string(),
        MessageKind::Error => Color::Red.paint(text).to_string(),
        MessageKind::Info => Color::Cyan.paint(text).to_string(),
    }
}
