use chrono::NaiveDate;

use crate::web::{AdmissionRow, ContactRow};

const ADMISSION_HEADER: &[&str] = &[
    "ID",
    "Student Name",
    "Father Name",
    "Mother Name",
    "DOB",
    "Gender",
    "Email",
    "Phone",
    "Class",
    "Blood Group",
    "Previous School",
    "Address",
    "Submitted",
];

const CONTACT_HEADER: &[&str] = &[
    "ID", "Name", "Email", "Phone", "Subject", "Message", "Submitted",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Admissions,
    Contacts,
}

impl ExportKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admissions" => Some(Self::Admissions),
            "contacts" => Some(Self::Contacts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admissions => "admissions",
            Self::Contacts => "contacts",
        }
    }
}

/// Export files carry the kind and the export date: `admissions_2026-08-29.csv`.
pub fn csv_filename(kind: ExportKind, date: NaiveDate) -> String {
    format!("{}_{}.csv", kind.as_str(), date.format("%Y-%m-%d"))
}

pub fn admissions_csv(rows: &[AdmissionRow]) -> String {
    let mut out = write_row(ADMISSION_HEADER.iter().map(|h| h.to_string()));
    for row in rows {
        out.push_str(&write_row(
            [
                row.id.to_string(),
                row.student_name.clone(),
                row.father_name.clone(),
                row.mother_name.clone(),
                row.dob.to_string(),
                row.gender.clone(),
                row.email.clone(),
                row.phone.clone(),
                row.class_applying.clone(),
                row.blood_group.clone().unwrap_or_default(),
                row.previous_school.clone().unwrap_or_default(),
                row.address.clone(),
                row.submitted_at.to_rfc3339(),
            ]
            .into_iter(),
        ));
    }
    out
}

pub fn contacts_csv(rows: &[ContactRow]) -> String {
    let mut out = write_row(CONTACT_HEADER.iter().map(|h| h.to_string()));
    for row in rows {
        out.push_str(&write_row(
            [
                row.id.to_string(),
                row.name.clone(),
                row.email.clone(),
                row.phone.clone(),
                row.subject.clone(),
                row.message.clone(),
                row.submitted_at.to_rfc3339(),
            ]
            .into_iter(),
        ));
    }
    out
}

fn write_row(fields: impl Iterator<Item = String>) -> String {
    let mut line = fields
        .map(|field| escape_field(&field))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Fields containing a quote, comma, or newline are wrapped in quotes with
/// embedded quotes doubled, so a standard CSV reader restores the original.
fn escape_field(field: &str) -> String {
    if field.contains('"') || field.contains(',') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn contact(message: &str) -> ContactRow {
        ContactRow {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
            subject: "Hi".to_string(),
            message: message.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(escape_field("Has a \"quote\""), "\"Has a \"\"quote\"\"\"");
    }

    #[test]
    fn wraps_commas_and_newlines() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("a\nb"), "\"a\nb\"");
        assert_eq!(escape_field("plain"), "plain");
    }

    #[test]
    fn contact_export_carries_header_and_escaped_message() {
        let csv = contacts_csv(&[contact("Has a \"quote\"")]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Name,Email,Phone,Subject,Message,Submitted"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\"Has a \"\"quote\"\"\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn escaped_field_round_trips() {
        // Minimal RFC 4180 read-back of a quoted field.
        let original = "line one,\nline \"two\"";
        let escaped = escape_field(original);
        let inner = escaped
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap();
        assert_eq!(inner.replace("\"\"", "\""), original);
    }

    #[test]
    fn filenames_carry_kind_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(
            csv_filename(ExportKind::Admissions, date),
            "admissions_2026-08-29.csv"
        );
        assert_eq!(
            csv_filename(ExportKind::Contacts, date),
            "contacts_2026-08-29.csv"
        );
    }

    #[test]
    fn kind_parses_route_segment() {
        assert_eq!(ExportKind::from_str("admissions"), Some(ExportKind::Admissions));
        assert_eq!(ExportKind::from_str("contacts"), Some(ExportKind::Contacts));
        assert_eq!(ExportKind::from_str("news"), None);
    }
}
