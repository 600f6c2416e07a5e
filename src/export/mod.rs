pub mod csv;
pub mod pdf;

pub use csv::{ExportKind, admissions_csv, contacts_csv, csv_filename};
pub use pdf::{pdf_filename, render_admission_pdf};
