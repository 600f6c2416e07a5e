use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use docx_rs::{AlignmentType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use tokio::task;
use uuid::Uuid;

use crate::web::AdmissionRow;
use crate::web::templates::{SCHOOL_ADDRESS, SCHOOL_EMAIL, SCHOOL_NAME, SCHOOL_PHONE};

pub fn pdf_filename(admission_id: i64) -> String {
    format!("admission_form_{admission_id}.pdf")
}

/// Render one admission into PDF bytes. The form is assembled as DOCX and
/// converted through a headless LibreOffice run in a scratch directory that is
/// removed once the bytes are read.
pub async fn render_admission_pdf(admission: &AdmissionRow) -> Result<Vec<u8>> {
    let work_dir = std::env::temp_dir().join(format!("admission-form-{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&work_dir)
        .await
        .with_context(|| format!("failed to create scratch dir {}", work_dir.display()))?;

    let result = render_in_dir(admission.clone(), work_dir.clone()).await;

    if let Err(err) = tokio::fs::remove_dir_all(&work_dir).await {
        tracing::warn!(?err, dir = %work_dir.display(), "failed to remove scratch dir");
    }

    result
}

async fn render_in_dir(admission: AdmissionRow, work_dir: PathBuf) -> Result<Vec<u8>> {
    let docx_path = work_dir.join(format!("admission_form_{}.docx", admission.id));

    let build_path = docx_path.clone();
    task::spawn_blocking(move || build_admission_docx(&admission, &build_path))
        .await
        .context("admission form build task failed")??;

    let pdf_path = convert_to_pdf(&docx_path).await?;

    tokio::fs::read(&pdf_path)
        .await
        .with_context(|| format!("failed to read converted PDF at {}", pdf_path.display()))
}

async fn convert_to_pdf(docx_path: &Path) -> Result<PathBuf> {
    let output_dir = docx_path
        .parent()
        .ok_or_else(|| anyhow!("invalid form path: missing parent directory"))?
        .to_path_buf();
    let source = docx_path.to_path_buf();

    let output = task::spawn_blocking(move || {
        Command::new("libreoffice")
            .args([
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                &output_dir.to_string_lossy(),
                &source.to_string_lossy(),
            ])
            .output()
    })
    .await
    .context("PDF conversion task failed")?
    .context("failed to execute libreoffice")?;

    if !output.status.success() {
        return Err(anyhow!(
            "libreoffice conversion failed with status {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let pdf_path = docx_path.with_extension("pdf");
    if !pdf_path.exists() {
        return Err(anyhow!(
            "converted PDF missing at expected path {}",
            pdf_path.display()
        ));
    }

    Ok(pdf_path)
}

/// Section ordering is the layout contract: letterhead, form title, application
/// metadata, student information, academic information, contact information,
/// office-use block, signature block, footer.
pub fn build_admission_docx(admission: &AdmissionRow, path: &Path) -> Result<()> {
    let mut docx = Docx::new()
        .add_paragraph(centered(SCHOOL_NAME, 40, true))
        .add_paragraph(centered(SCHOOL_ADDRESS, 22, false))
        .add_paragraph(Paragraph::new())
        .add_paragraph(centered("ADMISSION FORM", 30, true))
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_table(detail_table(vec![
            ("Application ID:", format!("#{}", admission.id)),
            (
                "Application Date:",
                admission.submitted_at.format("%d-%b-%Y").to_string(),
            ),
        ]))
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_paragraph(heading("STUDENT INFORMATION"))
        .add_table(detail_table(vec![
            ("Student Name:", admission.student_name.clone()),
            ("Father's Name:", admission.father_name.clone()),
            ("Mother's Name:", admission.mother_name.clone()),
            ("Date of Birth:", admission.dob.format("%d-%b-%Y").to_string()),
            ("Gender:", admission.gender.clone()),
            (
                "Blood Group:",
                admission.blood_group.clone().unwrap_or_else(na),
            ),
        ]))
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_paragraph(heading("ACADEMIC INFORMATION"))
        .add_table(detail_table(vec![
            ("Class Applying For:", admission.class_applying.clone()),
            (
                "Previous School:",
                admission.previous_school.clone().unwrap_or_else(na),
            ),
        ]))
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_paragraph(heading("CONTACT INFORMATION"))
        .add_table(detail_table(vec![
            ("Email Address:", admission.email.clone()),
            ("Phone Number:", admission.phone.clone()),
            ("Residential Address:", admission.address.clone()),
        ]))
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_paragraph(heading("FOR OFFICE USE ONLY"))
        .add_table(detail_table(vec![
            (
                "Admission Status:",
                "☐ Approved    ☐ Pending    ☐ Rejected".to_string(),
            ),
            ("Interview Date:", String::new()),
            ("Admission Fee Paid:", "☐ Yes    ☐ No".to_string()),
            ("Receipt Number:", String::new()),
            ("Admitted to Class:", String::new()),
            ("Remarks:", String::new()),
        ]))
        .add_paragraph(Paragraph::new())
        .add_paragraph(Paragraph::new());

    docx = docx
        .add_table(signature_block())
        .add_paragraph(Paragraph::new())
        .add_paragraph(centered(
            &format!("{SCHOOL_NAME} | {SCHOOL_PHONE} | {SCHOOL_EMAIL}"),
            16,
            false,
        ))
        .add_paragraph(centered(
            &format!("Document generated: {}", Utc::now().format("%d-%b-%Y %H:%M")),
            16,
            false,
        ));

    let file = fs::File::create(path)
        .with_context(|| format!("failed to create form file {}", path.display()))?;
    docx.build()
        .pack(file)
        .with_context(|| format!("failed to write form file {}", path.display()))?;

    Ok(())
}

fn na() -> String {
    "N/A".to_string()
}

fn centered(text: &str, size: usize, bold: bool) -> Paragraph {
    let mut run = Run::new().add_text(text).size(size);
    if bold {
        run = run.bold();
    }
    Paragraph::new().add_run(run).align(AlignmentType::Center)
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(26).bold())
}

fn detail_table(rows: Vec<(&str, String)>) -> Table {
    let rows = rows
        .into_iter()
        .map(|(label, value)| {
            TableRow::new(vec![
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(label).bold())),
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(value))),
            ])
        })
        .collect();

    Table::new(rows).set_grid(vec![2800, 6200])
}

fn signature_block() -> Table {
    let cell = |line: &str, caption: &str| {
        TableCell::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(line))
                    .align(AlignmentType::Center),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(caption).bold().size(18))
                    .align(AlignmentType::Center),
            )
    };

    Table::new(vec![TableRow::new(vec![
        cell("___________________", "Parent/Guardian Signature"),
        cell("___________________", "Admission Officer"),
        cell("___________________", "Principal Signature"),
    ])])
    .set_grid(vec![3000, 3000, 3000])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_admission() -> AdmissionRow {
        AdmissionRow {
            id: 42,
            student_name: "Asha Verma".to_string(),
            father_name: "Ravi Verma".to_string(),
            mother_name: "Meena Verma".to_string(),
            dob: NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(),
            gender: "Female".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Lake Road".to_string(),
            previous_school: None,
            class_applying: "Class 5".to_string(),
            blood_group: Some("O+".to_string()),
            photo: None,
            submitted_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn builds_a_non_empty_form_document() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("admission_form_42.docx");

        build_admission_docx(&sample_admission(), &path).expect("build docx");

        let metadata = fs::metadata(&path).expect("form file written");
        assert!(metadata.len() > 0);
    }

    #[test]
    fn download_name_embeds_the_record_id() {
        assert_eq!(pdf_filename(42), "admission_form_42.pdf");
    }
}
