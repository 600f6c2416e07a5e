mod dashboard;
mod news;
mod records;

pub use dashboard::dashboard_stats;
pub use news::{create_news, delete_news, list_news, update_news};
pub use records::{
    delete_admission, delete_contact, download_admission_pdf, export_csv, list_admissions,
    list_contacts,
};
