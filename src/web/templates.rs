use std::borrow::Cow;

use chrono::{Datelike, Utc};

pub const SCHOOL_NAME: &str = "Greenfield Public School";
pub const SCHOOL_TAGLINE: &str = "Discipline • Character • Excellence";
pub const SCHOOL_ADDRESS: &str = "Station Road, Greenfield — 302026";
pub const SCHOOL_EMAIL: &str = "admissions@greenfield.school";
pub const SCHOOL_PHONE: &str = "+91 141 0000000";

const BASE_STYLES: &str = r#"
        :root { color-scheme: light; }
        body { font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
        .navbar { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; background: #1a365d; color: #ffffff; padding: 1rem 1.5rem; }
        .nav-brand { font-weight: 700; font-size: 1.1rem; }
        .nav-links { display: flex; gap: 1rem; flex-wrap: wrap; }
        .nav-links a { color: #e2e8f0; text-decoration: none; font-weight: 600; padding: 0.35rem 0.7rem; border-radius: 8px; }
        .nav-links a:hover { background: rgba(255, 255, 255, 0.12); }
        .nav-links a.active { background: #2563eb; color: #ffffff; }
        main { padding: 2rem 1.5rem; max-width: 1080px; margin: 0 auto; box-sizing: border-box; }
        section { margin-bottom: 2.5rem; }
        .hero { background: linear-gradient(120deg, #1a365d, #2563eb); color: #ffffff; border-radius: 16px; padding: 4rem 2rem; text-align: center; position: relative; overflow: hidden; }
        .hero h1 { margin: 0 0 0.5rem; font-size: 2.4rem; }
        .hero .tagline { color: #bfdbfe; font-weight: 600; letter-spacing: 0.06em; }
        .hero .slide { position: absolute; inset: 0; opacity: 0; transition: opacity 0.8s ease; background-size: cover; background-position: center; }
        .hero .slide.active { opacity: 0.25; }
        .hero-content { position: relative; }
        .section-title { text-align: center; margin-bottom: 1.5rem; }
        .panel { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.5rem; box-shadow: 0 18px 40px rgba(15, 23, 42, 0.08); }
        .news-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
        .news-card { background: #ffffff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 1.25rem; }
        .news-card h3 { margin-top: 0; }
        .news-card small { color: #64748b; }
        .form-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
        .form-group { display: flex; flex-direction: column; }
        .form-group.full-width { grid-column: 1 / -1; }
        label { margin-bottom: 0.4rem; font-weight: 600; }
        input, select, textarea { padding: 0.7rem; border-radius: 8px; border: 1px solid #cbd5f5; background: #f8fafc; color: #0f172a; font-size: 1rem; box-sizing: border-box; }
        input:focus, select:focus, textarea:focus { outline: none; border-color: #2563eb; box-shadow: 0 0 0 3px rgba(37, 99, 235, 0.12); }
        button { padding: 0.85rem 1.2rem; border: none; border-radius: 8px; background: #2563eb; color: #ffffff; font-weight: 600; cursor: pointer; }
        button:hover { background: #1d4ed8; }
        button:disabled { opacity: 0.6; cursor: not-allowed; }
        .btn-danger { background: #dc2626; }
        .btn-danger:hover { background: #b91c1c; }
        .btn-secondary { background: #64748b; }
        .alert { margin: 1rem 0; padding: 0.8rem 1rem; border-radius: 8px; font-weight: 600; }
        .alert.success { background: #dcfce7; color: #166534; }
        .alert.error { background: #fee2e2; color: #b91c1c; }
        .info-cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
        .info-card { background: #ffffff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 1.25rem; text-align: center; }
        table { width: 100%; border-collapse: collapse; margin-top: 1rem; background: #ffffff; }
        th, td { padding: 0.65rem 0.85rem; border-bottom: 1px solid #e2e8f0; text-align: left; font-size: 0.92rem; }
        th { background: #f1f5f9; }
        .table-wrap { overflow-x: auto; }
        .gallery-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
        .gallery-tile { background: #e2e8f0; border-radius: 12px; aspect-ratio: 4 / 3; display: flex; align-items: center; justify-content: center; color: #475569; font-weight: 600; }
        .app-footer { margin-top: 3rem; text-align: center; font-size: 0.85rem; color: #94a3b8; padding-bottom: 2rem; }
        @media (max-width: 768px) {
            main { padding: 1.5rem 1rem; }
            .hero { padding: 2.5rem 1.25rem; }
            th, td { padding: 0.5rem; }
        }
"#;

pub struct PageLayout<'a> {
    pub meta_title: &'a str,
    pub active_nav: &'a str,
    pub body_html: Cow<'a, str>,
    pub body_scripts: Vec<Cow<'a, str>>,
}

const NAV_ITEMS: &[(&str, &str, &str)] = &[
    ("home", "/", "Home"),
    ("admission", "/admission", "Admission"),
    ("contact", "/contact", "Contact"),
    ("gallery", "/gallery", "Gallery"),
    ("director", "/director", "Director"),
    ("admin", "/admin", "Admin"),
];

pub fn render_page(layout: PageLayout<'_>) -> String {
    let PageLayout {
        meta_title,
        active_nav,
        body_html,
        body_scripts,
    } = layout;

    let nav_links = NAV_ITEMS
        .iter()
        .map(|(key, href, label)| {
            let class = if *key == active_nav { " class=\"active\"" } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    let scripts = body_scripts
        .into_iter()
        .map(|script| script.into_owned())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{meta_title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
{styles}
    </style>
</head>
<body>
    <nav class="navbar">
        <div class="nav-brand">{school}</div>
        <div class="nav-links">
            {nav_links}
        </div>
    </nav>
    <main>
{body_html}
        {footer}
    </main>
{scripts}
</body>
</html>"#,
        meta_title = meta_title,
        styles = BASE_STYLES,
        school = SCHOOL_NAME,
        nav_links = nav_links,
        body_html = body_html,
        footer = render_footer(),
        scripts = scripts,
    )
}

pub fn render_footer() -> String {
    let current_year = Utc::now().year();
    format!(
        r#"<footer class="app-footer">© {year} {school} · {address} · {email}</footer>"#,
        year = current_year,
        school = SCHOOL_NAME,
        address = SCHOOL_ADDRESS,
        email = SCHOOL_EMAIL,
    )
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_marks_the_active_nav_entry() {
        let html = render_page(PageLayout {
            meta_title: "Contact",
            active_nav: "contact",
            body_html: Cow::Borrowed("<p>hello</p>"),
            body_scripts: vec![],
        });
        assert!(html.contains(r#"<a href="/contact" class="active">Contact</a>"#));
        assert!(html.contains(r#"<a href="/">Home</a>"#));
    }
}
