use std::borrow::Cow;

use axum::response::Html;

use crate::web::templates::{
    PageLayout, SCHOOL_ADDRESS, SCHOOL_EMAIL, SCHOOL_NAME, SCHOOL_PHONE, SCHOOL_TAGLINE,
    escape_html, render_page,
};

pub async fn home_page() -> Html<String> {
    let body = format!(
        r##"        <section class="hero">
            <div class="slide active"></div>
            <div class="slide" style="background: linear-gradient(120deg, #166534, #22c55e);"></div>
            <div class="slide" style="background: linear-gradient(120deg, #7c2d12, #f97316);"></div>
            <div class="hero-content">
                <h1>{school}</h1>
                <p>{address}</p>
                <p class="tagline">{tagline}</p>
            </div>
        </section>
        <section>
            <h2 class="section-title">Latest News &amp; Updates</h2>
            <div id="news-grid" class="news-grid"><p>Loading news...</p></div>
        </section>
        <section class="panel">
            <h2 class="section-title">About Our School</h2>
            <p>
                {school} is committed to providing quality education with a focus on
                discipline, character building, and academic excellence. We prepare young
                minds for a bright future through a blend of academics and co-curricular
                activities.
            </p>
        </section>
"##,
        school = escape_html(SCHOOL_NAME),
        address = escape_html(SCHOOL_ADDRESS),
        tagline = escape_html(SCHOOL_TAGLINE),
    );

    let script = r##"<script>
const grid = document.getElementById('news-grid');

function escapeHtml(value) {
    const div = document.createElement('div');
    div.textContent = value;
    return div.innerHTML;
}

fetch('/api/news')
    .then((response) => response.json())
    .then((news) => {
        if (!Array.isArray(news) || news.length === 0) {
            grid.innerHTML = '<p>No news available at the moment.</p>';
            return;
        }
        grid.innerHTML = news.map((item) => `
            <div class="news-card">
                <h3>${escapeHtml(item.title)}</h3>
                <p>${escapeHtml(item.content)}</p>
                <small>${new Date(item.date).toLocaleDateString()}</small>
            </div>
        `).join('');
    })
    .catch(() => {
        grid.innerHTML = '<p>Unable to load news.</p>';
    });

// Cosmetic carousel: rotate hero backdrops every five seconds.
const slides = Array.from(document.querySelectorAll('.hero .slide'));
let currentSlide = 0;
setInterval(() => {
    slides[currentSlide].classList.remove('active');
    currentSlide = (currentSlide + 1) % slides.length;
    slides[currentSlide].classList.add('active');
}, 5000);
</script>"##;

    Html(render_page(PageLayout {
        meta_title: SCHOOL_NAME,
        active_nav: "home",
        body_html: Cow::Owned(body),
        body_scripts: vec![Cow::Borrowed(script)],
    }))
}

pub async fn admission_page() -> Html<String> {
    let body = r##"        <section>
            <h2 class="section-title">Admission Form</h2>
            <div id="banner"></div>
            <form id="admission-form" class="panel">
                <div class="form-grid">
                    <div class="form-group full-width">
                        <label for="photo">Student Photo (max 2 MB)</label>
                        <input id="photo" type="file" accept="image/*">
                    </div>
                    <div class="form-group">
                        <label for="studentName">Student Name *</label>
                        <input id="studentName" required placeholder="Student's full name">
                    </div>
                    <div class="form-group">
                        <label for="fatherName">Father's Name *</label>
                        <input id="fatherName" required>
                    </div>
                    <div class="form-group">
                        <label for="motherName">Mother's Name *</label>
                        <input id="motherName" required>
                    </div>
                    <div class="form-group">
                        <label for="dob">Date of Birth *</label>
                        <input id="dob" type="date" required>
                    </div>
                    <div class="form-group">
                        <label for="gender">Gender *</label>
                        <select id="gender" required>
                            <option value="">Select Gender</option>
                            <option>Male</option>
                            <option>Female</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="classApplying">Class Applying For *</label>
                        <select id="classApplying" required>
                            <option value="">Select Class</option>
                            <option>Nursery</option><option>LKG</option><option>UKG</option>
                            <option>Class 1</option><option>Class 2</option><option>Class 3</option>
                            <option>Class 4</option><option>Class 5</option><option>Class 6</option>
                            <option>Class 7</option><option>Class 8</option><option>Class 9</option>
                            <option>Class 10</option><option>Class 11</option><option>Class 12</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="email">Email *</label>
                        <input id="email" type="email" required>
                    </div>
                    <div class="form-group">
                        <label for="phone">Phone Number *</label>
                        <input id="phone" type="tel" required>
                    </div>
                    <div class="form-group">
                        <label for="bloodGroup">Blood Group</label>
                        <select id="bloodGroup">
                            <option value="">Select Blood Group</option>
                            <option>A+</option><option>A-</option><option>B+</option><option>B-</option>
                            <option>AB+</option><option>AB-</option><option>O+</option><option>O-</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="previousSchool">Previous School</label>
                        <input id="previousSchool" placeholder="If any">
                    </div>
                    <div class="form-group full-width">
                        <label for="address">Address *</label>
                        <textarea id="address" rows="3" required></textarea>
                    </div>
                </div>
                <p></p>
                <button type="submit" id="submit-btn">Submit Application</button>
            </form>
        </section>
"##;

    let script = r##"<script>
const form = document.getElementById('admission-form');
const banner = document.getElementById('banner');
const submitBtn = document.getElementById('submit-btn');
const photoInput = document.getElementById('photo');
let photoData = null;

const fields = ['studentName', 'fatherName', 'motherName', 'dob', 'gender', 'email',
    'phone', 'address', 'previousSchool', 'classApplying', 'bloodGroup'];

function showBanner(kind, text) {
    banner.innerHTML = `<div class="alert ${kind}">${text}</div>`;
}

photoInput.addEventListener('change', () => {
    const file = photoInput.files[0];
    photoData = null;
    if (!file) return;
    if (file.size > 2 * 1024 * 1024) {
        showBanner('error', 'Photo size should be less than 2 MB');
        photoInput.value = '';
        return;
    }
    const reader = new FileReader();
    reader.onloadend = () => { photoData = reader.result; };
    reader.readAsDataURL(file);
});

form.addEventListener('submit', async (event) => {
    event.preventDefault();
    banner.innerHTML = '';
    submitBtn.disabled = true;

    const payload = {};
    for (const field of fields) {
        const value = document.getElementById(field).value.trim();
        if (value) payload[field] = value;
    }
    if (photoData) payload.photo = photoData;

    try {
        const response = await fetch('/api/admission', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(payload),
        });
        const data = await response.json();
        if (response.ok) {
            showBanner('success', 'Application submitted successfully! We will contact you soon.');
            form.reset();
            photoData = null;
        } else {
            showBanner('error', data.error || 'Failed to submit');
        }
    } catch (err) {
        showBanner('error', 'Connection error');
    } finally {
        submitBtn.disabled = false;
    }
});
</script>"##;

    Html(render_page(PageLayout {
        meta_title: "Admission | Greenfield Public School",
        active_nav: "admission",
        body_html: Cow::Borrowed(body),
        body_scripts: vec![Cow::Borrowed(script)],
    }))
}

pub async fn contact_page() -> Html<String> {
    let body = format!(
        r##"        <section>
            <h2 class="section-title">Contact Us</h2>
            <div class="info-cards">
                <div class="info-card"><h3>Address</h3><p>{address}</p></div>
                <div class="info-card"><h3>Email</h3><p>{email}</p></div>
                <div class="info-card"><h3>Phone</h3><p>{phone}</p></div>
            </div>
            <div id="banner"></div>
            <form id="contact-form" class="panel">
                <div class="form-grid">
                    <div class="form-group">
                        <label for="name">Your Name *</label>
                        <input id="name" required>
                    </div>
                    <div class="form-group">
                        <label for="email-field">Email *</label>
                        <input id="email-field" type="email" required>
                    </div>
                    <div class="form-group">
                        <label for="phone-field">Phone *</label>
                        <input id="phone-field" type="tel" required>
                    </div>
                    <div class="form-group">
                        <label for="subject">Subject *</label>
                        <input id="subject" required>
                    </div>
                    <div class="form-group full-width">
                        <label for="message">Message *</label>
                        <textarea id="message" rows="5" required></textarea>
                    </div>
                </div>
                <p></p>
                <button type="submit" id="submit-btn">Send Message</button>
            </form>
        </section>
"##,
        address = escape_html(SCHOOL_ADDRESS),
        email = escape_html(SCHOOL_EMAIL),
        phone = escape_html(SCHOOL_PHONE),
    );

    let script = r##"<script>
const form = document.getElementById('contact-form');
const banner = document.getElementById('banner');
const submitBtn = document.getElementById('submit-btn');

function showBanner(kind, text) {
    banner.innerHTML = `<div class="alert ${kind}">${text}</div>`;
}

form.addEventListener('submit', async (event) => {
    event.preventDefault();
    banner.innerHTML = '';
    submitBtn.disabled = true;

    const payload = {
        name: document.getElementById('name').value.trim(),
        email: document.getElementById('email-field').value.trim(),
        phone: document.getElementById('phone-field').value.trim(),
        subject: document.getElementById('subject').value.trim(),
        message: document.getElementById('message').value.trim(),
    };

    try {
        const response = await fetch('/api/contact', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(payload),
        });
        const data = await response.json();
        if (response.ok) {
            showBanner('success', 'Message sent successfully! We will get back to you soon.');
            form.reset();
        } else {
            showBanner('error', data.error || 'Failed to send');
        }
    } catch (err) {
        showBanner('error', 'Connection error');
    } finally {
        submitBtn.disabled = false;
    }
});
</script>"##;

    Html(render_page(PageLayout {
        meta_title: "Contact | Greenfield Public School",
        active_nav: "contact",
        body_html: Cow::Owned(body),
        body_scripts: vec![Cow::Borrowed(script)],
    }))
}

pub async fn gallery_page() -> Html<String> {
    let tiles = [
        "Morning Assembly",
        "Science Fair",
        "Sports Day",
        "Annual Function",
        "Library",
        "Computer Lab",
        "NCC Parade",
        "Art Exhibition",
    ]
    .iter()
    .map(|caption| format!(r#"<div class="gallery-tile">{}</div>"#, escape_html(caption)))
    .collect::<Vec<_>>()
    .join("\n                ");

    let body = format!(
        r##"        <section>
            <h2 class="section-title">Campus Gallery</h2>
            <div class="gallery-grid">
                {tiles}
            </div>
        </section>
"##,
    );

    Html(render_page(PageLayout {
        meta_title: "Gallery | Greenfield Public School",
        active_nav: "gallery",
        body_html: Cow::Owned(body),
        body_scripts: vec![],
    }))
}

pub async fn director_page() -> Html<String> {
    let body = format!(
        r##"        <section class="panel">
            <h2 class="section-title">Director's Message</h2>
            <p>
                Dear parents and students, welcome to {school}. Our mission is to shape
                responsible citizens through a balance of rigorous academics, physical
                training, and character education. Every child who walks through our
                gates is given the room and the guidance to grow into their best self.
            </p>
            <p>
                I invite you to visit our campus, meet our faculty, and see our
                classrooms in action.
            </p>
            <p><strong>— The Director, {school}</strong></p>
        </section>
"##,
        school = escape_html(SCHOOL_NAME),
    );

    Html(render_page(PageLayout {
        meta_title: "Director | Greenfield Public School",
        active_nav: "director",
        body_html: Cow::Owned(body),
        body_scripts: vec![],
    }))
}
