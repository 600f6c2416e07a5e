use std::borrow::Cow;

use axum::response::Html;

use crate::web::templates::{PageLayout, render_page};

const ADMIN_STYLES: &str = r##"<style>
        .login-box { max-width: 420px; margin: 3rem auto; }
        .stat-cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
        .stat-card { background: #fff; border-radius: 8px; padding: 1.25rem; box-shadow: 0 1px 4px rgba(0,0,0,0.08); text-align: center; }
        .stat-card .value { font-size: 2rem; font-weight: 700; color: #1d4ed8; }
        .tabs { display: flex; gap: 0.5rem; margin-bottom: 1rem; flex-wrap: wrap; }
        .tabs button { background: #e2e8f0; color: #1e293b; }
        .tabs button.active { background: #1d4ed8; color: #fff; }
        .toolbar { display: flex; gap: 0.5rem; margin-bottom: 1rem; flex-wrap: wrap; align-items: center; }
        .toolbar .spacer { flex: 1; }
        button.danger { background: #dc2626; }
        button.secondary { background: #475569; }
        .hidden { display: none; }
        td.actions { white-space: nowrap; }
</style>"##;

const ADMIN_BODY: &str = r##"        <section id="login-view" class="panel login-box">
            <h2 class="section-title">Admin Login</h2>
            <div id="login-banner"></div>
            <form id="login-form">
                <div class="form-group">
                    <label for="login-email">Email</label>
                    <input id="login-email" type="email" required>
                </div>
                <div class="form-group">
                    <label for="login-password">Password</label>
                    <input id="login-password" type="password" required>
                </div>
                <p></p>
                <button type="submit">Login</button>
            </form>
        </section>

        <section id="dashboard-view" class="hidden">
            <div class="toolbar">
                <h2 class="section-title">Admin Dashboard</h2>
                <div class="spacer"></div>
                <span id="admin-email"></span>
                <button id="password-toggle" class="secondary" type="button">Change Password</button>
                <button id="logout-btn" class="danger" type="button">Logout</button>
            </div>
            <div id="dashboard-banner"></div>

            <form id="password-form" class="panel hidden">
                <h3>Change Password</h3>
                <div class="form-grid">
                    <div class="form-group">
                        <label for="current-password">Current Password</label>
                        <input id="current-password" type="password" required>
                    </div>
                    <div class="form-group">
                        <label for="new-password">New Password (min 8 characters)</label>
                        <input id="new-password" type="password" required>
                    </div>
                </div>
                <p></p>
                <button type="submit">Update Password</button>
            </form>

            <div id="stat-cards" class="stat-cards"></div>

            <div class="tabs">
                <button data-tab="news" class="active" type="button">News</button>
                <button data-tab="admissions" type="button">Admissions</button>
                <button data-tab="contacts" type="button">Contacts</button>
            </div>

            <div id="tab-news" class="tab-panel">
                <form id="news-form" class="panel">
                    <h3 id="news-form-title">Add News</h3>
                    <input type="hidden" id="news-id">
                    <div class="form-group">
                        <label for="news-title">Title</label>
                        <input id="news-title" required>
                    </div>
                    <div class="form-group">
                        <label for="news-content">Content</label>
                        <textarea id="news-content" rows="4" required></textarea>
                    </div>
                    <p></p>
                    <button type="submit">Save</button>
                    <button type="button" id="news-cancel" class="secondary hidden">Cancel</button>
                </form>
                <table>
                    <thead><tr><th>Title</th><th>Content</th><th>Date</th><th>Actions</th></tr></thead>
                    <tbody id="news-body"></tbody>
                </table>
            </div>

            <div id="tab-admissions" class="tab-panel hidden">
                <div class="toolbar">
                    <button id="export-admissions" class="secondary" type="button">Export CSV</button>
                </div>
                <table>
                    <thead><tr><th>Student</th><th>Class</th><th>DOB</th><th>Phone</th><th>Email</th><th>Submitted</th><th>Actions</th></tr></thead>
                    <tbody id="admissions-body"></tbody>
                </table>
            </div>

            <div id="tab-contacts" class="tab-panel hidden">
                <div class="toolbar">
                    <button id="export-contacts" class="secondary" type="button">Export CSV</button>
                </div>
                <table>
                    <thead><tr><th>Name</th><th>Email</th><th>Phone</th><th>Subject</th><th>Message</th><th>Received</th><th>Actions</th></tr></thead>
                    <tbody id="contacts-body"></tbody>
                </table>
            </div>
        </section>
"##;

const ADMIN_SCRIPT: &str = r##"<script>
const SESSION_KEY = 'school_admin_session';

const session = {
    load() {
        try {
            return JSON.parse(localStorage.getItem(SESSION_KEY));
        } catch (err) {
            return null;
        }
    },
    save(data) {
        localStorage.setItem(SESSION_KEY, JSON.stringify(data));
    },
    clear() {
        localStorage.removeItem(SESSION_KEY);
    },
};

const loginView = document.getElementById('login-view');
const dashboardView = document.getElementById('dashboard-view');
const loginBanner = document.getElementById('login-banner');
const dashboardBanner = document.getElementById('dashboard-banner');

function showBanner(target, kind, text) {
    target.innerHTML = `<div class="alert ${kind}">${text}</div>`;
    setTimeout(() => { target.innerHTML = ''; }, 5000);
}

function escapeHtml(value) {
    const div = document.createElement('div');
    div.textContent = value == null ? '' : String(value);
    return div.innerHTML;
}

function authHeaders(extra) {
    const current = session.load();
    return Object.assign({ 'Authorization': `Bearer ${current ? current.token : ''}` }, extra || {});
}

async function apiFetch(url, options) {
    const response = await fetch(url, options);
    if (response.status === 401) {
        session.clear();
        showView();
        throw new Error('Session expired');
    }
    return response;
}

function showView() {
    const current = session.load();
    if (current && current.token) {
        loginView.classList.add('hidden');
        dashboardView.classList.remove('hidden');
        document.getElementById('admin-email').textContent = current.admin ? current.admin.email : '';
        loadStats();
        loadNews();
        loadAdmissions();
        loadContacts();
    } else {
        dashboardView.classList.add('hidden');
        loginView.classList.remove('hidden');
    }
}

// --- login / logout / password ---

document.getElementById('login-form').addEventListener('submit', async (event) => {
    event.preventDefault();
    try {
        const response = await fetch('/api/auth/login', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({
                email: document.getElementById('login-email').value.trim(),
                password: document.getElementById('login-password').value,
            }),
        });
        const data = await response.json();
        if (response.ok) {
            session.save({ token: data.token, admin: data.admin });
            document.getElementById('login-form').reset();
            showView();
        } else {
            showBanner(loginBanner, 'error', data.error || 'Login failed');
        }
    } catch (err) {
        showBanner(loginBanner, 'error', 'Connection error');
    }
});

document.getElementById('logout-btn').addEventListener('click', () => {
    session.clear();
    window.location.href = '/';
});

document.getElementById('password-toggle').addEventListener('click', () => {
    document.getElementById('password-form').classList.toggle('hidden');
});

document.getElementById('password-form').addEventListener('submit', async (event) => {
    event.preventDefault();
    try {
        const response = await apiFetch('/api/auth/change-password', {
            method: 'POST',
            headers: authHeaders({ 'Content-Type': 'application/json' }),
            body: JSON.stringify({
                currentPassword: document.getElementById('current-password').value,
                newPassword: document.getElementById('new-password').value,
            }),
        });
        const data = await response.json();
        if (response.ok) {
            showBanner(dashboardBanner, 'success', 'Password updated');
            document.getElementById('password-form').reset();
            document.getElementById('password-form').classList.add('hidden');
        } else {
            showBanner(dashboardBanner, 'error', data.error || 'Failed to update password');
        }
    } catch (err) {
        showBanner(dashboardBanner, 'error', err.message);
    }
});

// --- tabs ---

document.querySelectorAll('.tabs button').forEach((button) => {
    button.addEventListener('click', () => {
        document.querySelectorAll('.tabs button').forEach((b) => b.classList.remove('active'));
        button.classList.add('active');
        document.querySelectorAll('.tab-panel').forEach((panel) => panel.classList.add('hidden'));
        document.getElementById(`tab-${button.dataset.tab}`).classList.remove('hidden');
    });
});

// --- dashboard stats ---

async function loadStats() {
    try {
        const response = await apiFetch('/api/admin/dashboard-stats', { headers: authHeaders() });
        if (!response.ok) return;
        const stats = await response.json();
        document.getElementById('stat-cards').innerHTML = `
            <div class="stat-card"><div class="value">${stats.totalAdmissions}</div>Total Admissions</div>
            <div class="stat-card"><div class="value">${stats.recentAdmissions}</div>Admissions (7 days)</div>
            <div class="stat-card"><div class="value">${stats.totalContacts}</div>Contact Messages</div>
            <div class="stat-card"><div class="value">${stats.totalNews}</div>News Items</div>
        `;
    } catch (err) { /* handled by apiFetch */ }
}

// --- news management ---

async function loadNews() {
    try {
        const response = await apiFetch('/api/admin/news', { headers: authHeaders() });
        if (!response.ok) return;
        const news = await response.json();
        document.getElementById('news-body').innerHTML = news.map((item) => `
            <tr>
                <td>${escapeHtml(item.title)}</td>
                <td>${escapeHtml(item.content)}</td>
                <td>${new Date(item.date).toLocaleDateString()}</td>
                <td class="actions">
                    <button type="button" class="secondary" onclick='editNews(${JSON.stringify(item).replace(/'/g, "&#39;")})'>Edit</button>
                    <button type="button" class="danger" onclick="deleteNews(${item.id})">Delete</button>
                </td>
            </tr>
        `).join('');
    } catch (err) { /* handled by apiFetch */ }
}

window.editNews = (item) => {
    document.getElementById('news-id').value = item.id;
    document.getElementById('news-title').value = item.title;
    document.getElementById('news-content').value = item.content;
    document.getElementById('news-form-title').textContent = 'Edit News';
    document.getElementById('news-cancel').classList.remove('hidden');
};

function resetNewsForm() {
    document.getElementById('news-form').reset();
    document.getElementById('news-id').value = '';
    document.getElementById('news-form-title').textContent = 'Add News';
    document.getElementById('news-cancel').classList.add('hidden');
}

document.getElementById('news-cancel').addEventListener('click', resetNewsForm);

document.getElementById('news-form').addEventListener('submit', async (event) => {
    event.preventDefault();
    const id = document.getElementById('news-id').value;
    const payload = {
        title: document.getElementById('news-title').value.trim(),
        content: document.getElementById('news-content').value.trim(),
    };
    try {
        const response = await apiFetch(id ? `/api/admin/news/${id}` : '/api/admin/news', {
            method: id ? 'PUT' : 'POST',
            headers: authHeaders({ 'Content-Type': 'application/json' }),
            body: JSON.stringify(payload),
        });
        const data = await response.json();
        if (response.ok) {
            showBanner(dashboardBanner, 'success', id ? 'News updated' : 'News added');
            resetNewsForm();
            loadNews();
            loadStats();
        } else {
            showBanner(dashboardBanner, 'error', data.error || 'Failed to save news');
        }
    } catch (err) {
        showBanner(dashboardBanner, 'error', err.message);
    }
});

window.deleteNews = async (id) => {
    if (!confirm('Delete this news item?')) return;
    try {
        const response = await apiFetch(`/api/admin/news/${id}`, {
            method: 'DELETE',
            headers: authHeaders(),
        });
        if (response.ok) {
            loadNews();
            loadStats();
        } else {
            const data = await response.json();
            showBanner(dashboardBanner, 'error', data.error || 'Failed to delete');
        }
    } catch (err) {
        showBanner(dashboardBanner, 'error', err.message);
    }
};

// --- admissions / contacts ---

async function loadAdmissions() {
    try {
        const response = await apiFetch('/api/admin/admissions', { headers: authHeaders() });
        if (!response.ok) return;
        const rows = await response.json();
        document.getElementById('admissions-body').innerHTML = rows.map((row) => `
            <tr>
                <td>${escapeHtml(row.student_name)}</td>
                <td>${escapeHtml(row.class_applying)}</td>
                <td>${escapeHtml(row.dob)}</td>
                <td>${escapeHtml(row.phone)}</td>
                <td>${escapeHtml(row.email)}</td>
                <td>${new Date(row.submitted_at).toLocaleDateString()}</td>
                <td class="actions">
                    <button type="button" class="secondary" onclick="downloadPdf(${row.id})">PDF</button>
                    <button type="button" class="danger" onclick="deleteRecord('admissions', ${row.id})">Delete</button>
                </td>
            </tr>
        `).join('');
    } catch (err) { /* handled by apiFetch */ }
}

async function loadContacts() {
    try {
        const response = await apiFetch('/api/admin/contacts', { headers: authHeaders() });
        if (!response.ok) return;
        const rows = await response.json();
        document.getElementById('contacts-body').innerHTML = rows.map((row) => `
            <tr>
                <td>${escapeHtml(row.name)}</td>
                <td>${escapeHtml(row.email)}</td>
                <td>${escapeHtml(row.phone)}</td>
                <td>${escapeHtml(row.subject)}</td>
                <td>${escapeHtml(row.message)}</td>
                <td>${new Date(row.submitted_at).toLocaleDateString()}</td>
                <td class="actions">
                    <button type="button" class="danger" onclick="deleteRecord('contacts', ${row.id})">Delete</button>
                </td>
            </tr>
        `).join('');
    } catch (err) { /* handled by apiFetch */ }
}

window.deleteRecord = async (kind, id) => {
    if (!confirm('Delete this record?')) return;
    try {
        const response = await apiFetch(`/api/admin/${kind}/${id}`, {
            method: 'DELETE',
            headers: authHeaders(),
        });
        if (response.ok) {
            if (kind === 'admissions') loadAdmissions(); else loadContacts();
            loadStats();
        } else {
            const data = await response.json();
            showBanner(dashboardBanner, 'error', data.error || 'Failed to delete');
        }
    } catch (err) {
        showBanner(dashboardBanner, 'error', err.message);
    }
};

// --- downloads ---

async function downloadBlob(url, fallbackName) {
    try {
        const response = await apiFetch(url, { headers: authHeaders() });
        if (!response.ok) {
            const data = await response.json();
            showBanner(dashboardBanner, 'error', data.error || 'Download failed');
            return;
        }
        const disposition = response.headers.get('Content-Disposition') || '';
        const match = disposition.match(/filename="([^"]+)"/);
        const blob = await response.blob();
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = match ? match[1] : fallbackName;
        link.click();
        URL.revokeObjectURL(link.href);
    } catch (err) {
        showBanner(dashboardBanner, 'error', err.message);
    }
}

document.getElementById('export-admissions').addEventListener('click', () => {
    downloadBlob('/api/admin/export/admissions', 'admissions.csv');
});

document.getElementById('export-contacts').addEventListener('click', () => {
    downloadBlob('/api/admin/export/contacts', 'contacts.csv');
});

window.downloadPdf = (id) => {
    downloadBlob(`/api/admin/admission-pdf/${id}`, `admission_form_${id}.pdf`);
};

showView();
</script>"##;

pub async fn admin_page() -> Html<String> {
    let body = format!("{ADMIN_STYLES}\n{ADMIN_BODY}");
    Html(render_page(PageLayout {
        meta_title: "Admin | Greenfield Public School",
        active_nav: "admin",
        body_html: Cow::Owned(body),
        body_scripts: vec![Cow::Borrowed(ADMIN_SCRIPT)],
    }))
}
