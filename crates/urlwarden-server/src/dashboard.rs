// urlwarden-server/src/dashboard.rs
// ============================================================================
// Module: Urlwarden Dashboard Page
// Description: Self-contained HTML page polling the stats endpoint.
// Purpose: Provide a zero-dependency operational view of the service.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The dashboard is a single embedded HTML document with inline script
//! that polls `/stats`. It carries no external assets so the server needs
//! no static-file machinery.

// ============================================================================
// SECTION: Page
// ============================================================================

/// Embedded dashboard document served at `/dashboard`.
pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Urlwarden Dashboard</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
  h1 { font-size: 1.4rem; }
  .counters { display: flex; gap: 2rem; margin-bottom: 1.5rem; }
  .counter { border: 1px solid #ccc; border-radius: 6px; padding: 0.8rem 1.2rem; }
  .counter .value { font-size: 1.6rem; font-weight: 600; }
  table { border-collapse: collapse; width: 100%; }
  th, td { text-align: left; padding: 0.3rem 0.6rem; border-bottom: 1px solid #eee; }
  .status-threat { color: #b00020; }
  .status-safe { color: #1b5e20; }
</style>
</head>
<body>
<h1>Urlwarden</h1>
<div class="counters">
  <div class="counter"><div class="value" id="total">0</div>total checks</div>
  <div class="counter"><div class="value" id="safe">0</div>safe</div>
  <div class="counter"><div class="value" id="threats">0</div>threats</div>
  <div class="counter"><div class="value" id="unknown">0</div>unknown</div>
  <div class="counter"><div class="value" id="rps">0</div>req/s (60s peak)</div>
</div>
<h2>Recent checks</h2>
<table>
  <thead><tr><th>URL</th><th>Status</th><th>Timestamp</th></tr></thead>
  <tbody id="recent"></tbody>
</table>
<script>
function esc(value) {
  return String(value).replace(/[&<>"']/g, ch => ({
    '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
  })[ch]);
}
async function refresh() {
  try {
    const res = await fetch('/stats');
    if (!res.ok) return;
    const stats = await res.json();
    document.getElementById('total').textContent = stats.total_checks;
    document.getElementById('safe').textContent = stats.safe;
    document.getElementById('threats').textContent = stats.threats_detected;
    document.getElementById('unknown').textContent = stats.unknown;
    document.getElementById('rps').textContent = Math.max(...stats.requests_per_second, 0);
    const rows = stats.recent_checks.map(check => {
      const cls = check.status === 'threat' ? 'status-threat'
        : check.status === 'safe' ? 'status-safe' : '';
      const when = new Date(check.timestamp * 1000).toISOString();
      return `<tr><td>${esc(check.url)}</td><td class="${cls}">${esc(check.status)}</td><td>${when}</td></tr>`;
    });
    document.getElementById('recent').innerHTML = rows.join('');
  } catch (_err) {
    // Leave the last rendered state in place when polling fails.
  }
}
refresh();
setInterval(refresh, 2000);
</script>
</body>
</html>
"#;
