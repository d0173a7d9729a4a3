//! The single dashboard page. Self-contained: all state lives behind the
//! JSON API, keyed by the session id the script obtains on load.

use axum::response::Html;

/// `GET /`
pub async fn page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Dashboard HTML (no external resources besides the embedded map iframe)
// ---------------------------------------------------------------------------

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Diagnosis Dashboard</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #0f172a; color: #e2e8f0; display: flex; min-height: 100vh;
    }
    nav { width: 220px; background: #111827; padding: 20px 12px; }
    nav h1 { font-size: 18px; margin-bottom: 16px; }
    nav button {
      display: block; width: 100%; text-align: left; padding: 10px 12px;
      margin-bottom: 6px; border: none; border-radius: 8px;
      background: transparent; color: #cbd5e1; cursor: pointer; font-size: 14px;
    }
    nav button.active { background: #1e293b; color: #fff; }
    main { flex: 1; padding: 24px; max-width: 960px; }
    .card { background: #1e293b; border-radius: 12px; padding: 20px; margin-bottom: 16px; }
    .card h2 { font-size: 18px; margin-bottom: 12px; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }
    label { display: block; font-size: 12px; color: #94a3b8; margin-bottom: 4px; }
    label.prefilled { color: #67e8f9; }
    input, select {
      width: 100%; padding: 8px; border-radius: 6px; border: 1px solid #334155;
      background: #0f172a; color: #e2e8f0;
    }
    .btn {
      padding: 10px 16px; border-radius: 8px; border: none; cursor: pointer;
      background: #0891b2; color: #fff; font-size: 14px; margin: 12px 8px 0 0;
    }
    .btn-secondary { background: #334155; }
    .positive { color: #f87171; font-weight: 600; }
    .negative { color: #4ade80; font-weight: 600; }
    .notice { padding: 8px 12px; border-radius: 6px; margin-bottom: 8px; font-size: 14px; }
    .notice.error { background: #7f1d1d; }
    .notice.warning { background: #78350f; }
    .notice.info { background: #1e3a5f; }
    table { width: 100%; border-collapse: collapse; font-size: 13px; }
    th, td { text-align: left; padding: 6px; border-bottom: 1px solid #334155; }
    pre { white-space: pre-wrap; font-size: 12px; color: #cbd5e1; }
    iframe { width: 100%; height: 320px; border: 0; border-radius: 8px; margin-top: 12px; }
    ul { margin-left: 20px; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <nav>
    <h1>Diagnosis Dashboard</h1>
    <button data-page="status" class="active">Model Status</button>
    <button data-page="report">Upload Report</button>
    <button data-page="diabetes">Diabetes</button>
    <button data-page="heart_disease">Heart Disease</button>
    <button data-page="parkinsons">Parkinson's</button>
    <button data-page="lung_cancer">Lung Cancer</button>
    <button data-page="thyroid">Hypo-Thyroid</button>
    <button data-page="history">History</button>
    <button data-page="tips">Health Tips</button>
    <button data-page="doctors">Consult Doctor</button>
  </nav>
  <main>
    <div id="notices"></div>
    <div id="content"></div>
  </main>

  <script>
    var sessionId = null;
    var content = document.getElementById('content');
    var noticesEl = document.getElementById('notices');
    var DISEASES = ['diabetes', 'heart_disease', 'parkinsons', 'lung_cancer', 'thyroid'];

    function esc(s) {
      return String(s).replace(/[&<>"']/g, function(c) {
        return { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c];
      });
    }

    function api(method, path, body, raw) {
      var opts = { method: method, headers: {} };
      if (sessionId) opts.headers['X-Session-Id'] = sessionId;
      if (body instanceof FormData) {
        opts.body = body;
      } else if (body !== undefined) {
        opts.headers['Content-Type'] = 'application/json';
        opts.body = JSON.stringify(body);
      }
      return fetch('/api' + path, opts).then(function(res) {
        if (raw) return res;
        return res.json().then(function(json) {
          if (!res.ok) throw new Error(json.error ? json.error.message : res.statusText);
          return json;
        });
      }).finally(loadNotices);
    }

    function loadNotices() {
      if (!sessionId) return;
      fetch('/api/notices', { headers: { 'X-Session-Id': sessionId } })
        .then(function(res) { return res.json(); })
        .then(function(json) {
          (json.notices || []).forEach(function(n) {
            var div = document.createElement('div');
            div.className = 'notice ' + n.level;
            div.textContent = n.message;
            noticesEl.appendChild(div);
            setTimeout(function() { div.remove(); }, 8000);
          });
        });
    }

    function showError(err) {
      var div = document.createElement('div');
      div.className = 'notice error';
      div.textContent = err.message;
      noticesEl.appendChild(div);
      setTimeout(function() { div.remove(); }, 8000);
    }

    // ── Pages ─────────────────────────────────────────

    function statusPage() {
      api('GET', '/models/status').then(function(s) {
        var html = '<div class="card"><h2>Model Status</h2>';
        html += s.all_loaded ? '<p class="negative">All expected models loaded</p>' : '';
        html += '<table><tr><th>Model</th><th>Status</th></tr>';
        DISEASES.forEach(function(d) {
          var err = s.errors[d];
          html += '<tr><td>' + d + '</td><td>' + (err ? '<span class="positive">' + esc(err) + '</span>' : 'loaded') + '</td></tr>';
        });
        html += '</table><p style="margin-top:12px">OCR engine: ' + esc(s.ocr_engine) + '</p></div>';
        content.innerHTML = html;
      }).catch(showError);
    }

    function reportPage() {
      content.innerHTML =
        '<div class="card"><h2>Upload Lab Report</h2>' +
        '<input type="file" id="report-file" accept="image/png,image/jpeg">' +
        '<button class="btn" id="scan-btn">Scan</button>' +
        '<div id="scan-result"></div></div>';
      document.getElementById('scan-btn').onclick = function() {
        var file = document.getElementById('report-file').files[0];
        if (!file) return;
        var form = new FormData();
        form.append('file', file);
        api('POST', '/report/scan', form).then(renderScan).catch(showError);
      };
    }

    function renderScan(scan) {
      var html = '<h2 style="margin-top:16px">Extracted Text</h2><pre>' + esc(scan.text) + '</pre>';
      var keys = Object.keys(scan.values);
      if (keys.length) {
        html += '<h2 style="margin-top:16px">Values Recognized</h2><pre>' + esc(JSON.stringify(scan.values, null, 2)) + '</pre>';
      } else {
        html += '<p>No structured values detected. Detected numeric tokens:</p><pre>' + esc(scan.numeric_tokens.join(', ')) + '</pre>';
      }
      html += '<h2 style="margin-top:16px">Instant Predictions</h2>';
      DISEASES.forEach(function(d) {
        html += '<button class="btn btn-secondary" data-report="' + d + '">Predict ' + d + '</button>';
      });
      html += '<div id="report-outcome"></div>';
      document.getElementById('scan-result').innerHTML = html;
      document.querySelectorAll('[data-report]').forEach(function(b) {
        b.onclick = function() {
          api('POST', '/predict/' + b.dataset.report + '/from-report')
            .then(function(r) { renderOutcome(r, 'report-outcome'); })
            .catch(showError);
        };
      });
    }

    function formPage(disease) {
      api('GET', '/forms/' + disease).then(function(form) {
        var html = '<div class="card"><h2>' + esc(form.title) + ' Prediction</h2><div class="grid">';
        form.fields.forEach(function(f) {
          html += '<div><label class="' + (f.from_report ? 'prefilled' : '') + '">' + esc(f.label) + '</label>' +
            '<input type="number" step="any" name="' + esc(f.name) + '" value="' + f.value + '"></div>';
        });
        html += '</div><button class="btn" id="predict-btn">Predict</button><div id="outcome"></div></div>';
        content.innerHTML = html;
        document.getElementById('predict-btn').onclick = function() {
          var body = {};
          content.querySelectorAll('input[name]').forEach(function(i) { body[i.name] = parseFloat(i.value); });
          api('POST', '/predict/' + disease, body)
            .then(function(r) { renderOutcome(r, 'outcome'); })
            .catch(showError);
        };
      }).catch(showError);
    }

    function renderOutcome(r, target) {
      var prob = r.probability === null ? 'n/a' : (r.probability * 100).toFixed(1) + '%';
      var html = '<p style="margin-top:12px" class="' + r.outcome + '">' +
        esc(r.disease) + ': ' + r.outcome.toUpperCase() + ' (probability ' + prob + ')</p>';
      html += '<p>Suggested specialist: ' + esc(r.specialist) + '</p>';
      if (r.show_tips) html += '<button class="btn btn-secondary" onclick="tipsPage(\'' + r.condition + '\')">Health Tips</button>';
      html += '<button class="btn btn-secondary" onclick="doctorsPage(\'' + r.condition + '\')">Find Doctors</button>';
      document.getElementById(target).innerHTML = html;
    }

    function historyPage() {
      api('GET', '/history').then(function(h) {
        var html = '<div class="card"><h2>Prediction History</h2>';
        if (!h.records.length) {
          html += '<p>No predictions recorded yet.</p>';
        } else {
          html += '<table><tr><th>Time</th><th>Model</th><th>Inputs</th><th>Prediction</th><th>Prob</th></tr>';
          h.records.forEach(function(r) {
            html += '<tr><td>' + esc(r.time) + '</td><td>' + esc(r.model) + '</td><td>' +
              esc(JSON.stringify(r.inputs)) + '</td><td>' + r.prediction + '</td><td>' +
              (r.prob === null ? '' : r.prob.toFixed(3)) + '</td></tr>';
          });
          html += '</table>';
        }
        html += '<button class="btn" id="export-btn">Download CSV</button>' +
          '<button class="btn btn-secondary" id="clear-btn">Clear History</button></div>';
        content.innerHTML = html;
        document.getElementById('export-btn').onclick = function() {
          api('GET', '/history/export', undefined, true).then(function(res) { return res.blob(); })
            .then(function(blob) {
              var a = document.createElement('a');
              a.href = URL.createObjectURL(blob);
              a.download = 'pred_history.csv';
              a.click();
            }).catch(showError);
        };
        document.getElementById('clear-btn').onclick = function() {
          api('DELETE', '/history').then(historyPage).catch(showError);
        };
      }).catch(showError);
    }

    function conditionPicker(id, selected) {
      var html = '<select id="' + id + '">';
      ['diabetes', 'heart', 'parkinsons', 'lungs', 'thyroid'].forEach(function(c) {
        html += '<option value="' + c + '"' + (c === selected ? ' selected' : '') + '>' + c + '</option>';
      });
      return html + '</select>';
    }

    function tipsPage(selected) {
      content.innerHTML = '<div class="card"><h2>Health Tips</h2>' + conditionPicker('tips-cond', selected) +
        '<div id="tips-body"></div></div>';
      var load = function() {
        api('GET', '/advice/' + document.getElementById('tips-cond').value).then(function(t) {
          var html = '';
          t.sections.forEach(function(s) {
            html += '<h2 style="margin-top:16px">' + esc(s.heading) + '</h2><ul>';
            s.items.forEach(function(i) { html += '<li>' + esc(i) + '</li>'; });
            html += '</ul>';
          });
          document.getElementById('tips-body').innerHTML = html;
        }).catch(showError);
      };
      document.getElementById('tips-cond').onchange = load;
      load();
    }

    function doctorsPage(selected) {
      content.innerHTML = '<div class="card"><h2>Consult Doctor</h2><div class="grid">' +
        '<div><label>Condition</label>' + conditionPicker('doc-cond', selected) + '</div>' +
        '<div><label>City</label><input id="doc-city"></div>' +
        '<div><label>State</label><input id="doc-state"></div>' +
        '<div><label>Distance</label><select id="doc-dist">' +
        '<option value="within_5_km">Within 5 km</option>' +
        '<option value="within_10_km">Within 10 km</option>' +
        '<option value="within_20_km">Within 20 km</option></select></div></div>' +
        '<button class="btn" id="doc-btn">Search</button><div id="doc-links"></div></div>';
      document.getElementById('doc-btn').onclick = function() {
        var q = '?city=' + encodeURIComponent(document.getElementById('doc-city').value) +
          '&state=' + encodeURIComponent(document.getElementById('doc-state').value) +
          '&distance=' + document.getElementById('doc-dist').value;
        api('GET', '/doctors/' + document.getElementById('doc-cond').value + q).then(function(d) {
          var el = document.getElementById('doc-links');
          if (!d.links) {
            el.innerHTML = '<p style="margin-top:12px">Enter both city and state to search for a ' + esc(d.specialist) + '.</p>';
            return;
          }
          var l = d.links;
          el.innerHTML = '<ul style="margin-top:12px">' +
            '<li><a href="' + l.doctors + '" target="_blank">' + esc(l.specialist) + ' doctors</a></li>' +
            '<li><a href="' + l.hospitals + '" target="_blank">Hospitals</a></li>' +
            '<li><a href="' + l.top_doctors + '" target="_blank">Top rated doctors</a></li>' +
            '<li><a href="' + l.top_hospitals + '" target="_blank">Top rated hospitals</a></li></ul>' +
            '<iframe src="' + l.embed + '"></iframe>';
        }).catch(showError);
      };
    }

    var PAGES = {
      status: statusPage, report: reportPage, history: historyPage,
      tips: function() { tipsPage('diabetes'); },
      doctors: function() { doctorsPage('diabetes'); }
    };
    DISEASES.forEach(function(d) { PAGES[d] = function() { formPage(d); }; });

    document.querySelectorAll('nav button').forEach(function(b) {
      b.onclick = function() {
        document.querySelectorAll('nav button').forEach(function(x) { x.classList.remove('active'); });
        b.classList.add('active');
        PAGES[b.dataset.page]();
      };
    });

    window.addEventListener('beforeunload', function() {
      if (sessionId) fetch('/api/session', { method: 'DELETE', headers: { 'X-Session-Id': sessionId }, keepalive: true });
    });

    fetch('/api/session', { method: 'POST' })
      .then(function(res) { return res.json(); })
      .then(function(s) { sessionId = s.session_id; statusPage(); })
      .catch(showError);
  </script>
</body>
</html>
"#;
