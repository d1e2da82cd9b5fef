pub const UI_HTML: &str = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sliver Station — Inspection</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        :root {
            --primary: #c0202e;
            --accent: #ef233c;
            --good: #16a34a;
            --gray-400: #9ca3af;
            --grid: #f3f4f6;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f7fa;
            color: #1f2937;
            padding: 20px;
        }
        .container { max-width: 1400px; margin: 0 auto; }
        header {
            display: flex; justify-content: space-between; align-items: center;
            margin-bottom: 20px;
        }
        h1 { color: #2c3e50; font-size: 1.6em; }
        .mono { font-family: 'Courier New', monospace; }
        .grid { display: grid; grid-template-columns: 2fr 1fr; gap: 20px; }
        .card {
            background: white; border-radius: 12px; padding: 20px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.08); margin-bottom: 20px;
        }
        .badge {
            padding: 4px 12px; border-radius: 20px; font-size: 0.8em; font-weight: bold;
        }
        .badge.standby { background: #e5e7eb; color: #374151; }
        .badge.active { background: var(--good); color: white; }
        .live-badge {
            display: none; background: var(--accent); color: white;
            padding: 2px 10px; border-radius: 20px; font-size: 0.75em; font-weight: bold;
        }
        .feed {
            position: relative; background: #111827; border-radius: 8px;
            min-height: 360px; display: flex; align-items: center; justify-content: center;
            overflow: hidden;
        }
        .feed img { width: 100%; display: none; }
        .no-feed { color: var(--gray-400); }
        .controls { display: flex; gap: 10px; margin-top: 14px; align-items: center; }
        select, button {
            padding: 8px 14px; border-radius: 8px; border: 1px solid #d1d5db;
            background: white; cursor: pointer; font-size: 0.9em;
        }
        button.primary { background: var(--primary); color: white; border: none; }
        button.danger { background: #374151; color: white; border: none; }
        button:disabled { opacity: 0.4; cursor: default; }
        .stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 10px; }
        .stat-item { text-align: center; padding: 12px; background: #f8f9fa; border-radius: 8px; }
        .stat-value { font-size: 1.6em; font-weight: bold; color: #2c3e50; }
        .stat-label { color: var(--gray-400); font-size: 0.8em; margin-top: 4px; }
        .bar-track { background: var(--grid); border-radius: 6px; height: 8px; margin-top: 6px; }
        .bar-fill { background: var(--primary); border-radius: 6px; height: 8px; width: 0; transition: width .3s; }
        .bar-fill.conf { background: var(--good); }
        .defects-slider {
            display: flex; gap: 10px; overflow-x: auto; padding: 6px 0; cursor: grab;
        }
        .defect-thumb {
            flex: 0 0 120px; height: 90px; border-radius: 8px; overflow: hidden; cursor: pointer;
        }
        .defect-thumb img { width: 100%; height: 100%; object-fit: cover; }
        .defect-thumb.sample { opacity: 0.78; border: 1px dashed #9ca3af; }
        .defect-empty { color: var(--gray-400); padding: 20px; }
        .log-box {
            background: #111827; color: #e5e7eb; border-radius: 8px; padding: 12px;
            height: 180px; overflow-y: auto; font-family: 'Courier New', monospace; font-size: 0.8em;
        }
        .log-time { color: var(--primary); font-weight: 600; }
        .log-warning { color: var(--accent); }
        .log-error { color: #f87171; }
        .modal {
            display: none; position: fixed; inset: 0; background: rgba(0,0,0,0.75);
            align-items: center; justify-content: center; z-index: 50;
        }
        .modal-body { background: white; border-radius: 12px; padding: 20px; max-width: 720px; width: 90%; }
        .modal-body img { width: 100%; border-radius: 8px; }
        .modal-nav { display: flex; justify-content: space-between; align-items: center; margin-top: 12px; }
        .modal-tabs { display: flex; gap: 8px; margin-bottom: 14px; }
        .modal-tab { padding: 6px 12px; border-radius: 8px; background: var(--grid); cursor: pointer; }
        .modal-tab.active { background: var(--primary); color: white; }
        .tab-content { display: none; }
        .tab-content.active { display: block; }
        .toast {
            display: none; position: fixed; bottom: 24px; right: 24px; background: #111827;
            color: white; padding: 12px 18px; border-radius: 8px; z-index: 60;
        }
        input[type=range] { width: 100%; }
        .settings-row { margin-bottom: 12px; }
        .settings-row label { display: block; font-size: 0.85em; margin-bottom: 4px; }
        a.report-link { color: var(--primary); text-decoration: none; font-weight: 600; }
    </style>
</head>
<body>
<div class="container">
    <header>
        <h1>Sliver Station</h1>
        <div>
            <span class="mono" id="clock">--:--:--</span>
            &nbsp; Defects: <strong id="hdrDefects">0</strong>
            &nbsp; <a class="report-link" href="/report">Report</a>
        </div>
    </header>

    <div class="grid">
        <div>
            <div class="card">
                <div style="display:flex;justify-content:space-between;align-items:center;margin-bottom:10px">
                    <span class="badge standby" id="statusLabel">STANDBY</span>
                    <span class="live-badge" id="liveBadge">LIVE</span>
                </div>
                <div class="feed">
                    <img id="videoFeed" alt="Live feed">
                    <div class="no-feed" id="noFeed">No camera feed</div>
                </div>
                <div class="controls">
                    <select id="cameraSelect">
                        <option value="0">Camera 0 (Laptop)</option>
                        <option value="1">Camera 1 (USB)</option>
                    </select>
                    <button class="primary" onclick="startDetection()">Start</button>
                    <button class="danger" onclick="stopDetection()">Stop</button>
                    <button onclick="openSettings()">Settings</button>
                    <button onclick="startTraining()">Train</button>
                </div>
            </div>

            <div class="card">
                <h3 style="margin-bottom:10px">Defect History</h3>
                <div class="defects-slider" id="defectsSlider"></div>
            </div>
        </div>

        <div>
            <div class="card stats">
                <div class="stat-item">
                    <div class="stat-value" id="inspectedCount">0</div>
                    <div class="stat-label">Inspected</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value" id="goodCount">0</div>
                    <div class="stat-label">Good</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value" id="badCount">0</div>
                    <div class="stat-label">Defects</div>
                </div>
            </div>
            <div class="card">
                <div>Uptime <span class="mono" id="uptimeVal">0:00</span></div>
                <div style="margin-top:10px">Confidence <span id="confVal">—</span>
                    <div class="bar-track"><div class="bar-fill conf" id="confBar"></div></div>
                </div>
                <div style="margin-top:10px">Defect rate <span id="defectRateVal">0.0%</span>
                    <div class="bar-track"><div class="bar-fill" id="defectBar"></div></div>
                </div>
            </div>
            <div class="card">
                <h3 style="margin-bottom:10px">Event Log</h3>
                <div class="log-box" id="logBox"></div>
            </div>
        </div>
    </div>
</div>

<div class="modal" id="defectModal">
    <div class="modal-body">
        <img id="defectModalImage" alt="Defect">
        <div class="modal-nav">
            <button id="prevDefect" onclick="changeDefect(-1)">&larr; Prev</button>
            <span class="mono" id="defectModalPosition"></span>
            <button id="nextDefect" onclick="changeDefect(1)">Next &rarr;</button>
        </div>
        <div class="modal-nav">
            <button onclick="downloadDefectImage()">Download</button>
            <button onclick="closeDefectModal()">Close</button>
        </div>
    </div>
</div>

<div class="modal" id="settingsModal">
    <div class="modal-body">
        <div class="modal-tabs">
            <div class="modal-tab active" onclick="switchTab('detection')">Detection</div>
            <div class="modal-tab" onclick="switchTab('threshold')">Threshold</div>
        </div>
        <div class="tab-content active" id="detectionTab">
            <div class="settings-row">
                <label><input type="radio" name="mode" value="default" id="modeDefault" checked onchange="toggleManual()"> Default mode</label>
                <label><input type="radio" name="mode" value="manual" onchange="toggleManual()"> Manual mode</label>
            </div>
            <div id="defaultInfo">Factory detection profile is active.</div>
            <div id="manualControls" style="display:none">
                <div class="settings-row">
                    <label>Sensitivity <span id="sensitivityValue">50</span>%</label>
                    <input type="range" id="sensitivitySlider" min="0" max="100" value="50">
                </div>
            </div>
        </div>
        <div class="tab-content" id="thresholdTab">
            <div class="settings-row">
                <label>Defect threshold <span id="thresholdValue">60</span>%</label>
                <input type="range" id="thresholdSlider" min="0" max="100" value="60">
            </div>
        </div>
        <div class="modal-nav">
            <button class="primary" onclick="saveSettings()">Save</button>
            <button onclick="closeSettings()">Cancel</button>
        </div>
    </div>
</div>

<div class="toast" id="toast"><span id="toastMessage"></span></div>

<script>
// ─── Clock ──────────────────────────────────────────────────────────
function tickClock() {
    document.getElementById('clock').textContent = new Date().toTimeString().slice(0, 8);
}
tickClock();
setInterval(tickClock, 1000);

// ─── Status polling ─────────────────────────────────────────────────
async function refreshStatus() {
    try {
        const res = await fetch('/status');
        const s = await res.json();
        const active = s.status === 'ACTIVE';

        const label = document.getElementById('statusLabel');
        label.textContent = s.status;
        label.className = 'badge ' + (active ? 'active' : 'standby');
        document.getElementById('liveBadge').style.display = active ? 'inline-block' : 'none';

        const feed = document.getElementById('videoFeed');
        if (active) {
            feed.src = '/video?t=' + Date.now();
            feed.style.display = 'block';
            document.getElementById('noFeed').style.display = 'none';
        } else {
            feed.style.display = 'none';
            feed.removeAttribute('src');
            document.getElementById('noFeed').style.display = 'block';
        }

        document.getElementById('inspectedCount').textContent = s.inspected;
        document.getElementById('goodCount').textContent = s.good;
        document.getElementById('badCount').textContent = s.bad;
        document.getElementById('hdrDefects').textContent = s.bad;
        document.getElementById('uptimeVal').textContent = s.uptime;
        document.getElementById('confVal').textContent =
            s.confidence_pct === null ? '—' : s.confidence_pct + '%';
        document.getElementById('confBar').style.width =
            (s.confidence_pct === null ? 0 : s.confidence_pct) + '%';
        document.getElementById('defectRateVal').textContent = s.defect_rate + '%';
        document.getElementById('defectBar').style.width = s.defect_bar_pct + '%';
    } catch (e) {
        console.error('Status poll failed:', e);
    }
}
refreshStatus();
setInterval(refreshStatus, 1000);

// ─── Event log ──────────────────────────────────────────────────────
async function refreshLog() {
    try {
        const res = await fetch('/events?limit=50');
        const events = await res.json();
        const box = document.getElementById('logBox');
        box.innerHTML = events.map(e =>
            '<div><span class="log-time">' + e.time + '</span> ' +
            '<span class="log-' + e.level + '">' + e.text + '</span></div>'
        ).join('');
        box.scrollTop = box.scrollHeight;
    } catch (e) { /* transient */ }
}
refreshLog();
setInterval(refreshLog, 2000);

// ─── Defect history ─────────────────────────────────────────────────
async function refreshHistory() {
    try {
        const res = await fetch('/history');
        const data = await res.json();
        const container = document.getElementById('defectsSlider');
        container.innerHTML = '';
        if (data.entries.length === 0) {
            container.innerHTML = '<div class="defect-empty">Waiting for detection to start...</div>';
            return;
        }
        data.entries.forEach((entry, idx) => {
            const thumb = document.createElement('div');
            thumb.className = 'defect-thumb' + (entry.sample ? ' sample' : '');
            const img = document.createElement('img');
            img.src = entry.image_source;
            img.alt = entry.sample ? 'Sample defect' : 'Defect ' + (idx + 1);
            img.loading = 'lazy';
            thumb.appendChild(img);
            thumb.onclick = () => openDefectModal(idx);
            container.appendChild(thumb);
        });
    } catch (e) { /* transient */ }
}
refreshHistory();
setInterval(refreshHistory, 3000);

// ─── Modal viewer (cursor lives on the server) ──────────────────────
function renderViewer(v) {
    const modal = document.getElementById('defectModal');
    if (!v.open) {
        modal.style.display = 'none';
        return;
    }
    modal.style.display = 'flex';
    document.getElementById('defectModalImage').src = v.image_source;
    document.getElementById('defectModalPosition').textContent = v.position;
    document.getElementById('prevDefect').disabled = v.prev_disabled;
    document.getElementById('nextDefect').disabled = v.next_disabled;
}

async function openDefectModal(index) {
    const res = await fetch('/viewer/open', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ index })
    });
    if (res.ok) renderViewer(await res.json());
}

async function changeDefect(delta) {
    const res = await fetch('/viewer/nav', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ delta })
    });
    renderViewer(await res.json());
}

async function closeDefectModal() {
    const res = await fetch('/viewer/close', { method: 'POST' });
    renderViewer(await res.json());
}

async function downloadDefectImage() {
    const res = await fetch('/viewer/download');
    if (res.status !== 200) return;
    const d = await res.json();
    const a = document.createElement('a');
    a.href = d.image_source;
    a.download = d.filename;
    a.click();
}

document.getElementById('defectModal').addEventListener('click', (e) => {
    if (e.target === e.currentTarget) closeDefectModal();
});

// ─── Start / stop ───────────────────────────────────────────────────
async function startDetection() {
    const cam = document.getElementById('cameraSelect').value;
    const res = await fetch('/start', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ camera: cam })
    });
    if (!res.ok) {
        const err = await res.json();
        showToast('Cannot access camera: ' + err.error, 5000);
    }
    refreshStatus();
    refreshLog();
}

async function stopDetection() {
    await fetch('/stop', { method: 'POST' });
    refreshStatus();
    refreshLog();
}

// ─── Toast ──────────────────────────────────────────────────────────
let toastTimer = null;
function showToast(msg, ms = 3500) {
    const t = document.getElementById('toast');
    document.getElementById('toastMessage').textContent = msg;
    t.style.display = 'block';
    if (toastTimer) clearTimeout(toastTimer);
    toastTimer = setTimeout(() => { t.style.display = 'none'; }, ms);
}

// ─── Training ───────────────────────────────────────────────────────
async function startTraining() {
    const res = await fetch('/train', { method: 'POST' });
    if (res.status === 202) {
        showToast('Training in progress — please wait ~20 seconds', 7000);
    } else {
        showToast('Training already running');
    }
    refreshLog();
}

// ─── Settings ───────────────────────────────────────────────────────
function openSettings() {
    document.getElementById('settingsModal').style.display = 'flex';
    fetch('/settings').then(r => r.json()).then(s => {
        document.querySelector('input[name="mode"][value="' + s.mode + '"]').checked = true;
        document.getElementById('sensitivitySlider').value = s.sensitivity_pct;
        document.getElementById('sensitivityValue').textContent = s.sensitivity_pct;
        document.getElementById('thresholdSlider').value = s.defect_threshold_pct;
        document.getElementById('thresholdValue').textContent = s.defect_threshold_pct;
        toggleManual();
    });
}

function closeSettings() {
    document.getElementById('settingsModal').style.display = 'none';
}

function toggleManual() {
    const isManual = document.querySelector('input[name="mode"]:checked').value === 'manual';
    document.getElementById('manualControls').style.display = isManual ? 'block' : 'none';
    document.getElementById('defaultInfo').style.display = isManual ? 'none' : 'block';
}

async function saveSettings() {
    const body = {
        mode: document.querySelector('input[name="mode"]:checked').value,
        sensitivity_pct: parseInt(document.getElementById('sensitivitySlider').value, 10),
        defect_threshold_pct: parseInt(document.getElementById('thresholdSlider').value, 10)
    };
    await fetch('/settings', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body)
    });
    closeSettings();
    showToast('Settings saved successfully');
    refreshLog();
}

function switchTab(tabName) {
    document.querySelectorAll('.modal-tab').forEach(t => t.classList.remove('active'));
    document.querySelectorAll('.tab-content').forEach(c => c.classList.remove('active'));
    if (tabName === 'detection') {
        document.querySelector('.modal-tab:first-child').classList.add('active');
        document.getElementById('detectionTab').classList.add('active');
    } else {
        document.querySelector('.modal-tab:last-child').classList.add('active');
        document.getElementById('thresholdTab').classList.add('active');
    }
}

document.getElementById('settingsModal').addEventListener('click', (e) => {
    if (e.target === e.currentTarget) closeSettings();
});

document.querySelectorAll('input[type="range"]').forEach(slider => {
    slider.addEventListener('input', () => {
        const out = document.getElementById(slider.id.replace('Slider', 'Value'));
        if (out) out.textContent = slider.value;
    });
});

// ─── Slider drag scrolling ──────────────────────────────────────────
const slider = document.getElementById('defectsSlider');
let isDown = false, startX, scrollLeft;
slider.addEventListener('mousedown', (e) => {
    isDown = true;
    startX = e.pageX - slider.offsetLeft;
    scrollLeft = slider.scrollLeft;
});
slider.addEventListener('mouseleave', () => { isDown = false; });
slider.addEventListener('mouseup', () => { isDown = false; });
slider.addEventListener('mousemove', (e) => {
    if (!isDown) return;
    e.preventDefault();
    const x = e.pageX - slider.offsetLeft;
    slider.scrollLeft = scrollLeft - (x - startX) * 1.8;
});
</script>
</body>
</html>
"##;

pub const REPORT_HTML: &str = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sliver Station — Report</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f7fa; color: #1f2937; padding: 20px;
        }
        .container { max-width: 1100px; margin: 0 auto; }
        header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
        h1 { color: #2c3e50; font-size: 1.5em; }
        .mono { font-family: 'Courier New', monospace; }
        .charts { display: grid; grid-template-columns: 2fr 1fr; gap: 20px; }
        .card {
            background: white; border-radius: 12px; padding: 20px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.08); margin-bottom: 20px;
        }
        .chart-wrap { position: relative; height: 240px; }
        table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
        th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #f3f4f6; }
        th { color: #9ca3af; font-weight: 600; font-size: 0.8em; text-transform: uppercase; }
        .pill { padding: 2px 10px; border-radius: 20px; font-size: 0.8em; font-weight: 600; }
        .pill.good { background: #dcfce7; color: #16a34a; }
        .pill.bad { background: #fee2e2; color: #c0202e; }
        .gray { color: #9ca3af; }
        a.back { color: #c0202e; text-decoration: none; font-weight: 600; }
    </style>
</head>
<body>
<div class="container">
    <header>
        <h1>Inspection Report</h1>
        <div><span class="mono" id="reportDate"></span> &nbsp; <a class="back" href="/">Dashboard</a></div>
    </header>

    <div class="charts">
        <div class="card">
            <h3>Defects by hour</h3>
            <div class="chart-wrap"><canvas id="chartLine"></canvas></div>
        </div>
        <div class="card">
            <h3>Outcome split</h3>
            <div class="chart-wrap"><canvas id="chartDonut"></canvas></div>
        </div>
    </div>

    <div class="card">
        <h3>Defect types</h3>
        <div class="chart-wrap"><canvas id="chartBar"></canvas></div>
    </div>

    <div class="card">
        <h3>Recent inspections</h3>
        <table>
            <thead>
                <tr><th>ID</th><th>Time</th><th>Camera</th><th>Defect type</th><th>Confidence</th><th>Status</th></tr>
            </thead>
            <tbody id="tBody"></tbody>
        </table>
    </div>
</div>

<script>
document.getElementById('reportDate').textContent = new Date().toLocaleDateString('en-IN', {
    day: 'numeric', month: 'short', year: 'numeric', hour: '2-digit', minute: '2-digit'
});

Chart.defaults.font.size = 11;
Chart.defaults.color = '#9ca3af';

const C_RED = '#c0202e';
const C_GREEN = '#16a34a';
const gridCol = '#f3f4f6';

async function render() {
    const res = await fetch('/report/data');
    const data = await res.json();

    new Chart(document.getElementById('chartLine'), {
        type: 'line',
        data: {
            labels: data.defects_by_hour.labels,
            datasets: [{
                label: 'Defects',
                data: data.defects_by_hour.data,
                borderColor: C_RED,
                backgroundColor: 'rgba(192,32,46,0.07)',
                tension: 0.4,
                fill: true,
                pointRadius: 3,
                borderWidth: 2
            }]
        },
        options: {
            responsive: true, maintainAspectRatio: false,
            plugins: { legend: { display: false } },
            scales: {
                x: { grid: { color: gridCol } },
                y: { beginAtZero: true, grid: { color: gridCol }, ticks: { stepSize: 3 } }
            }
        }
    });

    new Chart(document.getElementById('chartDonut'), {
        type: 'doughnut',
        data: {
            labels: data.outcome_split.labels,
            datasets: [{
                data: data.outcome_split.data,
                backgroundColor: [C_GREEN, C_RED],
                borderColor: ['#fff', '#fff'],
                borderWidth: 3
            }]
        },
        options: {
            responsive: true, maintainAspectRatio: false, cutout: '70%',
            plugins: { legend: { position: 'bottom' } }
        }
    });

    new Chart(document.getElementById('chartBar'), {
        type: 'bar',
        data: {
            labels: data.defect_types.labels,
            datasets: [{
                label: 'Occurrences',
                data: data.defect_types.data,
                backgroundColor: [
                    'rgba(192,32,46,0.85)',
                    'rgba(192,32,46,0.68)',
                    'rgba(192,32,46,0.52)',
                    'rgba(192,32,46,0.38)',
                    'rgba(192,32,46,0.24)'
                ],
                borderRadius: 5,
                maxBarThickness: 44
            }]
        },
        options: {
            responsive: true, maintainAspectRatio: false,
            plugins: { legend: { display: false } },
            scales: {
                x: { grid: { display: false } },
                y: { beginAtZero: true, grid: { color: gridCol }, ticks: { stepSize: 5 } }
            }
        }
    });

    const tbody = document.getElementById('tBody');
    tbody.innerHTML = data.rows.map(r => {
        const good = r.status === 'good';
        return '<tr>' +
            '<td class="mono gray">' + r.id + '</td>' +
            '<td class="mono">' + r.timestamp + '</td>' +
            '<td>' + r.camera + '</td>' +
            '<td>' + (r.defect_type === null ? '—' : r.defect_type) + '</td>' +
            '<td class="mono">' + r.confidence_pct.toFixed(1) + '%</td>' +
            '<td><span class="pill ' + r.status + '">' + (good ? 'Good' : 'Defective') + '</span></td>' +
            '</tr>';
    }).join('');
}
render();
</script>
</body>
</html>
"##;
