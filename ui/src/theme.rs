pub const GLOBAL_CSS: &str = r#"
:root {
  --bg: #05090f;
  --bg-elev-1: #0b111a;
  --panel: #0d1520;
  --border: rgba(255, 255, 255, 0.08);
  --border-strong: rgba(255, 255, 255, 0.16);
  --text: #e6edf7;
  --text-dim: #b7c6d9;
  --text-muted: #7f8ba0;
  --accent: #5cb0ff;
  --accent-strong: #7ac6ff;
  --positive: #3fb68b;
  --negative: #f0635c;
  --warning: #f7c843;
  --surface-hover: rgba(255, 255, 255, 0.05);
  --shadow-soft: 0 14px 42px rgba(0, 0, 0, 0.38);
  --radius: 10px;
  --radius-pill: 999px;
  --space-1: 4px;
  --space-2: 8px;
  --space-3: 12px;
  --space-4: 16px;
  --space-6: 24px;
  --font-body: "Inter", "SF Pro Text", system-ui, -apple-system, sans-serif;
  --font-mono: "JetBrains Mono", "SFMono-Regular", ui-monospace, monospace;
  --transition: 140ms ease-out;
}

* { box-sizing: border-box; }
html, body {
  padding: 0;
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: 14px;
}
button {
  font-family: inherit;
  cursor: pointer;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--bg-elev-1);
  color: var(--text);
  padding: 6px 14px;
  transition: background var(--transition), border-color var(--transition);
}
button:hover { background: var(--surface-hover); }
button:disabled { opacity: 0.5; cursor: default; }
input {
  background: var(--bg-elev-1);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text);
  padding: 6px 10px 6px 30px;
  outline: none;
  transition: width var(--transition), border-color var(--transition);
}
input:focus { border-color: var(--accent); }

.app-root { min-height: 100vh; display: flex; flex-direction: column; }
.page { flex: 1; padding: var(--space-6); max-width: 1280px; margin: 0 auto; width: 100%; }
.panel {
  background: var(--panel);
  border: 1px solid var(--border);
  border-radius: var(--radius);
}

/* ---- navbar ---------------------------------------------------------- */
.market-strip {
  background: var(--accent);
  color: #04121f;
  padding: 6px var(--space-4);
  font-size: 12px;
  display: flex;
  gap: var(--space-3);
  align-items: center;
}
.market-strip .up { color: #065f46; font-weight: 600; }
.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: var(--space-4);
  padding: var(--space-3) var(--space-4);
  border-bottom: 1px solid var(--border);
  background: var(--bg-elev-1);
}
.brand { display: flex; align-items: center; gap: var(--space-2); font-size: 17px; font-weight: 700; }
.brand-mark { color: var(--accent); font-size: 20px; }
.nav-menu { display: flex; gap: var(--space-1); }
.nav-item { position: relative; }
.nav-item > button { border: none; background: transparent; color: var(--text-dim); }
.nav-item > button:hover { color: var(--text); background: var(--surface-hover); }
.nav-flyout {
  display: none;
  position: absolute;
  top: 100%;
  left: 0;
  min-width: 320px;
  padding: var(--space-4);
  z-index: 30;
  box-shadow: var(--shadow-soft);
}
.nav-item:hover .nav-flyout, .nav-item:focus-within .nav-flyout { display: block; }
.nav-flyout-title { font-weight: 600; margin-bottom: var(--space-2); }
.nav-flyout-body { color: var(--text-muted); font-size: 13px; }
.strategy-grid { display: grid; grid-template-columns: 1fr 1fr; gap: var(--space-3); min-width: 460px; }
.strategy-entry { padding: var(--space-2); border-radius: var(--radius); }
.strategy-entry:hover { background: var(--surface-hover); }
.strategy-entry .title { font-weight: 600; font-size: 13px; }
.strategy-entry .desc { color: var(--text-muted); font-size: 12px; }
.search-wrap { position: relative; }
.search-wrap .search-icon {
  position: absolute;
  left: 10px;
  top: 50%;
  transform: translateY(-50%);
  color: var(--text-muted);
  pointer-events: none;
}
.search-input { width: 240px; }
.search-input.focused { width: 320px; }

/* ---- pattern cards --------------------------------------------------- */
.card-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
  gap: var(--space-6);
}
.pattern-card {
  position: relative;
  padding: var(--space-6);
  border-radius: 16px;
  box-shadow: var(--shadow-soft);
  transition: border-color var(--transition);
}
.pattern-card:hover { border-color: var(--border-strong); }
.chart-open {
  position: absolute;
  top: var(--space-3);
  right: var(--space-3);
  background: var(--accent);
  color: #04121f;
  border: none;
  font-weight: 600;
  font-size: 13px;
}
.chart-open:hover { background: var(--accent-strong); }
.card-symbol { margin: 0 0 var(--space-2); font-size: 22px; color: var(--accent); letter-spacing: 0.04em; }
.card-stats { list-style: none; margin: 0; padding: 0; font-size: 13px; color: var(--text-dim); }
.card-stats li { padding: 2px 0; }
.card-stats .label { color: var(--text); font-weight: 500; margin-right: 4px; }
.card-stats .num { font-family: var(--font-mono); }
.card-change.up { color: var(--positive); }
.card-change.down { color: var(--negative); }
.card-patterns { margin-top: var(--space-2); color: var(--warning); }

/* ---- pager ----------------------------------------------------------- */
.pager { display: flex; justify-content: center; gap: var(--space-2); margin-top: var(--space-6); }
.pager button.active {
  background: var(--accent);
  color: #04121f;
  border-color: var(--accent);
  font-weight: 600;
}

/* ---- loading --------------------------------------------------------- */
.board-loading { display: flex; align-items: center; justify-content: center; min-height: 50vh; }
.spinner {
  width: 36px;
  height: 36px;
  border: 4px solid var(--accent);
  border-top-color: transparent;
  border-radius: 50%;
  animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.chart-loading { display: flex; align-items: center; justify-content: center; gap: var(--space-3); height: 400px; color: var(--text-muted); }
.chart-loading .spinner { width: 24px; height: 24px; border-width: 3px; }

/* ---- chart modal ----------------------------------------------------- */
.modal-backdrop {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.75);
  display: flex;
  align-items: center;
  justify-content: center;
  padding: var(--space-4);
  z-index: 50;
}
.modal { width: 100%; max-width: 1100px; max-height: 90vh; overflow: hidden; }
.modal-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: var(--space-4);
  border-bottom: 1px solid var(--border);
}
.modal-header h2 { margin: 0; font-size: 17px; }
.modal-header .modal-sub { color: var(--text-muted); font-size: 12px; }
.modal-close {
  border: none;
  background: transparent;
  color: var(--text-muted);
  font-size: 22px;
  line-height: 1;
}
.modal-close:hover { color: var(--text); }
.modal-body { padding: var(--space-4); }
.chart-canvas { display: block; width: 100%; height: 400px; border-radius: var(--radius); }
"#;
