/// Embedded single-page viewer: analyzer and comparer.
///
/// `__THEME__` is replaced with the configured Mermaid theme as a JSON string.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>deckmap</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #f8fafc;
            color: #1f2937;
        }
        header { padding: 16px 24px; background: #0f172a; color: #e2e8f0; display: flex; gap: 24px; align-items: center; }
        header h1 { font-size: 1.2em; }
        header a { color: #94a3b8; text-decoration: none; }
        header a.active { color: #38bdf8; }
        main { padding: 24px; max-width: 1400px; margin: 0 auto; }
        .dropzone {
            border: 2px dashed #cbd5e1; border-radius: 12px; padding: 32px;
            text-align: center; color: #64748b; cursor: pointer;
        }
        .dropzone.active { border-color: #0ea5e9; background: #e0f2fe; }
        .error { margin-top: 16px; padding: 12px 16px; border-radius: 12px; background: #fee2e2; color: #b91c1c; display: none; }
        .grid { display: grid; grid-template-columns: 1fr 2fr; gap: 24px; margin-top: 24px; }
        .card { background: #fff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 20px; }
        .card h2 { font-size: 1.1em; margin-bottom: 12px; }
        .clickable { cursor: pointer; }
        .clickable:hover { text-decoration: underline; }
        #plugins { list-style: none; max-height: 260px; overflow-y: auto; font-size: 0.9em; }
        #plugins li { padding: 3px 0; }
        #plugins .scope { font-style: italic; font-size: 0.85em; color: #64748b; }
        #modal { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.6); display: none; align-items: center; justify-content: center; }
        #modal.visible { display: flex; }
        #modal .panel { background: #fff; border-radius: 12px; width: min(800px, 90vw); max-height: 80vh; display: flex; flex-direction: column; }
        #modal .title { padding: 16px 20px; border-bottom: 1px solid #e2e8f0; display: flex; justify-content: space-between; }
        #modal pre { margin: 0; padding: 16px 20px; overflow: auto; background: #1e1e1e; color: #d4d4d4; border-radius: 0 0 12px 12px; }
        .pair { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
        button { padding: 10px 28px; border: none; border-radius: 8px; background: #2563eb; color: #fff; font-weight: 600; cursor: pointer; }
        button:disabled { background: #9ca3af; cursor: not-allowed; }
        table.diff { width: 100%; border-collapse: collapse; font-family: monospace; font-size: 0.85em; margin-top: 24px; }
        table.diff td { padding: 1px 8px; white-space: pre; width: 50%; vertical-align: top; }
        table.diff tr.hunk td { background: #e0f2fe; color: #0369a1; }
        td.removed { background: #fee2e2; }
        td.added { background: #dcfce7; }
        [hidden] { display: none !important; }
    </style>
</head>
<body>
    <header>
        <h1>deckmap</h1>
        <a href="#analyzer" id="nav-analyzer" class="active">Analyzer</a>
        <a href="#comparer" id="nav-comparer">Comparer</a>
    </header>

    <main>
        <section id="analyzer">
            <div class="dropzone" id="drop-main">Drag 'n' drop a .yaml file here, or click to select one</div>
            <input type="file" id="file-main" accept=".yaml,.yml" hidden>
            <div class="error" id="error-main"></div>

            <div class="grid" id="results" hidden>
                <div>
                    <div class="card">
                        <h2>Analysis Results</h2>
                        <p class="clickable" data-collection="services"><strong>Services:</strong> <span id="count-services"></span></p>
                        <p class="clickable" data-collection="routes"><strong>Routes:</strong> <span id="count-routes"></span></p>
                        <p class="clickable" data-collection="consumers"><strong>Consumers:</strong> <span id="count-consumers"></span></p>
                    </div>
                    <div class="card" style="margin-top: 24px;">
                        <h2 id="plugins-title">Plugins</h2>
                        <ul id="plugins"></ul>
                    </div>
                </div>
                <div class="card">
                    <h2>Graphical Visualization</h2>
                    <div id="graph"></div>
                </div>
            </div>
        </section>

        <section id="comparer" hidden>
            <div class="pair">
                <div>
                    <div class="dropzone" id="drop-old">Drop Original File Here</div>
                    <input type="file" id="file-old" accept=".yaml,.yml" hidden>
                </div>
                <div>
                    <div class="dropzone" id="drop-new">Drop Modified File Here</div>
                    <input type="file" id="file-new" accept=".yaml,.yml" hidden>
                </div>
            </div>
            <p style="text-align: center; margin-top: 24px;"><button id="compare" disabled>Compare Files</button></p>
            <table class="diff" id="diff"></table>
        </section>
    </main>

    <div id="modal">
        <div class="panel">
            <div class="title"><strong id="modal-title"></strong><span class="clickable" id="modal-close">✕</span></div>
            <pre id="modal-body"></pre>
        </div>
    </div>

    <script type="module">
        import mermaid from 'https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs';

        mermaid.initialize({ startOnLoad: false, theme: __THEME__, securityLevel: 'loose' });

        const $ = (id) => document.getElementById(id);
        let graphRenders = 0;

        function wireDropzone(zone, input, onFile) {
            zone.addEventListener('click', () => input.click());
            zone.addEventListener('dragover', (e) => { e.preventDefault(); zone.classList.add('active'); });
            zone.addEventListener('dragleave', () => zone.classList.remove('active'));
            zone.addEventListener('drop', (e) => {
                e.preventDefault();
                zone.classList.remove('active');
                if (e.dataTransfer.files[0]) onFile(e.dataTransfer.files[0]);
            });
            input.addEventListener('change', () => { if (input.files[0]) onFile(input.files[0]); });
        }

        async function showDetail(url) {
            const response = await fetch(url);
            const detail = await response.json();
            $('modal-title').textContent = detail.title || 'Details';
            $('modal-body').textContent = detail.yaml ?? 'No data';
            $('modal').classList.add('visible');
        }

        function closeModal() {
            $('modal').classList.remove('visible');
            if (location.hash.startsWith('#node/')) history.replaceState(null, '', '#analyzer');
        }

        async function refresh() {
            const response = await fetch('/api/summary');
            if (!response.ok) { $('results').hidden = true; return; }
            const { summary } = await response.json();

            $('count-services').textContent = summary.service_count;
            $('count-routes').textContent = summary.route_count;
            $('count-consumers').textContent = summary.consumer_count;
            $('plugins-title').textContent = `Plugins (${summary.plugins.length})`;

            const list = $('plugins');
            list.replaceChildren(...summary.plugins.map((p) => {
                const li = document.createElement('li');
                li.className = 'clickable';
                const name = document.createElement('strong');
                name.textContent = p.name;
                const scope = document.createElement('span');
                scope.className = 'scope';
                scope.textContent = ` (${p.scope}${p.scope_name ? ' on ' + p.scope_name : ''})`;
                li.append(name, scope);
                const query = new URLSearchParams({ name: p.name, scope: p.scope });
                if (p.scope_name) query.set('scope_name', p.scope_name);
                li.addEventListener('click', () => showDetail(`/api/plugin?${query}`));
                return li;
            }));

            const graph = await (await fetch('/api/graph')).json();
            const { svg } = await mermaid.render(`deck-graph-${graphRenders++}`, graph.mermaid);
            $('graph').innerHTML = svg;
            $('results').hidden = false;
        }

        async function upload(file) {
            const response = await fetch(`/api/document?name=${encodeURIComponent(file.name)}`, {
                method: 'POST',
                body: await file.text(),
            });
            if (response.ok) {
                $('error-main').style.display = 'none';
                await refresh();
            } else {
                const { error } = await response.json();
                $('error-main').textContent = error;
                $('error-main').style.display = 'block';
                $('results').hidden = true;
            }
        }

        const compareFiles = { old: null, new: null };

        function loadCompareFile(side) {
            return async (file) => {
                compareFiles[side] = { name: file.name, content: await file.text() };
                $(`drop-${side}`).textContent = `Loaded: ${file.name}`;
                $('compare').disabled = !(compareFiles.old && compareFiles.new);
            };
        }

        function diffRow(cells, className) {
            const tr = document.createElement('tr');
            if (className) tr.className = className;
            for (const [text, cls] of cells) {
                const td = document.createElement('td');
                td.textContent = text;
                if (cls) td.className = cls;
                tr.append(td);
            }
            return tr;
        }

        function renderDiff(diff) {
            const table = $('diff');
            table.replaceChildren();
            if (diff.hunks.length === 0) {
                table.append(diffRow([['No differences', null], ['', null]]));
                return;
            }
            for (const hunk of diff.hunks) {
                table.append(diffRow([[`@@ -${hunk.old_start},${hunk.old_lines} +${hunk.new_start},${hunk.new_lines} @@`, null], ['', null]], 'hunk'));
                let removed = [];
                let added = [];
                const flush = () => {
                    for (let i = 0; i < Math.max(removed.length, added.length); i++) {
                        table.append(diffRow([
                            [removed[i] ?? '', removed[i] !== undefined ? 'removed' : null],
                            [added[i] ?? '', added[i] !== undefined ? 'added' : null],
                        ]));
                    }
                    removed = [];
                    added = [];
                };
                for (const line of hunk.lines) {
                    if (line.kind === 'removed') {
                        if (added.length) flush();
                        removed.push(line.text);
                    } else if (line.kind === 'added') {
                        added.push(line.text);
                    } else {
                        flush();
                        table.append(diffRow([[line.text, null], [line.text, null]]));
                    }
                }
                flush();
            }
        }

        async function compare() {
            const response = await fetch('/api/diff', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    old_name: compareFiles.old.name, old: compareFiles.old.content,
                    new_name: compareFiles.new.name, new: compareFiles.new.content,
                }),
            });
            const result = await response.json();
            if (!response.ok) {
                alert(`Failed to parse or compare files: ${result.error}`);
                return;
            }
            renderDiff(result.diff);
        }

        function route() {
            const hash = location.hash;
            if (hash.startsWith('#node/')) {
                showDetail(`/api/node/${encodeURIComponent(hash.slice('#node/'.length))}`);
                return;
            }
            const comparer = hash === '#comparer';
            $('analyzer').hidden = comparer;
            $('comparer').hidden = !comparer;
            $('nav-analyzer').classList.toggle('active', !comparer);
            $('nav-comparer').classList.toggle('active', comparer);
        }

        wireDropzone($('drop-main'), $('file-main'), upload);
        wireDropzone($('drop-old'), $('file-old'), loadCompareFile('old'));
        wireDropzone($('drop-new'), $('file-new'), loadCompareFile('new'));
        $('compare').addEventListener('click', compare);
        $('modal-close').addEventListener('click', closeModal);
        $('modal').addEventListener('click', (e) => { if (e.target === $('modal')) closeModal(); });
        document.querySelectorAll('[data-collection]').forEach((el) =>
            el.addEventListener('click', () => showDetail(`/api/entities/${el.dataset.collection}`)));
        window.addEventListener('hashchange', route);

        route();
        refresh();
    </script>
</body>
</html>
"##;
