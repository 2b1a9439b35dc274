use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub const INDEX_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Virtual Try-On</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }

        .container {
            background: white;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
            max-width: 1100px;
            margin: 0 auto;
            padding: 40px;
        }

        h1 {
            color: #333;
            margin-bottom: 10px;
            font-size: 2em;
        }

        h2 {
            color: #667eea;
            font-size: 1em;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin-bottom: 15px;
        }

        .subtitle {
            color: #666;
            margin-bottom: 30px;
            font-size: 0.9em;
        }

        .panes {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 30px;
        }

        @media (max-width: 800px) {
            .panes { grid-template-columns: 1fr; }
        }

        .upload-area {
            border: 3px dashed #667eea;
            border-radius: 15px;
            min-height: 280px;
            padding: 20px;
            text-align: center;
            cursor: pointer;
            transition: all 0.3s;
            background: #f8f9ff;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
        }

        .upload-area:hover,
        .upload-area.dragover {
            border-color: #764ba2;
            background: #f0f2ff;
        }

        .upload-area img,
        .upload-area video {
            max-width: 100%;
            max-height: 360px;
            border-radius: 10px;
        }

        .upload-icon {
            font-size: 3em;
            margin-bottom: 15px;
        }

        .upload-text {
            color: #667eea;
            font-size: 1.1em;
            font-weight: 600;
            margin-bottom: 8px;
        }

        .upload-hint {
            color: #999;
            font-size: 0.85em;
        }

        input[type="file"] {
            display: none;
        }

        .actions {
            display: flex;
            gap: 10px;
            margin-top: 12px;
            flex-wrap: wrap;
        }

        button {
            background: #f8f9ff;
            color: #667eea;
            padding: 8px 16px;
            border-radius: 20px;
            font-size: 0.85em;
            font-weight: 600;
            border: 2px solid #667eea;
            cursor: pointer;
        }

        button.primary {
            background: #667eea;
            color: white;
            font-size: 1.1em;
            padding: 14px 40px;
        }

        button:disabled {
            opacity: 0.5;
            cursor: not-allowed;
        }

        .tabs {
            display: flex;
            gap: 8px;
            margin: 15px 0 10px;
        }

        .tabs button.active {
            background: #667eea;
            color: white;
        }

        .gallery {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(80px, 1fr));
            gap: 8px;
            margin-top: 10px;
        }

        .gallery img {
            width: 100%;
            aspect-ratio: 3 / 4;
            object-fit: cover;
            border-radius: 8px;
            cursor: pointer;
            border: 2px solid transparent;
        }

        .gallery img:hover {
            border-color: #764ba2;
        }

        .submit-row {
            text-align: center;
            margin-top: 30px;
        }

        .loading {
            text-align: center;
            padding: 40px;
            display: none;
        }

        .spinner {
            border: 4px solid #f3f3f3;
            border-top: 4px solid #667eea;
            border-radius: 50%;
            width: 50px;
            height: 50px;
            animation: spin 1s linear infinite;
            margin: 0 auto 20px;
        }

        @keyframes spin {
            0% { transform: rotate(0deg); }
            100% { transform: rotate(360deg); }
        }

        .results {
            display: none;
            margin-top: 30px;
            padding-top: 30px;
            border-top: 2px solid #f0f0f0;
        }

        .result-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
            gap: 20px;
        }

        .result-grid figure img {
            width: 100%;
            border-radius: 10px;
            box-shadow: 0 4px 15px rgba(0,0,0,0.1);
        }

        .result-grid figcaption {
            margin-top: 8px;
            text-align: center;
        }

        .result-grid a {
            color: #667eea;
            font-weight: 600;
            text-decoration: none;
        }

        .error {
            background: #fee;
            border: 2px solid #fcc;
            color: #c33;
            padding: 15px;
            border-radius: 10px;
            margin-top: 20px;
            display: none;
            white-space: pre-wrap;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>👕 Virtual Try-On</h1>
        <p class="subtitle">Rust + Vertex AI • Upload a photo of yourself and a clothing item</p>

        <div class="panes">
            <section>
                <h2>1. Person</h2>
                <div class="upload-area" id="personArea">
                    <div class="upload-icon">🧍</div>
                    <div class="upload-text">Click or drag a photo here</div>
                    <div class="upload-hint">JPG, PNG, WebP</div>
                </div>
                <input type="file" id="personInput" accept="image/*">
                <div class="actions">
                    <button id="cameraButton">📷 Use camera</button>
                    <button id="captureButton" style="display:none" disabled>Capture</button>
                    <button id="switchCameraButton" style="display:none">🔄 Switch camera</button>
                    <button id="cancelCameraButton" style="display:none">Cancel</button>
                    <button id="clearPersonButton">Clear</button>
                </div>
                <div class="gallery" id="personGallery"></div>
            </section>

            <section>
                <h2>2. Clothing</h2>
                <div class="upload-area" id="productArea">
                    <div class="upload-icon">👗</div>
                    <div class="upload-text">Click or drag a clothing photo here</div>
                    <div class="upload-hint">JPG, PNG, WebP</div>
                </div>
                <input type="file" id="productInput" accept="image/*">
                <div class="actions">
                    <button id="clearProductButton">Clear</button>
                </div>
                <div class="tabs" id="clothesTabs"></div>
                <div class="gallery" id="clothesGallery"></div>
            </section>
        </div>

        <div class="submit-row">
            <button class="primary" id="submitButton" disabled>✨ Try it on</button>
        </div>

        <div class="loading" id="loading">
            <div class="spinner"></div>
            <p>Generating try-on images...</p>
        </div>

        <div class="error" id="error"></div>

        <div class="results" id="results">
            <h2>Results</h2>
            <div class="result-grid" id="resultGrid"></div>
        </div>
    </div>

    <script>
        const STORAGE_KEYS = { person: 'tryon.personImage', product: 'tryon.productImage' };
        const state = { person: null, product: null };
        let cameraStream = null;
        let facingMode = 'environment';

        const $ = (id) => document.getElementById(id);
        const personArea = $('personArea');
        const productArea = $('productArea');
        const submitButton = $('submitButton');
        const errorDiv = $('error');

        function renderSlot(area, dataUri, icon, text) {
            area.innerHTML = '';
            if (dataUri) {
                const img = document.createElement('img');
                img.src = dataUri;
                area.appendChild(img);
            } else {
                area.innerHTML = `<div class="upload-icon">${icon}</div>` +
                    `<div class="upload-text">${text}</div>` +
                    `<div class="upload-hint">JPG, PNG, WebP</div>`;
            }
        }

        function setImage(kind, dataUri) {
            state[kind] = dataUri;
            try {
                if (dataUri) {
                    localStorage.setItem(STORAGE_KEYS[kind], dataUri);
                } else {
                    localStorage.removeItem(STORAGE_KEYS[kind]);
                }
            } catch (e) {
                console.warn('Could not persist image', e);
            }
            if (kind === 'person') {
                renderSlot(personArea, dataUri, '🧍', 'Click or drag a photo here');
            } else {
                renderSlot(productArea, dataUri, '👗', 'Click or drag a clothing photo here');
            }
            submitButton.disabled = !(state.person && state.product);
        }

        function readFile(file) {
            return new Promise((resolve, reject) => {
                const reader = new FileReader();
                reader.onload = (e) => resolve(e.target.result);
                reader.onerror = reject;
                reader.readAsDataURL(file);
            });
        }

        async function urlToDataUri(url) {
            const response = await fetch(url);
            return readFile(await response.blob());
        }

        function wireUpload(area, input, kind) {
            area.addEventListener('click', () => {
                if (!cameraStream || kind !== 'person') input.click();
            });
            area.addEventListener('dragover', (e) => {
                e.preventDefault();
                area.classList.add('dragover');
            });
            area.addEventListener('dragleave', () => area.classList.remove('dragover'));
            area.addEventListener('drop', async (e) => {
                e.preventDefault();
                area.classList.remove('dragover');
                const file = e.dataTransfer.files[0];
                if (file && file.type.startsWith('image/')) {
                    setImage(kind, await readFile(file));
                }
            });
            input.addEventListener('change', async (e) => {
                const file = e.target.files[0];
                if (file) setImage(kind, await readFile(file));
                input.value = '';
            });
        }

        function stopCamera() {
            if (cameraStream) {
                cameraStream.getTracks().forEach((track) => track.stop());
                cameraStream = null;
            }
            const video = $('cameraVideo');
            if (video) video.srcObject = null;
            $('captureButton').style.display = 'none';
            $('switchCameraButton').style.display = 'none';
            $('cancelCameraButton').style.display = 'none';
            $('cameraButton').style.display = '';
        }

        async function startCamera() {
            stopCamera();
            const captureButton = $('captureButton');
            captureButton.disabled = true;
            try {
                cameraStream = await navigator.mediaDevices.getUserMedia({
                    video: {
                        facingMode,
                        width: { ideal: 1920 },
                        height: { ideal: 1080 }
                    },
                    audio: false
                });
            } catch (e) {
                showError('Could not access the camera: ' + e.message);
                stopCamera();
                setImage('person', state.person);
                return;
            }
            personArea.innerHTML = '';
            const video = document.createElement('video');
            video.id = 'cameraVideo';
            video.autoplay = true;
            video.playsInline = true;
            video.muted = true;
            // No frame to draw until the first one has been decoded.
            video.addEventListener('loadeddata', () => {
                captureButton.disabled = video.videoWidth === 0;
            });
            video.srcObject = cameraStream;
            personArea.appendChild(video);
            $('cameraButton').style.display = 'none';
            captureButton.style.display = '';
            $('switchCameraButton').style.display = '';
            $('cancelCameraButton').style.display = '';
        }

        function switchCamera() {
            facingMode = facingMode === 'user' ? 'environment' : 'user';
            startCamera();
        }

        function capturePhoto() {
            const video = $('cameraVideo');
            if (!video || video.videoWidth === 0 || video.videoHeight === 0) return;
            const canvas = document.createElement('canvas');
            canvas.width = video.videoWidth;
            canvas.height = video.videoHeight;
            canvas.getContext('2d').drawImage(video, 0, 0, canvas.width, canvas.height);
            const dataUri = canvas.toDataURL('image/jpeg', 0.9);
            stopCamera();
            setImage('person', dataUri);
        }

        function renderGallery(container, urls, kind) {
            container.innerHTML = '';
            urls.forEach((url) => {
                const img = document.createElement('img');
                img.src = url;
                img.loading = 'lazy';
                img.addEventListener('click', async () => {
                    if (kind === 'person') stopCamera();
                    setImage(kind, await urlToDataUri(url));
                });
                container.appendChild(img);
            });
        }

        async function loadGalleries() {
            try {
                const person = await (await fetch('/api/images/person')).json();
                renderGallery($('personGallery'), person.images || [], 'person');
            } catch (e) {
                console.warn('Person gallery unavailable', e);
            }
            try {
                const clothes = await (await fetch('/api/images/clothes')).json();
                const tabs = $('clothesTabs');
                tabs.innerHTML = '';
                Object.entries(clothes).forEach(([key, category], index) => {
                    const tab = document.createElement('button');
                    tab.textContent = category.label;
                    tab.addEventListener('click', () => {
                        tabs.querySelectorAll('button').forEach((b) => b.classList.remove('active'));
                        tab.classList.add('active');
                        renderGallery($('clothesGallery'), category.images, 'product');
                    });
                    tabs.appendChild(tab);
                    if (index === 0) tab.click();
                });
            } catch (e) {
                console.warn('Clothes gallery unavailable', e);
            }
        }

        function showError(message) {
            errorDiv.textContent = 'Error: ' + message;
            errorDiv.style.display = 'block';
        }

        function renderResults(images) {
            const grid = $('resultGrid');
            grid.innerHTML = '';
            images.forEach((src, i) => {
                const figure = document.createElement('figure');
                figure.innerHTML = `<img src="${src}" alt="Try-on result ${i + 1}">` +
                    `<figcaption><a href="${src}" download="try-on-${i + 1}.png">⬇ Download</a></figcaption>`;
                grid.appendChild(figure);
            });
            $('results').style.display = 'block';
        }

        async function submit() {
            if (!state.person || !state.product) return;
            submitButton.disabled = true;
            $('loading').style.display = 'block';
            $('results').style.display = 'none';
            errorDiv.style.display = 'none';

            try {
                const response = await fetch('/api/try-on', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({
                        personImage: state.person,
                        productImages: [state.product],
                        sampleCount: 2,
                        baseSteps: 32
                    })
                });
                const result = await response.json();
                if (!response.ok || !result.success) {
                    throw new Error(result.error || 'Try-on failed');
                }
                renderResults(result.images);
            } catch (error) {
                showError(error.message);
            } finally {
                $('loading').style.display = 'none';
                submitButton.disabled = !(state.person && state.product);
            }
        }

        wireUpload(personArea, $('personInput'), 'person');
        wireUpload(productArea, $('productInput'), 'product');
        $('cameraButton').addEventListener('click', startCamera);
        $('captureButton').addEventListener('click', capturePhoto);
        $('switchCameraButton').addEventListener('click', switchCamera);
        $('cancelCameraButton').addEventListener('click', () => {
            stopCamera();
            setImage('person', state.person);
        });
        $('clearPersonButton').addEventListener('click', () => {
            stopCamera();
            setImage('person', null);
        });
        $('clearProductButton').addEventListener('click', () => setImage('product', null));
        submitButton.addEventListener('click', submit);

        setImage('person', localStorage.getItem(STORAGE_KEYS.person));
        setImage('product', localStorage.getItem(STORAGE_KEYS.product));
        loadGalleries();
    </script>
</body>
</html>
"#;
