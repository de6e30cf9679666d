//! Server-rendered HTML pages.
//!
//! The HTML surface is deliberately thin: an upload form, a
//! region-selection page with a drag-to-select preview, and a status page
//! that polls the JSON endpoint. Pages are built from placeholder
//! templates rather than a template engine.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;

use demark_models::{preview_file_name, Dimensions, JobId};

use crate::flash::{html_escape, redirect_with_message, MessageParams};
use crate::state::AppState;

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
.message{background:#fff3cd;border:1px solid #ffe69c;padding:.5rem 1rem;border-radius:4px}\
#preview-wrap{position:relative;display:inline-block}\
#selection{position:absolute;border:2px dashed #d33;background:rgba(220,50,50,.2);pointer-events:none}\
progress{width:100%;height:1.5rem}";

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Demark</title><style>__STYLE__</style></head>
<body>
<h1>Demark</h1>
<p>Upload a video, mark the watermark, download a clean copy.</p>
__MESSAGE__
<form action="/upload" method="post" enctype="multipart/form-data">
  <input type="file" name="file" accept=".mp4,.avi,.mov,.mkv,.webm" required>
  <button type="submit">Upload</button>
</form>
</body>
</html>
"#;

const SELECT_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Select watermark - Demark</title><style>__STYLE__</style></head>
<body>
<h1>Mark the watermark</h1>
__MESSAGE__
<p>Drag a rectangle over the watermark (video is __WIDTH__x__HEIGHT__), or type the coordinates.</p>
<div id="preview-wrap">
  <img id="preview" src="/uploads/__PREVIEW__" alt="first frame" draggable="false">
  <div id="selection" hidden></div>
</div>
<form action="/process/__JOB_ID__" method="post">
  <label>x <input type="number" name="x" id="x" value="0" required></label>
  <label>y <input type="number" name="y" id="y" value="0" required></label>
  <label>width <input type="number" name="width" id="width" value="0" required></label>
  <label>height <input type="number" name="height" id="height" value="0" required></label>
  <label>method
    <select name="method">
      <option value="inpaint" selected>inpaint</option>
      <option value="blur">blur</option>
    </select>
  </label>
  <button type="submit">Remove watermark</button>
</form>
<script>
(function () {
  var img = document.getElementById('preview');
  var sel = document.getElementById('selection');
  var start = null;
  function scale() { return img.naturalWidth / img.clientWidth; }
  function clamp(v, lo, hi) { return Math.min(Math.max(v, lo), hi); }
  function pos(ev) {
    var r = img.getBoundingClientRect();
    return {
      x: clamp(ev.clientX - r.left, 0, img.clientWidth),
      y: clamp(ev.clientY - r.top, 0, img.clientHeight)
    };
  }
  img.addEventListener('pointerdown', function (ev) {
    start = pos(ev);
    ev.preventDefault();
  });
  window.addEventListener('pointermove', function (ev) {
    if (!start) return;
    var p = pos(ev);
    var x = Math.min(start.x, p.x), y = Math.min(start.y, p.y);
    var w = Math.abs(p.x - start.x), h = Math.abs(p.y - start.y);
    sel.hidden = false;
    sel.style.left = x + 'px';
    sel.style.top = y + 'px';
    sel.style.width = w + 'px';
    sel.style.height = h + 'px';
    var s = scale();
    document.getElementById('x').value = Math.round(x * s);
    document.getElementById('y').value = Math.round(y * s);
    document.getElementById('width').value = Math.round(w * s);
    document.getElementById('height').value = Math.round(h * s);
  });
  window.addEventListener('pointerup', function () { start = null; });
})();
</script>
</body>
</html>
"#;

const STATUS_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Processing - Demark</title><style>__STYLE__</style></head>
<body>
<h1>Processing</h1>
<progress id="bar" max="100" value="0"></progress>
<p id="state">starting...</p>
<p id="result"></p>
<script>
(function () {
  var timer = setInterval(poll, 1000);
  function poll() {
    fetch('/api/status/__JOB_ID__')
      .then(function (r) { return r.json(); })
      .then(function (job) {
        document.getElementById('bar').value = job.progress;
        document.getElementById('state').textContent = job.status + ' (' + job.progress + '%)';
        if (job.status === 'completed') {
          clearInterval(timer);
          document.getElementById('result').innerHTML =
            '<a href="/download/__JOB_ID__">Download ' + job.output_file + '</a>';
        } else if (job.status === 'failed') {
          clearInterval(timer);
          document.getElementById('result').textContent = 'Failed: ' + (job.error || 'unknown error');
        }
      })
      .catch(function () { /* keep polling */ });
  }
  poll();
})();
</script>
</body>
</html>
"#;

fn message_block(message: Option<&str>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!("<p class=\"message\">{}</p>", html_escape(m)),
        _ => String::new(),
    }
}

fn render_index(message: Option<&str>) -> String {
    INDEX_TEMPLATE
        .replace("__STYLE__", PAGE_STYLE)
        .replace("__MESSAGE__", &message_block(message))
}

fn render_select(
    job_id: &JobId,
    preview: &str,
    dimensions: Dimensions,
    message: Option<&str>,
) -> String {
    SELECT_TEMPLATE
        .replace("__STYLE__", PAGE_STYLE)
        .replace("__MESSAGE__", &message_block(message))
        .replace("__JOB_ID__", &html_escape(job_id.as_str()))
        .replace("__PREVIEW__", &html_escape(preview))
        .replace("__WIDTH__", &dimensions.width.to_string())
        .replace("__HEIGHT__", &dimensions.height.to_string())
}

fn render_status(job_id: &JobId) -> String {
    STATUS_TEMPLATE
        .replace("__STYLE__", PAGE_STYLE)
        .replace("__JOB_ID__", &html_escape(job_id.as_str()))
}

/// Index page with the upload form.
pub async fn index(Query(params): Query<MessageParams>) -> Html<String> {
    Html(render_index(params.message.as_deref()))
}

/// Region-selection page: extracts a first-frame preview and renders the
/// drag-to-select form.
pub async fn select_page(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(params): Query<MessageParams>,
) -> Response {
    let id = JobId::from_string(job_id);
    let Some(job) = state.store.get(&id) else {
        return redirect_with_message("/", "Invalid job ID").into_response();
    };

    let preview_name = preview_file_name(&id);
    let input_path = state.config.upload_dir.join(&job.input_file);
    let preview_path = state.config.upload_dir.join(&preview_name);

    let extracted =
        tokio::task::spawn_blocking(move || demark_media::extract_preview(&input_path, &preview_path))
            .await;

    match extracted {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!(job_id = %id, error = %e, "Preview extraction failed");
            return redirect_with_message("/", "Error reading video file").into_response();
        }
        Err(e) => {
            warn!(job_id = %id, error = %e, "Preview task panicked");
            return redirect_with_message("/", "Error reading video file").into_response();
        }
    }

    let _ = state.store.update(&id, |job| {
        job.preview_file = Some(preview_name.clone());
    });

    Html(render_select(
        &id,
        &preview_file_name(&id),
        job.dimensions,
        params.message.as_deref(),
    ))
    .into_response()
}

/// Status page polling the JSON endpoint.
pub async fn status_page(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let id = JobId::from_string(job_id);
    if !state.store.contains(&id) {
        return redirect_with_message("/", "Invalid job ID").into_response();
    }
    Html(render_status(&id)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_renders_message() {
        let html = render_index(Some("No file part"));
        assert!(html.contains("No file part"));
        assert!(render_index(None).contains("<form action=\"/upload\""));
        assert!(!render_index(None).contains("class=\"message\""));
    }

    #[test]
    fn test_select_page_interpolation() {
        let id = JobId::from_string("abc-123");
        let html = render_select(&id, "preview_abc-123.jpg", Dimensions::new(320, 240), None);
        assert!(html.contains("/process/abc-123"));
        assert!(html.contains("/uploads/preview_abc-123.jpg"));
        assert!(html.contains("320x240"));
    }

    #[test]
    fn test_status_page_polls_api() {
        let id = JobId::from_string("abc-123");
        let html = render_status(&id);
        assert!(html.contains("/api/status/abc-123"));
        assert!(html.contains("/download/abc-123"));
    }

    #[test]
    fn test_message_is_escaped() {
        let html = render_index(Some("<script>alert(1)</script>"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
