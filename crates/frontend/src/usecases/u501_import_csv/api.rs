use crate::shared::api_utils::{api_url, auth_header, require_token};
use contracts::shared::api_error::{ApiError, ApiResult};
use contracts::usecases::u501_import_csv::{upload_percent, ImportResponse, UPLOAD_FIELD};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

fn js_error(context: &str, e: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", context, e))
}

/// XHR events that end an upload without a response.
const FAILURE_EVENTS: [&str; 3] = ["error", "abort", "timeout"];

fn upload_failure(event: &str) -> ApiError {
    let reason = match event {
        "abort" => "Upload was aborted",
        "timeout" => "Upload timed out",
        _ => "Upload failed",
    };
    ApiError::Network(reason.to_string())
}

/// Uploads a CSV file to `/upload-csv/`.
///
/// `fetch` has no upload progress, so this goes through `XMLHttpRequest`;
/// `on_progress` receives the percentage sent so far.
pub async fn upload_csv(file: File, on_progress: impl Fn(u8) + 'static) -> ApiResult<ImportResponse> {
    let token = require_token()?;

    let form_data = FormData::new().map_err(|e| js_error("FormData", e))?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, &file, &file.name())
        .map_err(|e| js_error("FormData", e))?;

    let xhr = XmlHttpRequest::new().map_err(|e| js_error("XMLHttpRequest", e))?;
    xhr.open_with_async("POST", &api_url("/upload-csv/"), true)
        .map_err(|e| js_error("open", e))?;
    xhr.set_request_header("Authorization", &auth_header(&token))
        .map_err(|e| js_error("header", e))?;

    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if ev.length_computable() {
            on_progress(upload_percent(ev.loaded(), ev.total()));
        }
    });
    xhr.upload()
        .map_err(|e| js_error("upload", e))?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let done = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        xhr.set_onload(Some(on_load.unchecked_ref()));

        for event in FAILURE_EVENTS {
            let reject = reject.clone();
            let callback = Closure::once_into_js(move || {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(event));
            });
            let handler: Option<&js_sys::Function> = Some(callback.unchecked_ref());
            match event {
                "abort" => xhr.set_onabort(handler),
                "timeout" => xhr.set_ontimeout(handler),
                _ => xhr.set_onerror(handler),
            }
        }
    });

    xhr.send_with_opt_form_data(Some(&form_data))
        .map_err(|e| js_error("send", e))?;
    let outcome = JsFuture::from(done).await;
    drop(progress);
    outcome.map_err(|event| upload_failure(&event.as_string().unwrap_or_default()))?;

    let status = xhr.status().map_err(|e| js_error("status", e))?;
    let body = xhr.response_text().ok().flatten().unwrap_or_default();

    if !(200..300).contains(&status) {
        log::warn!("POST /upload-csv/ -> {} {}", status, body);
        return Err(ApiError::from_status(status, &body));
    }
    Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
        log::debug!("Upload response is not JSON ({}), using default message", e);
        ImportResponse::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_event_settles_with_its_reason() {
        let messages: Vec<String> = FAILURE_EVENTS
            .iter()
            .map(|event| upload_failure(event).to_string())
            .collect();
        assert!(messages[0].contains("Upload failed"));
        assert!(messages[1].contains("aborted"));
        assert!(messages[2].contains("timed out"));
    }

    #[test]
    fn unknown_event_is_a_plain_network_failure() {
        assert!(matches!(upload_failure(""), ApiError::Network(m) if m == "Upload failed"));
    }
}
