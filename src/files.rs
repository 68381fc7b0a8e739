//! Reading picked files and saving generated PDFs.

use personallearn_core::flow::results::PdfDownload;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Read a File's contents into memory.
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Hand the PDF to the browser as a download. The object URL is revoked as
/// soon as the click has been dispatched.
pub fn save_pdf(download: &PdfDownload) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;
    let document = window.document().ok_or("No document available")?;
    let body = document.body().ok_or("No document body")?;

    let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to create PDF blob: {:?}", e))?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create download URL: {:?}", e))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Created element is not a link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&download.filename);

    let _ = body.append_child(&anchor);
    anchor.click();
    anchor.remove();

    if let Err(e) = web_sys::Url::revoke_object_url(&url) {
        tracing::warn!("Failed to revoke download URL: {:?}", e);
    }
    tracing::info!("Saved {} ({} bytes)", download.filename, download.bytes.len());
    Ok(())
}
