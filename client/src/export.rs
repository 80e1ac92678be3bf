use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement};

use markup_shared::EXPORT_FILE_NAME;

/// Encodes the composed surface as PNG and hands it to the browser as a
/// download. Fails on a tainted canvas.
pub fn export_png(document: &Document, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let uri = canvas.to_data_url_with_type("image/png")?;
    download_uri(document, &uri, EXPORT_FILE_NAME)
}

fn download_uri(document: &Document, uri: &str, name: &str) -> Result<(), JsValue> {
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("Invalid element type: a"))?;
    anchor.set_download(name);
    anchor.set_href(uri);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}
