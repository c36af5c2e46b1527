/// Client-side downloads through a hidden anchor and object URLs
use std::cell::{OnceCell, RefCell};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, Document, HtmlAnchorElement, Url};

/// Saves blobs as client-side downloads through one hidden `<a>` element.
///
/// The anchor is created and appended to `<body>` on the first save and
/// removed again when the saver is dropped.
pub struct BlobSaver {
    document: Document,
    anchor: OnceCell<HtmlAnchorElement>,
    last_url: RefCell<Option<String>>,
}

impl BlobSaver {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            anchor: OnceCell::new(),
            last_url: RefCell::new(None),
        }
    }

    fn anchor(&self) -> Result<&HtmlAnchorElement, JsValue> {
        if let Some(anchor) = self.anchor.get() {
            return Ok(anchor);
        }

        let anchor: HtmlAnchorElement = self.document.create_element("a")?.dyn_into()?;
        anchor.style().set_property("display", "none")?;
        self.document
            .body()
            .ok_or("document has no body")?
            .append_child(&anchor)?;
        Ok(self.anchor.get_or_init(|| anchor))
    }

    /// Start a download of `blob` named `file_name`.
    pub fn save(&self, blob: &Blob, file_name: &str) -> Result<(), JsValue> {
        let anchor = self.anchor()?;
        let url = Url::create_object_url_with_blob(blob)?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        // The download just started may still be reading `url`; only the
        // previous one is released. The click has already happened, so a
        // revoke failure only leaks the old URL.
        if let Some(previous) = self.last_url.replace(Some(url)) {
            if let Err(err) = Url::revoke_object_url(&previous) {
                log::warn!("failed to revoke {previous}: {err:?}");
            }
        }
        log::info!("Screenshot saved: {file_name}");
        Ok(())
    }

    /// The hidden anchor, once a save has created it
    pub fn anchor_element(&self) -> Option<&HtmlAnchorElement> {
        self.anchor.get()
    }
}

impl Drop for BlobSaver {
    fn drop(&mut self) {
        if let Some(url) = self.last_url.take() {
            Url::revoke_object_url(&url).ok();
        }
        if let Some(anchor) = self.anchor.take() {
            anchor.remove();
        }
    }
}
