mod api;
mod config;
mod controller;
mod dates;
mod error;
mod filters;
mod page;
mod rows;

use gloo_events::EventListener;
use web_sys::{Document, Window};

use crate::config::PageConfig;

fn start(window: Window, document: Document) {
    let (config, config_error) = match config::load_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    };
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Some(err) = config_error {
        log::warn!("{err}; falling back to defaults");
    }

    if let Err(err) = page::mount(window, document, config) {
        log::error!("transactions page not wired: {err}");
    }
}

fn dom_is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn main() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if dom_is_loading(&document) {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| start(window, document))
            .forget();
    } else {
        start(window, document);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn parsed_document_is_not_loading() {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(!dom_is_loading(&document));
    }
}
