mod app;
mod background;
mod dom;
mod export;
mod render;
mod state;

pub use app::run;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
