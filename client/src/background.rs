use crate::dom::size_canvas;
use crate::render::redraw;
use crate::state::State;

/// Points the background `<img>` at a new URL. The surface is unsized again
/// until that image reports its layout size.
pub fn load_background(state: &mut State, url: &str) {
    state.surface.reset();
    state.background.loaded = false;
    state.background.url = Some(url.to_string());
    // Anonymous CORS keeps the canvas exportable.
    state.background.image.set_cross_origin(Some("anonymous"));
    state.background.image.set_src(url);
    if state.debug {
        web_sys::console::log_1(&format!("Background loading url={url}").into());
    }
}

pub fn on_background_load(state: &mut State) {
    let image = &state.background.image;
    let width = image.offset_width().max(0) as u32;
    let height = image.offset_height().max(0) as u32;
    state.background.loaded = true;
    if state.debug {
        web_sys::console::log_1(
            &format!(
                "Background loaded natural={}x{} rendered={width}x{height}",
                image.natural_width(),
                image.natural_height()
            )
            .into(),
        );
    }
    if let Some(size) = state.surface.on_image_load(width, height) {
        size_canvas(&state.canvas, size);
    }
    redraw(state);
}

pub fn on_background_error(state: &mut State) {
    state.background.loaded = false;
    let url = state.background.url.as_deref().unwrap_or_default();
    web_sys::console::warn_1(&format!("Background failed to load url={url}").into());
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlImageElement;

    use markup_shared::{SurfaceSize, Tool};

    use super::{load_background, on_background_load};
    use crate::render::redraw;
    use crate::state::test_support::{make_canvas, make_state, pixel, record};
    use crate::state::State;

    fn solid_png(width: u32, height: u32, color: &str) -> String {
        let (canvas, ctx) = make_canvas(width, height);
        ctx.set_fill_style_str(color);
        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        canvas.to_data_url_with_type("image/png").unwrap()
    }

    fn attach(image: &HtmlImageElement) {
        let document = web_sys::window().unwrap().document().unwrap();
        let _ = image.style().set_property("display", "block");
        document.body().unwrap().append_child(image).unwrap();
    }

    async fn load(state: &mut State, url: &str) {
        let image = state.background.image.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            image.set_onload(Some(&resolve));
        });
        load_background(state, url);
        JsFuture::from(promise).await.unwrap();
        on_background_load(state);
    }

    #[wasm_bindgen_test]
    async fn surface_takes_rendered_image_size() {
        let mut state = make_state(300, 150);
        attach(&state.background.image);
        load(&mut state, &solid_png(40, 30, "#ff0000")).await;

        assert_eq!(state.canvas.width(), 40);
        assert_eq!(state.canvas.height(), 30);
        assert_eq!(
            state.surface.size(),
            Some(SurfaceSize {
                width: 40,
                height: 30
            })
        );
        assert_eq!(state.background.image.cross_origin().as_deref(), Some("anonymous"));
    }

    #[wasm_bindgen_test]
    async fn no_strokes_shows_background_only() {
        let mut state = make_state(300, 150);
        attach(&state.background.image);
        load(&mut state, &solid_png(24, 16, "#00ff00")).await;

        let (reference, reference_ctx) = make_canvas(24, 16);
        reference_ctx
            .draw_image_with_html_image_element(&state.background.image, 0.0, 0.0)
            .unwrap();
        let expected = reference_ctx.get_image_data(0.0, 0.0, 24.0, 16.0).unwrap().data();
        let actual = state.ctx.get_image_data(0.0, 0.0, 24.0, 16.0).unwrap().data();
        assert_eq!(reference.width(), state.canvas.width());
        assert_eq!(actual.0, expected.0);
        assert_eq!(pixel(&state.ctx, 12.0, 8.0), [0, 255, 0, 255]);
    }

    #[wasm_bindgen_test]
    async fn eraser_cuts_through_background() {
        let mut state = make_state(300, 150);
        attach(&state.background.image);
        load(&mut state, &solid_png(40, 40, "#0000ff")).await;

        record(&mut state, Tool::Eraser, 6.0, "#000000", &[(20.0, 0.0), (20.0, 40.0)]);
        redraw(&state);

        assert_eq!(pixel(&state.ctx, 20.0, 20.0)[3], 0);
        assert_eq!(pixel(&state.ctx, 5.0, 20.0), [0, 0, 255, 255]);
    }

    #[wasm_bindgen_test]
    fn failed_load_keeps_surface_unsized() {
        let mut state = make_state(300, 150);
        load_background(&mut state, "not a url");
        super::on_background_error(&mut state);

        assert!(!state.background.loaded);
        assert_eq!(state.surface.size(), None);
        assert_eq!(state.canvas.width(), 300);
    }
}
