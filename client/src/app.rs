use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, HtmlSelectElement, HtmlSpanElement, PointerEvent,
};

use markup_shared::entry::{can_start, EXAMPLE_IMAGE_URL};
use markup_shared::{StrokeRecorder, SurfaceSync, Tool, ToolState};

use crate::background::{load_background, on_background_error, on_background_load};
use crate::dom::{
    coalesced_pointer_events, event_to_point, get_element, set_canvas_cursor, set_hidden,
    update_size_label,
};
use crate::export::export_png;
use crate::render::redraw;
use crate::state::{Background, State};

fn debug_enabled(window: &web_sys::Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn end_active_stroke(state: &mut State) {
    state.active_pointer = None;
    let Some(index) = state.recorder.pointer_up() else {
        return;
    };
    if !state.debug {
        return;
    }
    if let Some(stroke) = state.recorder.strokes().get(index) {
        let summary = serde_json::to_string(stroke).unwrap_or_default();
        web_sys::console::log_1(&format!("Stroke end index={index} stroke={summary}").into());
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let debug = debug_enabled(&window);
    if debug {
        let href = window.location().href().ok().unwrap_or_default();
        web_sys::console::log_1(&format!("Markup debug enabled href={href}").into());
    }

    let entry_el: HtmlElement = get_element(&document, "entry")?;
    let url_input: HtmlInputElement = get_element(&document, "imageUrl")?;
    let draw_button: HtmlButtonElement = get_element(&document, "draw")?;
    let example_button: HtmlButtonElement = get_element(&document, "useExample")?;
    let workspace_el: HtmlElement = get_element(&document, "workspace")?;
    let tool_select: HtmlSelectElement = get_element(&document, "tool")?;
    let size_input: HtmlInputElement = get_element(&document, "size")?;
    let size_value: HtmlSpanElement = get_element(&document, "sizeValue")?;
    let color_input: HtmlInputElement = get_element(&document, "color")?;
    let export_button: HtmlButtonElement = get_element(&document, "export")?;
    let image: HtmlImageElement = get_element(&document, "background")?;
    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let tools = ToolState::default();
    tool_select.set_value(tools.tool().as_str());
    size_input.set_value(&tools.width().to_string());
    color_input.set_value(tools.color());
    update_size_label(&size_input, &size_value);
    draw_button.set_disabled(!can_start(&url_input.value()));
    set_hidden(&entry_el, false);
    set_hidden(&workspace_el, true);
    set_canvas_cursor(&canvas);

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        background: Background {
            image: image.clone(),
            url: None,
            loaded: false,
        },
        surface: SurfaceSync::default(),
        tools,
        recorder: StrokeRecorder::default(),
        active_pointer: None,
        debug,
    }));

    let start_drawing: Rc<dyn Fn(String)> = {
        let state = state.clone();
        let entry_el = entry_el.clone();
        let workspace_el = workspace_el.clone();
        Rc::new(move |url: String| {
            set_hidden(&entry_el, true);
            set_hidden(&workspace_el, false);
            let mut state = state.borrow_mut();
            load_background(&mut state, &url);
            redraw(&state);
        })
    };

    {
        let url_input_cb = url_input.clone();
        let draw_button_cb = draw_button.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            draw_button_cb.set_disabled(!can_start(&url_input_cb.value()));
        });
        url_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let url_input = url_input.clone();
        let start_drawing = start_drawing.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let url = url_input.value();
            if !can_start(&url) {
                return;
            }
            start_drawing(url.trim().to_string());
        });
        draw_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let url_input = url_input.clone();
        let start_drawing = start_drawing.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            url_input.set_value(EXAMPLE_IMAGE_URL);
            start_drawing(EXAMPLE_IMAGE_URL.to_string());
        });
        example_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let tool_state = state.clone();
        let tool_select_cb = tool_select.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let value = tool_select_cb.value();
            let mut state = tool_state.borrow_mut();
            match value.parse::<Tool>() {
                Ok(tool) => state.tools.set_tool(tool),
                Err(err) => {
                    web_sys::console::warn_1(&err.to_string().into());
                    tool_select_cb.set_value(state.tools.tool().as_str());
                }
            }
        });
        tool_select.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let size_state = state.clone();
        let size_input_cb = size_input.clone();
        let size_value_cb = size_value.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            size_state
                .borrow_mut()
                .tools
                .set_width(size_input_cb.value_as_number() as f32);
            update_size_label(&size_input_cb, &size_value_cb);
        });
        size_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let color_state = state.clone();
        let color_input_cb = color_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            color_state
                .borrow_mut()
                .tools
                .set_color(color_input_cb.value());
        });
        color_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let export_state = state.clone();
        let document = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = export_state.borrow();
            match export_png(&document, &state.canvas) {
                Ok(()) => {
                    if state.debug {
                        web_sys::console::log_1(
                            &format!(
                                "Exported {}x{} strokes={}",
                                state.canvas.width(),
                                state.canvas.height(),
                                state.recorder.strokes().len()
                            )
                            .into(),
                        );
                    }
                }
                Err(err) => web_sys::console::error_2(&"Export failed".into(), &err),
            }
        });
        export_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let load_state = state.clone();
        let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
            on_background_load(&mut load_state.borrow_mut());
        });
        image.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
        onload.forget();
    }

    {
        let error_state = state.clone();
        let onerror = Closure::<dyn FnMut(Event)>::new(move |_| {
            on_background_error(&mut error_state.borrow_mut());
        });
        image.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref())?;
        onerror.forget();
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_point(&down_canvas, &event) else {
                return;
            };
            let mut state = down_state.borrow_mut();
            if state.recorder.is_drawing() {
                end_active_stroke(&mut state);
            }
            let tools = state.tools.clone();
            let Some(index) = state.recorder.pointer_down(point, &tools) else {
                return;
            };
            state.active_pointer = Some(event.pointer_id());
            let _ = down_canvas.set_pointer_capture(event.pointer_id());
            if state.debug {
                if let Some(stroke) = state.recorder.active_stroke() {
                    let summary = serde_json::to_string(stroke).unwrap_or_default();
                    web_sys::console::log_1(
                        &format!("Stroke start index={index} stroke={summary}").into(),
                    );
                }
            }
            redraw(&state);
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if !state.recorder.is_drawing() || state.active_pointer != Some(event.pointer_id()) {
                return;
            }
            event.prevent_default();
            let mut changed = false;
            for event in coalesced_pointer_events(&event) {
                if let Some(point) = event_to_point(&move_canvas, &event) {
                    changed |= state.recorder.pointer_move(point);
                }
            }
            if changed {
                redraw(&state);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        // Listens on the window so a release outside the canvas still ends the stroke.
        let stop_state = state.clone();
        let stop_canvas = canvas.clone();
        let onstop = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if stop_canvas.has_pointer_capture(event.pointer_id()) {
                let _ = stop_canvas.release_pointer_capture(event.pointer_id());
            }
            let mut state = stop_state.borrow_mut();
            if !state.recorder.is_drawing() {
                return;
            }
            end_active_stroke(&mut state);
        });
        window.add_event_listener_with_callback("pointerup", onstop.as_ref().unchecked_ref())?;
        window
            .add_event_listener_with_callback("pointercancel", onstop.as_ref().unchecked_ref())?;
        onstop.forget();
    }

    Ok(())
}
