//! Canvas, requestAnimationFrame, and ResizeObserver implementations of the
//! host seams

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, ResizeObserver, Window,
};

use crate::pattern::{
    Confetti, ConfettiOptions, FrameCallback, FrameScheduler, FrameToken, PatternFactory,
};
use crate::surface::{ContentBox, SharedSurface, Surface, SurfaceManager};

static INIT_LOGGING: Once = Once::new();

/// Install the console logger and panic hook, once per page
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// `Surface` backed by an HTML canvas and its 2d context. Drawing is a
/// silent no-op when the context could not be obtained.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if context.is_none() {
            log::warn!("canvas has no 2d context, drawing will be skipped");
        }
        Self { canvas, context }
    }

    pub fn shared(canvas: HtmlCanvasElement) -> SharedSurface {
        Rc::new(RefCell::new(Self::new(canvas)))
    }
}

impl Surface for CanvasSurface {
    fn set_layout(&mut self, bounds: &ContentBox) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", bounds.width));
        let _ = style.set_property("height", &format!("{}px", bounds.height));
        let _ = style.set_property("top", &format!("{}px", bounds.top));
        let _ = style.set_property("left", &format!("{}px", bounds.left));
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn backing_size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn pixel_ratio(&self) -> f32 {
        web_sys::window()
            .map(|window| window.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }

    fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    fn clear(&mut self) {
        if let Some(ctx) = &self.context {
            ctx.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        let Some(ctx) = &self.context else {
            return;
        };
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        ctx.set_fill_style_str(color);
        ctx.set_stroke_style_str(color);
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for point in rest {
            ctx.line_to(point.x as f64, point.y as f64);
        }
        ctx.close_path();
        // Stroking with the fill color hides hairline seams between fills
        ctx.stroke();
        ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        let Some(ctx) = &self.context else {
            return;
        };
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        let _ = ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
    }
}

/// `FrameScheduler` backed by requestAnimationFrame
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            window: web_sys::window().expect("no window"),
        }
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameToken {
        let closure = Closure::once(move |_time: f64| callback());
        let handle = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .unwrap_or(0);
        // Once-closures free their capture when invoked; the glue object is
        // handed to the browser for the frame's lifetime
        closure.forget();
        FrameToken(handle as u64)
    }

    fn cancel(&self, token: FrameToken) {
        let _ = self.window.cancel_animation_frame(token.0 as i32);
    }
}

/// A mounted background: the live manager plus its resize subscription
pub struct MountedBackground {
    manager: Rc<RefCell<SurfaceManager>>,
    observer: ResizeObserver,
    // Keeps the observer callback alive for the mount's lifetime
    _on_resize: Closure<dyn FnMut()>,
}

impl MountedBackground {
    /// Stop the pattern and drop the resize subscription
    pub fn unmount(self) {
        self.observer.disconnect();
        self.manager.borrow_mut().detach();
    }

    pub fn manager(&self) -> Rc<RefCell<SurfaceManager>> {
        self.manager.clone()
    }
}

/// Measure a container's content box in CSS pixels
fn measure(container: &HtmlElement) -> ContentBox {
    ContentBox::new(
        container.offset_width() as f32,
        container.offset_height() as f32,
        container.offset_top() as f32,
        container.offset_left() as f32,
    )
}

/// Wire a canvas to a container: size it now, re-size on every container
/// resize, and run the factory's pattern until `unmount`
pub fn mount(
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    factory: PatternFactory,
) -> MountedBackground {
    init_logging();

    let manager = Rc::new(RefCell::new(SurfaceManager::new(RafScheduler::shared())));
    {
        let mut manager = manager.borrow_mut();
        manager.attach(CanvasSurface::shared(canvas));
        manager.set_pattern(factory);
        manager.on_container_measured(measure(&container));
    }

    let on_resize = {
        let manager = manager.clone();
        let container = container.clone();
        Closure::<dyn FnMut()>::new(move || {
            manager.borrow_mut().on_container_measured(measure(&container));
        })
    };
    let observer =
        ResizeObserver::new(on_resize.as_ref().unchecked_ref()).expect("ResizeObserver");
    observer.observe(&container);

    log::info!("background mounted");
    MountedBackground {
        manager,
        observer,
        _on_resize: on_resize,
    }
}

/// Mount the confetti pattern onto elements looked up by id. `options_json`
/// overrides `ConfettiOptions` fields; pass null or empty for defaults. The
/// mount lives for the rest of the page's lifetime.
#[wasm_bindgen]
pub fn mount_confetti_by_id(
    canvas_id: &str,
    container_id: &str,
    options_json: Option<String>,
) -> Result<(), JsValue> {
    init_logging();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("element is not a canvas"))?;
    let container: HtmlElement = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str("container element not found"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("container is not an HTML element"))?;

    let mut options = match options_json.as_deref() {
        Some(json) if !json.is_empty() => serde_json::from_str::<ConfettiOptions>(json)
            .map_err(|err| JsValue::from_str(&format!("bad options: {err}")))?,
        _ => ConfettiOptions::default(),
    };
    if options.seed == 0 {
        options.seed = js_sys::Date::now() as u64;
    }

    let mounted = mount(canvas, container, Confetti::factory(options));
    std::mem::forget(mounted);
    Ok(())
}
