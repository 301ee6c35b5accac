pub mod layout;

pub use layout::{close_polyline, price_bounds, project, PlotCandle, PLOT_PADDING};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use pattern_core::{sort_ascending_by_date, DailyBar};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[cfg(target_arch = "wasm32")]
const COLOR_UP: &str = "#10B981";
#[cfg(target_arch = "wasm32")]
const COLOR_DOWN: &str = "#EF4444";
#[cfg(target_arch = "wasm32")]
const COLOR_LINE: &str = "#10B981";
#[cfg(target_arch = "wasm32")]
const COLOR_BG: &str = "#0d1520";
#[cfg(target_arch = "wasm32")]
const LINE_WIDTH: f32 = 2.0;

/// Main series rendering style. Candles are preferred; the line over closes
/// is the compatibility branch for backends that cannot draw candle bodies,
/// not a user-facing toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Candles,
    Line,
}

impl SeriesStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "candles" | "candlestick" => Some(SeriesStyle::Candles),
            "line" => Some(SeriesStyle::Line),
            _ => None,
        }
    }

    /// Style the chart starts in, given what the backend can draw.
    pub fn for_backend(supports_candles: bool) -> Self {
        if supports_candles {
            SeriesStyle::Candles
        } else {
            SeriesStyle::Line
        }
    }
}

/// Drawing surface abstraction. One backend is live per chart; capability
/// is probed once at construction to pick the series style.
pub trait RendererBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str);
    fn supports_candles(&self) -> bool;
    fn draw_candles(&mut self, candles: &[PlotCandle], color_up: &str, color_down: &str);
    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32);
}

#[cfg(target_arch = "wasm32")]
struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasBackend {
    fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

#[cfg(target_arch = "wasm32")]
impl RendererBackend for CanvasBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.ctx.set_fill_style_str(clear_color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn supports_candles(&self) -> bool {
        true
    }

    fn draw_candles(&mut self, candles: &[PlotCandle], color_up: &str, color_down: &str) {
        let ctx = &self.ctx;
        for c in candles {
            let up = c.close >= c.open;
            let color = if up { color_up } else { color_down };
            ctx.set_stroke_style_str(color);
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            ctx.move_to(c.x, c.y_high);
            ctx.line_to(c.x, c.y_low);
            ctx.stroke();

            let body_top = c.y_open.min(c.y_close);
            let body_bottom = c.y_open.max(c.y_close);
            let body_h = (body_bottom - body_top).max(1.0);
            ctx.fill_rect(c.x - c.half_w, body_top, c.half_w * 2.0, body_h);
        }
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32) {
        if points.len() < 2 {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for p in points.iter().skip(1) {
            ctx.line_to(p.0, p.1);
        }
        ctx.stroke();
    }
}

#[cfg(target_arch = "wasm32")]
struct ChartInner {
    backend: CanvasBackend,
    style: SeriesStyle,
    bars: Vec<DailyBar>,
    width: f64,
    height: f64,
    dirty: bool,
    destroyed: bool,
}

#[cfg(target_arch = "wasm32")]
impl ChartInner {
    fn render(&mut self) {
        self.backend.begin_frame(self.width, self.height, COLOR_BG);
        let plot = layout::project(&self.bars, self.width, self.height);
        match self.style {
            SeriesStyle::Candles => self.backend.draw_candles(&plot, COLOR_UP, COLOR_DOWN),
            SeriesStyle::Line => {
                self.backend
                    .draw_polyline(&layout::close_polyline(&plot), COLOR_LINE, LINE_WIDTH)
            }
        }
        self.dirty = false;
    }
}

/// Scoped chart resource over one canvas: at most one live per view.
/// Callers must `destroy()` before creating a replacement and on teardown;
/// the render loop and the window-resize listener both go quiet once the
/// destroyed flag is set.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct ChartHandle {
    inner: Rc<RefCell<ChartInner>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl ChartHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ChartHandle, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?;
        let canvas: HtmlCanvasElement = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let backend = CanvasBackend::new(canvas, context);
        let style = SeriesStyle::for_backend(backend.supports_candles());
        let inner = Rc::new(RefCell::new(ChartInner {
            backend,
            style,
            bars: Vec::new(),
            width: 1.0,
            height: 1.0,
            dirty: true,
            destroyed: false,
        }));

        resize_canvas_to_parent(&inner);
        {
            let inner_clone = inner.clone();
            let resize_cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                resize_canvas_to_parent(&inner_clone);
            }));
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;
            resize_cb.forget();
        }

        start_render_loop(inner.clone());
        Ok(ChartHandle { inner })
    }

    /// Resize in place. No data refetch happens here.
    pub fn resize(&self, width: f64, height: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.width = width.max(1.0);
        inner.height = height.max(1.0);
        inner.dirty = true;
    }

    /// Change main series style: "candles" or "line". Unknown names are
    /// ignored.
    pub fn set_style(&self, style: &str) {
        let Some(style) = SeriesStyle::from_name(style) else {
            return;
        };
        let mut inner = self.inner.borrow_mut();
        if inner.style != style {
            inner.style = style;
            inner.dirty = true;
        }
    }

    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.destroyed = true;
        inner.bars.clear();
    }
}

#[cfg(target_arch = "wasm32")]
impl ChartHandle {
    /// Replace the displayed series. Input order is irrelevant: bars are
    /// sorted ascending by date before rendering.
    pub fn set_series(&self, mut bars: Vec<DailyBar>) {
        sort_ascending_by_date(&mut bars);
        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            return;
        }
        inner.bars = bars;
        inner.dirty = true;
    }

    pub fn style(&self) -> SeriesStyle {
        self.inner.borrow().style
    }
}

#[cfg(target_arch = "wasm32")]
fn resize_canvas_to_parent(inner: &Rc<RefCell<ChartInner>>) {
    let mut inner = inner.borrow_mut();
    if inner.destroyed {
        return;
    }
    let rect = inner.backend.canvas.get_bounding_client_rect();
    inner.width = rect.width().max(1.0);
    inner.height = rect.height().max(1.0);
    inner.dirty = true;
}

#[cfg(target_arch = "wasm32")]
fn start_render_loop(inner_rc: Rc<RefCell<ChartInner>>) {
    let f = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
        let mut should_continue = true;
        {
            let mut inner = inner_rc.borrow_mut();
            if inner.destroyed {
                should_continue = false;
            } else if inner.dirty {
                inner.render();
            }
        }

        if should_continue {
            let window = web_sys::window().unwrap();
            window
                .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
                .unwrap();
        }
    }) as Box<dyn FnMut(f64)>));

    let window = web_sys::window().unwrap();
    window
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_defaults_to_candles_when_supported() {
        assert_eq!(SeriesStyle::for_backend(true), SeriesStyle::Candles);
        assert_eq!(SeriesStyle::for_backend(false), SeriesStyle::Line);
    }

    #[test]
    fn style_names_parse() {
        assert_eq!(
            SeriesStyle::from_name("candles"),
            Some(SeriesStyle::Candles)
        );
        assert_eq!(
            SeriesStyle::from_name("Candlestick"),
            Some(SeriesStyle::Candles)
        );
        assert_eq!(SeriesStyle::from_name("line"), Some(SeriesStyle::Line));
        assert_eq!(SeriesStyle::from_name("area"), None);
    }
}
