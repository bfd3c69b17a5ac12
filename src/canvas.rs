use crate::config::SpectrumOptions;
use crate::constants::GRADIENT_HEIGHT_PX;
use crate::meter::{Fill, Surface};
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas backed surface with the cap color and meter gradient baked in.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    cap_color: String,
    gradient: web::CanvasGradient,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement, opts: &SpectrumOptions) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, GRADIENT_HEIGHT_PX);
        for stop in opts.meter_color.gradient_stops() {
            gradient
                .add_color_stop(stop.stop, &stop.color)
                .map_err(|e| anyhow::anyhow!("addColorStop({}) error: {:?}", stop.stop, e))?;
        }

        Ok(Self {
            ctx,
            cap_color: opts.cap_color.clone(),
            gradient,
        })
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, fill: Fill, x: f64, y: f64, w: f64, h: f64) {
        match fill {
            Fill::Cap => self.ctx.set_fill_style_str(&self.cap_color),
            Fill::Meter => self.ctx.set_fill_style_canvas_gradient(&self.gradient),
        }
        self.ctx.fill_rect(x, y, w, h);
    }
}
