use suraido_core::{DrawCmd, Frame, GridSize, ImageGeometry};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub(crate) const BLANK_FILL: &str = "black";

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Executes core draw commands against one canvas. Screen geometry comes
/// from the surface's bounding box, source geometry from the decoded image;
/// the core never sees either.
pub(crate) struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    size: GridSize,
    tile_size: f64,
    tile_span: f64,
}

impl CanvasPainter {
    pub(crate) fn new(
        canvas: &HtmlCanvasElement,
        image: HtmlImageElement,
        size: GridSize,
        geometry: ImageGeometry,
    ) -> Option<Self> {
        let ctx = context_2d(canvas)?;
        let tile_size = canvas.get_bounding_client_rect().width() / f64::from(size.side());
        Some(Self {
            ctx,
            image,
            size,
            tile_size,
            tile_span: geometry.tile_span(size),
        })
    }

    pub(crate) fn apply(&self, frame: &Frame) {
        for cmd in frame {
            match *cmd {
                DrawCmd::Clear { cell } => {
                    self.ctx.set_fill_style_str(BLANK_FILL);
                    self.ctx.fill_rect(
                        f64::from(cell.col) * self.tile_size,
                        f64::from(cell.row) * self.tile_size,
                        self.tile_size,
                        self.tile_size,
                    );
                }
                DrawCmd::Blit { tile, pos } => {
                    let src = tile.source_cell(self.size);
                    let result = self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            &self.image,
                            f64::from(src.col) * self.tile_span,
                            f64::from(src.row) * self.tile_span,
                            self.tile_span,
                            self.tile_span,
                            f64::from(pos.col) * self.tile_size,
                            f64::from(pos.row) * self.tile_size,
                            self.tile_size,
                            self.tile_size,
                        );
                    if let Err(err) = result {
                        log::warn!("blit of {:?} failed: {:?}", tile, err);
                    }
                }
            }
        }
    }
}

/// Paints the solved arrangement on the preview canvas: the square image
/// crop scaled to the surface, with the blank corner filled.
pub(crate) fn draw_preview(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    size: GridSize,
    geometry: ImageGeometry,
) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let surface = canvas.get_bounding_client_rect().width();
    let tile_size = surface / f64::from(size.side());
    let crop = f64::from(geometry.width().min(geometry.height()));

    let result = ctx
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            image, 0.0, 0.0, crop, crop, 0.0, 0.0, surface, surface,
        );
    if let Err(err) = result {
        log::warn!("preview draw failed: {:?}", err);
        return;
    }

    let corner = f64::from(size.side() - 1) * tile_size;
    ctx.set_fill_style_str(BLANK_FILL);
    ctx.fill_rect(corner, corner, tile_size, tile_size);
}
