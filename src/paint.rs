//! Painting: draws a [`Scene`] to a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a finished scene and produces pixels. It never reads or
//! mutates editor state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::render::{NodeKind, Scene, SceneNode};

/// Draw the full scene.
///
/// `dpr` is the device pixel ratio. `image` is the decoded background, if any.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    image: Option<&HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, scene.surface_width, scene.surface_height);
    ctx.translate(scene.camera.pan_x, scene.camera.pan_y)?;
    ctx.scale(scene.camera.zoom, scene.camera.zoom)?;

    // Layer 2: nodes in order (bottom first).
    for node in &scene.nodes {
        match &node.kind {
            NodeKind::Image { loaded, .. } => {
                if let (true, Some(img)) = (*loaded, image) {
                    ctx.draw_image_with_html_image_element(img, node.x, node.y)?;
                }
            }
            NodeKind::Circle => draw_circle(ctx, node)?,
            NodeKind::Rect => draw_rect(ctx, node)?,
            NodeKind::Handle => draw_handle(ctx, node, scene.camera.zoom),
        }
    }

    Ok(())
}

fn draw_circle(ctx: &CanvasRenderingContext2d, node: &SceneNode) -> Result<(), JsValue> {
    let radius = node.width * 0.5;
    if radius <= 0.0 {
        return Ok(());
    }
    ctx.begin_path();
    ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI)?;
    if let Some(fill) = &node.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }
    Ok(())
}

fn draw_rect(ctx: &CanvasRenderingContext2d, node: &SceneNode) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(node.x, node.y)?;
    ctx.scale(node.scale_x, node.scale_y)?;
    if let Some(fill) = &node.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(0.0, 0.0, node.width, node.height);
    }
    if let Some(stroke) = &node.style.stroke {
        ctx.set_stroke_style_str(stroke);
        // Keep the outline width constant while the handle scale is applied.
        let scale = node.scale_x.abs().max(node.scale_y.abs()).max(f64::EPSILON);
        ctx.set_line_width(node.style.stroke_width / scale);
        ctx.stroke_rect(0.0, 0.0, node.width, node.height);
    }
    ctx.restore();
    Ok(())
}

fn draw_handle(ctx: &CanvasRenderingContext2d, node: &SceneNode, zoom: f64) {
    if let Some(fill) = &node.style.fill {
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(node.x, node.y, node.width, node.height);
    }
    if let Some(stroke) = &node.style.stroke {
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(node.style.stroke_width / zoom);
        ctx.stroke_rect(node.x, node.y, node.width, node.height);
    }
}
