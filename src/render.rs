use crate::canvas::{self, Shape};
use crate::models::{
    Backdrop, IconVariant, MotifLayout, Rect, BACKGROUND_CONTRAST, BLUE, BLUE_EDGE, EMBER_ORANGE,
    EMBER_RED, FILTER, HALO_ALPHA, HIGHLIGHT, MOTIF_ANGLE, PAPER, SIZE, STRIPE, VARIANTS,
};
use crate::utils::{save_png, IconError};
use image::{imageops, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Opaque blue canvas, lighter at the centre and fading to the edge color.
pub fn make_background() -> RgbaImage {
    let mask = canvas::radial_mask(SIZE);
    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        let m = (f32::from(mask.get_pixel(x, y)[0]) * BACKGROUND_CONTRAST) as u8;
        canvas::mix(BLUE, BLUE_EDGE, m)
    })
}

/// Draws the cigarette motif on a transparent canvas, unrotated.
pub fn draw_motif_layer(scale: f32) -> RgbaImage {
    let layout = MotifLayout::new(scale);
    log::debug!("motif layout at scale {scale}: {layout:?}");

    let mut layer = RgbaImage::new(SIZE, SIZE);

    canvas::fill(&mut layer, Shape::RoundedRect(layout.pill, layout.pill_radius), PAPER);

    // Flat join towards the paper, round cap on the outer end.
    canvas::fill(&mut layer, Shape::Rect(layout.filter), FILTER);
    canvas::fill(&mut layer, Shape::Ellipse(layout.filter_cap), FILTER);
    for stripe in layout.stripes {
        canvas::fill(&mut layer, Shape::Rect(stripe), STRIPE);
    }

    canvas::fill(
        &mut layer,
        Shape::RoundedRect(layout.highlight, layout.highlight_radius),
        HIGHLIGHT,
    );

    let (halo, halo_x, halo_y) = ember_halo(&layout);
    canvas::composite(&mut layer, &halo, halo_x, halo_y);

    let disc = canvas::gradient_disc(layout.ember_diameter, EMBER_RED, EMBER_ORANGE, 255);
    let (disc_x, disc_y) = layout.ember_origin();
    canvas::composite(&mut layer, &disc, disc_x, disc_y);

    layer
}

/// Soft glow confined to the tip. Blurred on a local patch padded far enough
/// that the Gaussian tail fades out before the patch border.
fn ember_halo(layout: &MotifLayout) -> (RgbaImage, i64, i64) {
    let r = layout.halo_radius;
    let pad = layout.halo_blur * 3;
    let side = (2 * (r + pad) + 1) as u32;

    // Transparent pixels keep the halo hue so blurring only spreads alpha and
    // the fringe stays orange instead of fading through black.
    let [red, green, blue, _] = EMBER_ORANGE.0;
    let mut patch = RgbaImage::from_pixel(side, side, Rgba([red, green, blue, 0]));
    let c = r + pad;
    canvas::fill(
        &mut patch,
        Shape::Ellipse(Rect::around(c, c, r)),
        Rgba([red, green, blue, HALO_ALPHA]),
    );
    log::debug!("halo radius {r}, blur {}", layout.halo_blur);
    let patch = imageops::blur(&patch, layout.halo_blur as f32);

    let (cx, cy) = layout.ember_center;
    (patch, i64::from(cx - c), i64::from(cy - c))
}

/// Renders one finished icon: backdrop with the rotated motif on top.
pub fn render_variant(variant: &IconVariant) -> RgbaImage {
    let mut icon = match variant.backdrop {
        Backdrop::Gradient => make_background(),
        Backdrop::Transparent => RgbaImage::new(SIZE, SIZE),
    };
    let motif = canvas::rotate_about_center(&draw_motif_layer(variant.scale), MOTIF_ANGLE);
    canvas::composite(&mut icon, &motif, 0, 0);
    icon
}

/// Renders every variant and writes it into `out_dir`. Stops at the first
/// write failure. Returns the written paths in order.
pub fn generate_icons(out_dir: &Path) -> Result<Vec<PathBuf>, IconError> {
    let mut written = Vec::with_capacity(VARIANTS.len());
    for variant in &VARIANTS {
        log::info!(
            "rendering {} (scale {}, {:?} backdrop)",
            variant.file_name,
            variant.scale,
            variant.backdrop
        );
        let icon = render_variant(variant);
        let path = out_dir.join(variant.file_name);
        save_png(&icon, &path)?;
        written.push(path);
    }
    Ok(written)
}
