use image::Rgba;

/// Side length of every generated icon, in pixels.
pub const SIZE: u32 = 1024;

/// Rotation applied to the motif, in degrees counter-clockwise.
pub const MOTIF_ANGLE: f32 = 12.0;

pub const BLUE: Rgba<u8> = Rgba([0x25, 0x63, 0xEB, 0xFF]);
pub const BLUE_EDGE: Rgba<u8> = Rgba([0x1D, 0x4E, 0xD8, 0xFF]);

pub const PAPER: Rgba<u8> = Rgba([0xF8, 0xFA, 0xFC, 0xFF]);
pub const FILTER: Rgba<u8> = Rgba([0xF4, 0xC7, 0x8B, 0xFF]);
pub const STRIPE: Rgba<u8> = Rgba([0xD8, 0xA3, 0x5E, 0xFF]);

pub const EMBER_RED: Rgba<u8> = Rgba([0xEF, 0x44, 0x44, 0xFF]);
pub const EMBER_ORANGE: Rgba<u8> = Rgba([0xF9, 0x73, 0x16, 0xFF]);
pub const HIGHLIGHT: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0x22]);

/// Opacity of the blurred glow around the ember.
pub const HALO_ALPHA: u8 = 90;

/// Share of the radial mask range kept for the background, so the gradient stays subtle.
pub const BACKGROUND_CONTRAST: f32 = 0.45;

// Base measurements of the motif at scale 1.0. Every other dimension derives from these.
const PILL_WIDTH: f32 = 620.0;
const PILL_HEIGHT: f32 = 136.0;

const STRIPE_COUNT: usize = 3;

/// An axis-aligned box in pixel coordinates. Both corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A square box of half-size `r` around `(cx, cy)`.
    pub const fn around(cx: i32, cy: i32, r: i32) -> Self {
        Self::new(cx - r, cy - r, cx + r, cy + r)
    }
}

/// Proportional geometry of the cigarette motif for a given scale.
///
/// Mirrors the drawing order of the layer: pill, filter, stripes, highlight,
/// then the ember (halo and disc) at the burning tip.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifLayout {
    pub pill: Rect,
    pub pill_radius: i32,
    pub filter: Rect,
    /// Bounding box of the round cap closing the filter on the left.
    pub filter_cap: Rect,
    pub stripes: [Rect; STRIPE_COUNT],
    pub highlight: Rect,
    pub highlight_radius: i32,
    pub ember_center: (i32, i32),
    pub halo_radius: i32,
    pub halo_blur: i32,
    pub ember_diameter: u32,
}

impl MotifLayout {
    pub fn new(scale: f32) -> Self {
        let cx = SIZE as f32 / 2.0;
        let cy = SIZE as f32 / 2.0;

        let w = (PILL_WIDTH * scale) as i32;
        let h = (PILL_HEIGHT * scale) as i32;
        let hf = h as f32;

        let x0 = (cx - w as f32 / 2.0) as i32;
        let y0 = (cy - hf / 2.0) as i32;
        let pill = Rect::new(x0, y0, x0 + w, y0 + h);

        let filter_w = (w as f32 * 0.25) as i32;
        let filter = Rect::new(x0, y0, x0 + filter_w, pill.y1);
        let filter_cap = Rect::new(x0, y0, x0 + h, pill.y1);

        let stripe_w = ((w as f32 * 0.018) as i32).max(10);
        let stripe_pad = (hf * 0.18) as i32;
        let stripe_gap = (stripe_w as f32 * 1.35) as i32;
        let first = x0 + (hf * 0.40) as i32;
        let stripes = std::array::from_fn(|i| {
            let sx = first + i as i32 * (stripe_w + stripe_gap);
            Rect::new(sx, y0 + stripe_pad, sx + stripe_w, pill.y1 - stripe_pad)
        });

        let highlight = Rect::new(
            x0 + filter_w + (hf * 0.10) as i32,
            y0 + (hf * 0.12) as i32,
            pill.x1 - (hf * 0.18) as i32,
            y0 + (hf * 0.34) as i32,
        );

        Self {
            pill,
            pill_radius: h / 2,
            filter,
            filter_cap,
            stripes,
            highlight,
            highlight_radius: (hf * 0.16) as i32,
            ember_center: (pill.x1 - (hf * 0.10) as i32, (y0 + pill.y1) / 2),
            halo_radius: (hf * 0.48) as i32,
            halo_blur: ((hf * 0.08) as i32).max(1),
            ember_diameter: (hf * 0.92) as u32,
        }
    }

    /// Top-left corner at which the ember disc is pasted so it sits centred on the tip.
    pub fn ember_origin(&self) -> (i64, i64) {
        let half = self.ember_diameter as f32 / 2.0;
        let (cx, cy) = self.ember_center;
        ((cx as f32 - half) as i64, (cy as f32 - half) as i64)
    }
}

/// What the motif is composited onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    /// The opaque blue radial gradient.
    Gradient,
    /// A fully transparent canvas, for adaptive icon foregrounds.
    Transparent,
}

/// One output image of the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconVariant {
    pub file_name: &'static str,
    pub scale: f32,
    pub backdrop: Backdrop,
}

/// The full icon (iOS and legacy Android) followed by the adaptive icon foreground.
pub const VARIANTS: [IconVariant; 2] = [
    IconVariant {
        file_name: "app_icon.png",
        scale: 1.0,
        backdrop: Backdrop::Gradient,
    },
    IconVariant {
        file_name: "app_icon_foreground.png",
        scale: 0.96,
        backdrop: Backdrop::Transparent,
    },
];
