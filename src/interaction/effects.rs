//! Per-action visual effects.
//!
//! Each function takes the frames elapsed since the interaction keyframe and writes into an
//! [`ElementOverride`]. None of them reads any other state.

use std::f64::consts::PI;

use smallvec::SmallVec;

use crate::composition::model::InteractionAction;
use crate::foundation::math::{clamp01, css_num};
use crate::interaction::state::ElementOverride;
use crate::interaction::timeline::InteractionWindow;

const ACCENT: &str = "59, 130, 246";
const CONFIRM: &str = "34, 197, 94";

/// Hover fade in/out length in frames.
pub const HOVER_FADE_FRAMES: f64 = 5.0;
/// Focus outline ramp length in frames.
pub const FOCUS_RAMP_FRAMES: f64 = 6.0;
/// Focus glow pulse rate in radians per frame.
pub const FOCUS_PULSE_RATE: f64 = 0.15;
/// Default frames per typed character.
pub const DEFAULT_TYPE_SPEED: f64 = 2.0;
/// Caret blink period in frames.
pub const CARET_PERIOD: f64 = 30.0;
/// Frames of each period the caret is visible.
pub const CARET_VISIBLE: f64 = 20.0;
/// Select highlight length in frames.
pub const SELECT_FLASH_FRAMES: f64 = 10.0;
/// Check bounce length in frames.
pub const CHECK_BOUNCE_FRAMES: f64 = 8.0;
/// Check highlight length in frames.
pub const CHECK_FLASH_FRAMES: f64 = 12.0;

/// Apply the window's effect at `elapsed` frames after it opened.
pub fn apply(window: &InteractionWindow, elapsed: f64, out: &mut ElementOverride) {
    let ix = &window.interaction;
    match ix.action {
        InteractionAction::Hover => hover(elapsed, window.length(), out),
        InteractionAction::Click => click(elapsed, window.length(), out),
        InteractionAction::Focus => focus(elapsed, out),
        InteractionAction::Type => type_text(
            elapsed,
            ix.value.as_deref().unwrap_or_default(),
            ix.speed,
            out,
        ),
        InteractionAction::Select => select(elapsed, ix.value.as_deref(), out),
        InteractionAction::Check => check(elapsed, out),
    }
}

/// Hover glow intensity: ramps up over the first frames, down over the last, 1 between.
pub fn hover_intensity(elapsed: f64, hold: f64) -> f64 {
    let rise = elapsed / HOVER_FADE_FRAMES;
    let fall = (hold - elapsed) / HOVER_FADE_FRAMES;
    clamp01(rise.min(fall).min(1.0))
}

fn hover(elapsed: f64, hold: f64, out: &mut ElementOverride) {
    let i = hover_intensity(elapsed, hold);
    out.set("filter", format!("brightness({})", css_num(1.0 + 0.15 * i)));

    let layers: SmallVec<[String; 3]> = [(8.0, 0.6), (16.0, 0.4), (32.0, 0.2)]
        .into_iter()
        .map(|(blur, alpha)| {
            format!(
                "0 0 {}px rgba({ACCENT}, {})",
                css_num(blur * i),
                css_num(alpha * i)
            )
        })
        .collect();
    out.set("boxShadow", layers.join(", "));
}

/// Click press scale and darken amount at `elapsed` into a `hold`-frame click.
///
/// The scale falls from 1 to 0.92 over the first 30% and springs back over the remaining 70%.
pub fn click_press(elapsed: f64, hold: f64) -> (f64, f64) {
    let p = if hold > 0.0 { clamp01(elapsed / hold) } else { 1.0 };
    let scale = if p < 0.3 {
        1.0 - 0.08 * (p / 0.3)
    } else {
        0.92 + 0.08 * ((p - 0.3) / 0.7)
    };
    (scale, 0.15 * (1.0 - p))
}

fn click(elapsed: f64, hold: f64, out: &mut ElementOverride) {
    let (scale, darken) = click_press(elapsed, hold);
    out.set("transform", format!("scale({})", css_num(scale)));
    out.set("filter", format!("brightness({})", css_num(1.0 - darken)));
}

fn focus(elapsed: f64, out: &mut ElementOverride) {
    let ramp = clamp01(elapsed / FOCUS_RAMP_FRAMES);
    let pulse = 0.5 + 0.5 * (elapsed * FOCUS_PULSE_RATE).sin();
    out.set(
        "outline",
        format!(
            "{}px solid rgba({ACCENT}, {})",
            css_num(2.0 * ramp),
            css_num(ramp)
        ),
    );
    out.set("outlineOffset", "2px".to_owned());
    out.set(
        "boxShadow",
        format!(
            "0 0 0 {}px rgba({ACCENT}, {})",
            css_num(3.0 + 3.0 * pulse),
            css_num(0.25 * ramp)
        ),
    );
}

/// Characters revealed `elapsed` frames into typing `len` characters at `speed` frames each.
///
/// The first character appears on the keyframe itself.
pub fn typed_chars(elapsed: f64, speed: Option<f64>, len: usize) -> usize {
    let speed = match speed {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => DEFAULT_TYPE_SPEED,
    };
    if !(elapsed >= 0.0) {
        return 0;
    }
    let shown = (elapsed / speed).floor() + 1.0;
    if shown >= len as f64 {
        len
    } else {
        shown as usize
    }
}

fn type_text(elapsed: f64, value: &str, speed: Option<f64>, out: &mut ElementOverride) {
    let len = value.chars().count();
    let shown = typed_chars(elapsed, speed, len);
    out.value = Some(value.chars().take(shown).collect());
    out.show_typing_cursor = (shown < len).then(|| elapsed.rem_euclid(CARET_PERIOD) < CARET_VISIBLE);
}

fn select(elapsed: f64, value: Option<&str>, out: &mut ElementOverride) {
    if let Some(v) = value {
        out.value = Some(v.to_owned());
    }
    out.set("outline", format!("2px solid rgba({ACCENT}, 1)"));
    if elapsed < SELECT_FLASH_FRAMES {
        let flash = 1.0 - elapsed / SELECT_FLASH_FRAMES;
        out.set(
            "backgroundColor",
            format!("rgba({ACCENT}, {})", css_num(0.2 * flash)),
        );
    }
}

fn check(elapsed: f64, out: &mut ElementOverride) {
    out.checked = Some(true);
    if elapsed < CHECK_BOUNCE_FRAMES {
        let s = 1.0 + 0.12 * (PI * elapsed / CHECK_BOUNCE_FRAMES).sin();
        out.set("transform", format!("scale({})", css_num(s)));
    }
    if elapsed < CHECK_FLASH_FRAMES {
        let flash = 1.0 - elapsed / CHECK_FLASH_FRAMES;
        out.set(
            "backgroundColor",
            format!("rgba({CONFIRM}, {})", css_num(0.25 * flash)),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/effects.rs"]
mod tests;
