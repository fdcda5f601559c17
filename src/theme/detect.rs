use super::ThemeVariant;

/// Background luma above which the terminal counts as light.
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Guess whether the terminal has a light or dark background.
///
/// Falls back to dark when the terminal does not answer the query.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) => variant_for_luma(luma),
        Err(e) => {
            tracing::debug!(error = %e, "terminal background detection failed");
            ThemeVariant::Dark
        }
    }
}

fn variant_for_luma(luma: f32) -> ThemeVariant {
    if luma > LIGHT_LUMA_THRESHOLD {
        ThemeVariant::Light
    } else {
        ThemeVariant::Dark
    }
}
