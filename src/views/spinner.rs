use std::time::Instant;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 80;

/// Spinner glyph for the time elapsed since `start`.
pub fn spinner_frame(start: Option<Instant>) -> &'static str {
    let elapsed = start.map_or(0, |s| s.elapsed().as_millis());
    FRAMES[(elapsed / FRAME_MS) as usize % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_start_shows_first_frame() {
        assert_eq!(spinner_frame(None), FRAMES[0]);
    }

    #[test]
    fn frame_is_always_a_known_glyph() {
        let frame = spinner_frame(Some(Instant::now()));
        assert!(FRAMES.contains(&frame));
    }
}
