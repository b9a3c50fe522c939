/// Skin-tone heuristic over one pixel. Alpha is not considered.
///
/// Requires lower bounds on every channel, red and green above blue, and
/// upper bounds that reject near-white highlights.
pub fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    r > 50 && g > 40 && b > 30 && r > b && g > b && r < 220 && g < 200 && b < 180
}
