/// Format a platform integer color as `#rrggbb`: lowercase hex,
/// zero-padded on the left to six digits.
pub fn hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
