//! Terminal QR rendering for wallet authentication challenges
//!
//! Mobile XRPL wallets scan the challenge instead of the user retyping
//! it. Rendered with Unicode half-blocks, two modules per text row.

use qrcode::{Color, QrCode};

const QUIET_ZONE: usize = 2;

/// Render `data` as a QR code string, or `None` when encoding fails
/// (callers degrade to showing the plain challenge text).
pub fn render(data: &str) -> Option<String> {
    let code = QrCode::new(data).ok()?;

    let colors = code.to_colors();
    let width = code.width();
    let total_width = width + QUIET_ZONE * 2;

    let mut matrix: Vec<Vec<bool>> = Vec::with_capacity(total_width);
    for _ in 0..QUIET_ZONE {
        matrix.push(vec![false; total_width]);
    }
    for y in 0..width {
        let mut row = vec![false; QUIET_ZONE];
        for x in 0..width {
            row.push(colors[y * width + x] == Color::Dark);
        }
        row.extend(std::iter::repeat(false).take(QUIET_ZONE));
        matrix.push(row);
    }
    for _ in 0..QUIET_ZONE {
        matrix.push(vec![false; total_width]);
    }

    let height = matrix.len();
    let mut out = String::new();
    for y in (0..height).step_by(2) {
        out.push_str("  ");
        for x in 0..total_width {
            let top = matrix[y][x];
            let bottom = y + 1 < height && matrix[y + 1][x];
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_blocks() {
        let qr = render("sign-this-challenge-1a2b3c").unwrap();
        assert!(!qr.is_empty());
        assert!(qr.chars().any(|c| c == '█' || c == '▀' || c == '▄'));
    }

    #[test]
    fn test_render_empty_input() {
        // QR of an empty string is still encodable
        assert!(render("").is_some());
    }
}
