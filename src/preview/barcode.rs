//! CODE39 bar patterns for preview rendering, via the barcoders crate.

use barcoders::sym::code39::Code39;

/// Bars of a CODE39 payload, one entry per dot column (`true` = bar).
///
/// The payload carries its own `*` start/stop characters, which barcoders
/// adds by itself, so they are stripped first. Unencodable data gives no
/// bars.
pub fn encode_code39(payload: &str, module_dots: usize) -> Vec<bool> {
    let data = payload.trim_matches('*');
    let barcode = match Code39::new(data) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(payload, error = %e, "barcode not drawable in preview");
            return Vec::new();
        }
    };

    let encoded = barcode.encode();
    let mut bars = Vec::with_capacity(encoded.len() * module_dots);
    for &module in &encoded {
        let is_bar = module == 1;
        for _ in 0..module_dots {
            bars.push(is_bar);
        }
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scales_modules() {
        let narrow = encode_code39("*123456*", 2);
        let wide = encode_code39("*123456*", 4);
        assert!(!narrow.is_empty());
        assert_eq!(wide.len(), narrow.len() * 2);
    }

    #[test]
    fn test_lowercase_is_not_drawable() {
        assert!(encode_code39("*abc*", 3).is_empty());
    }
}
