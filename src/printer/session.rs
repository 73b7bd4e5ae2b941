//! # Printer Session
//!
//! Per-job printer settings. A session is created for each job, emitted once
//! during configuration and then dropped.

use crate::encoder::CommandEncoder;
use crate::protocol::text::Alignment;

use super::PrinterConfig;

/// Settings applied at the start of every job.
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterSession {
    pub alignment: Alignment,
    /// Maximum print speed in mm/s (200, 150, 125, 100 or 75)
    pub print_speed: i32,
    /// Print density in percent (clamped to 65–130 when emitted)
    pub print_density: f32,
    pub enhanced_print: bool,
    pub double_strike: bool,
    pub left_margin_mm: f32,
    pub print_width_mm: f32,
    /// Minimum line feed in 1/8 mm steps. 0 disables the automatic feed
    /// after each line so only explicit feeds move the paper.
    pub line_feed_pitch: i32,
}

impl PrinterSession {
    /// Session defaults for a printer profile.
    pub fn for_printer(config: &PrinterConfig) -> Self {
        Self {
            alignment: Alignment::Left,
            print_speed: 75,
            print_density: 130.0,
            enhanced_print: true,
            double_strike: true,
            left_margin_mm: config.left_margin_mm,
            print_width_mm: config.print_width_mm,
            line_feed_pitch: 0,
        }
    }

    pub fn with_speed(mut self, mm_per_sec: i32) -> Self {
        self.print_speed = mm_per_sec;
        self
    }

    pub fn with_density(mut self, percent: f32) -> Self {
        self.print_density = percent;
        self
    }

    /// Emit the configuration sequence that opens every label job.
    ///
    /// Order: reset, line feed pitch, double width/height, alignment, speed,
    /// density, enhanced, double strike, margins.
    pub fn configure(&self, encoder: &mut CommandEncoder) {
        encoder.reset();
        encoder.set_line_feed_pitch(self.line_feed_pitch);
        encoder.set_double_width_height();
        encoder.set_alignment(self.alignment);
        encoder.set_print_speed(self.print_speed);
        encoder.set_print_density(self.print_density);
        encoder.set_enhanced_print(self.enhanced_print);
        encoder.set_double_strike(self.double_strike);
        encoder.set_margins(self.left_margin_mm, self.print_width_mm);
    }
}

impl Default for PrinterSession {
    fn default() -> Self {
        Self::for_printer(&PrinterConfig::NP3511D)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_configuration_bytes() {
        let mut encoder = CommandEncoder::new();
        PrinterSession::default().configure(&mut encoder);
        let (_, buffer) = encoder.finish();

        assert_eq!(
            buffer.as_bytes(),
            &[
                0x1B, 0x40, // reset
                0x1B, 0x33, 0x00, // pitch 0
                0x1B, 0x21, 0x38, // double width/height
                0x1B, 0x61, 0x00, // left
                0x1D, 0x53, 0x04, // 75 mm/s
                0x1D, 0x7E, 0x82, // 130%
                0x1B, 0x45, 0x01, // enhanced
                0x1B, 0x47, 0x01, // double strike
                0x1D, 0x57, 0x06, 0x42, // 6mm, 66mm
            ][..]
        );
    }

    #[test]
    fn test_overrides() {
        let session = PrinterSession::default()
            .with_speed(150)
            .with_density(40.0);
        let mut encoder = CommandEncoder::new();
        session.configure(&mut encoder);
        let (_, buffer) = encoder.finish();

        let bytes = buffer.as_bytes();
        assert_eq!(&bytes[11..17], &[0x1D, 0x53, 0x01, 0x1D, 0x7E, 65]);
    }
}
