//! # Golden Label Tests
//!
//! Byte-exact command streams for complete label jobs. Each expected stream
//! is spelled out command by command so a diff points at the exact step that
//! moved.

use chrono::NaiveDate;
use osilabel::label::{
    GapSize, LabelComposer, LabelGeometry, LabelHeight, LabelVariant, OutboundFields,
};
use osilabel::printer::PrinterConfig;
use osilabel::transport::MemorySink;
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn composer(height: LabelHeight, gap: GapSize) -> LabelComposer {
    let config = PrinterConfig::NP3511D;
    LabelComposer::new(config, LabelGeometry::new(height, gap, &config))
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
}

/// Configuration sequence that opens every job.
fn configure() -> Vec<u8> {
    vec![
        0x1B, 0x40, // reset
        0x1B, 0x33, 0x00, // line feed pitch 0
        0x1B, 0x21, 0x38, // double width/height
        0x1B, 0x61, 0x00, // align left
        0x1D, 0x53, 0x04, // 75 mm/s
        0x1D, 0x7E, 0x82, // density 130
        0x1B, 0x45, 0x01, // enhanced on
        0x1B, 0x47, 0x01, // double strike on
        0x1D, 0x57, 0x06, 0x42, // margins 6mm / 66mm
    ]
}

fn backward(steps: u8) -> Vec<u8> {
    vec![0x1B, 0x42, steps]
}

fn forward(steps: u8) -> Vec<u8> {
    vec![0x1B, 0x4A, steps]
}

fn code39(payload: &str, width: u8) -> Vec<u8> {
    let mut out = vec![
        0x1D, 0x68, 48, // height
        0x1D, 0x77, width, // module width
        0x1D, 0x66, 0x00, // HRI font A
        0x1D, 0x48, 0x00, // HRI off
        0x1D, 0x6B, 0x04,
    ];
    out.extend(payload.as_bytes());
    out.push(0x00);
    out
}

fn cut() -> Vec<u8> {
    vec![0x1B, 0x69]
}

fn concat(parts: Vec<Vec<u8>>) -> Vec<u8> {
    parts.into_iter().flatten().collect()
}

fn print_one(composer: &mut LabelComposer, job: &LabelVariant) -> Vec<u8> {
    let mut sink = MemorySink::new();
    composer.print(job, &mut sink).unwrap();
    assert_eq!(sink.len(), 1);
    sink.bytes()
}

// ============================================================================
// INTAKE LABELS
// ============================================================================

#[test]
fn test_equipment_intake_50_5() {
    let mut composer = composer(LabelHeight::Mm50, GapSize::Mm5);
    let job = LabelVariant::EquipmentIntake {
        identifier: "123456".into(),
    };

    let line = b" OSI 123456\t   *123456".to_vec();
    let expected = concat(vec![
        configure(),
        backward(40), // 9.5 - 2.5 - 4 + 2 = 5mm
        line.clone(),
        code39("*123456*", 3),
        forward(48), // spacing 6mm
        line.clone(),
        code39("*123456*", 3),
        forward(48),
        line,
        forward(176), // 50 + 5 - 48.5 + 9.5 + 6 = 22mm
        cut(),
    ]);

    assert_eq!(print_one(&mut composer, &job), expected);
}

#[test]
fn test_golden_unit_intake_49_6() {
    let mut composer = composer(LabelHeight::Mm49, GapSize::Mm6);
    let job = LabelVariant::GoldenUnitIntake {
        identifier: "000042".into(),
    };

    // spacing (49 - 8 - 30) / 2 = 5.5mm = 44 steps
    // head 7 + 30 + 11 = 48, final 49 + 6 - 48 + 9.5 + 6 = 22.5mm
    let line = b"  GU 000042\t   _000042".to_vec();
    let expected = concat(vec![
        configure(),
        backward(36), // 9.5 - 3 - 4 + 2 = 4.5mm
        line.clone(),
        code39("*000042*", 3),
        forward(44),
        line.clone(),
        code39("*000042*", 3),
        forward(44),
        line,
        forward(180),
        cut(),
    ]);

    assert_eq!(print_one(&mut composer, &job), expected);
}

#[test]
fn test_short_identifier_sends_nothing() {
    let mut composer = composer(LabelHeight::Mm50, GapSize::Mm5);
    let mut sink = MemorySink::new();
    let job = LabelVariant::EquipmentIntake {
        identifier: "12345".into(),
    };

    assert!(composer.print(&job, &mut sink).is_err());
    assert!(sink.is_empty());
}

// ============================================================================
// OUTBOUND AND FREE-FORM LABELS
// ============================================================================

#[test]
fn test_part_outbound_40_4() {
    let mut composer = composer(LabelHeight::Mm40, GapSize::Mm4);
    let job = LabelVariant::PartOutbound(OutboundFields::new("654321", "CLM-77", "01AB234"));

    // spacing (40 - 8 - 30) / 2 = 1mm
    // head 6 + 30 + 2 = 38, final 40 + 4 - 38 + 9.5 = 15.5mm
    let expected = concat(vec![
        configure(),
        backward(44), // 9.5 - 2 - 4 + 2 = 5.5mm
        b"           07/03/2024\n".to_vec(),
        forward(8),
        b" FRU:   01AB234\n".to_vec(),
        b" CLAIM: CLM-77\n".to_vec(),
        forward(8),
        b" OSI:   654321\n".to_vec(),
        code39("*654321*", 4),
        forward(124),
        cut(),
    ]);

    assert_eq!(print_one(&mut composer, &job), expected);
}

#[test]
fn test_free_form_50_5() {
    let mut composer = composer(LabelHeight::Mm50, GapSize::Mm5);
    let job = LabelVariant::FreeForm {
        lines: vec!["RACK 4".into(), "".into(), "Año fiscal".into()],
    };

    // spacing (50 - 8 - 30) / 4 = 3mm, no feed after the last line
    // head 6.5 + 30 + 12 = 48.5, final 50 + 5 - 48.5 + 9.5 = 16mm
    let expected = concat(vec![
        configure(),
        backward(40),
        b"RACK 4\n".to_vec(),
        forward(24),
        b" \n".to_vec(),
        forward(24),
        vec![b'A', 0xA4, b'o', b' ', b'f', b'i', b's', b'c', b'a', b'l', b'\n'],
        forward(24),
        b" \n".to_vec(),
        forward(24),
        b" \n".to_vec(),
        forward(128),
        cut(),
    ]);

    assert_eq!(print_one(&mut composer, &job), expected);
}

#[test]
fn test_session_overrides_reach_the_device() {
    let config = PrinterConfig::NP3511D;
    let session = osilabel::printer::PrinterSession::for_printer(&config)
        .with_speed(200)
        .with_density(250.0);
    let mut composer = composer(LabelHeight::Mm50, GapSize::Mm5).with_session(session);

    let bytes = print_one(
        &mut composer,
        &LabelVariant::FreeForm { lines: vec![] },
    );
    assert_eq!(&bytes[11..17], &[0x1D, 0x53, 0x00, 0x1D, 0x7E, 130]);
}
