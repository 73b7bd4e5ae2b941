//! # Label Variants
//!
//! The closed set of label templates and the block layout each one prints.
//!
//! | Variant | Blocks | Rows | Intake adjustment |
//! |---------|--------|------|-------------------|
//! | `equipment_intake` | 3 | text+bar, text+bar, text | yes |
//! | `golden_unit_intake` | 3 | text+bar, text+bar, text | yes |
//! | `part_outbound` | 3 | date; FRU, claim; OSI+bar | no |
//! | `free_form` | 5 | one text line each | no |
//! | `batch_from_table` | one `part_outbound` label per row | | no |
//!
//! Every row (text line or barcode) is 6 mm tall at double size.
//!
//! Input text may not contain control characters: the templates supply their
//! own tab and line feed, and anything else would be read as a command by
//! the printer. Barcode identifiers must be non-empty CODE39 data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::ir::BarcodeSpec;
use crate::protocol::barcode::{self, ModuleWidth};

/// Required identifier length for intake labels.
pub const IDENTIFIER_LEN: usize = 6;

/// Maximum characters kept from claim and FRU fields.
pub const OUTBOUND_FIELD_MAX: usize = 14;

/// Number of lines on a free-form label.
pub const FREE_FORM_LINES: usize = 5;

/// Maximum characters kept from each free-form line.
pub const FREE_FORM_LINE_MAX: usize = 20;

/// Fields printed on a part outbound label.
///
/// Deserializes from an object (`{"identifier", "claim", "fru"}`) or from a
/// spreadsheet row (`[identifier, claim, fru]`). See [`super::batch`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct OutboundFields {
    pub identifier: String,
    pub claim: String,
    pub fru: String,
}

impl OutboundFields {
    pub fn new(
        identifier: impl Into<String>,
        claim: impl Into<String>,
        fru: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            claim: claim.into(),
            fru: fru.into(),
        }
    }

    /// Check the fields of one outbound label.
    pub fn validate(&self) -> Result<(), LabelError> {
        check_text("identifier", &self.identifier)?;
        check_text("claim", &self.claim)?;
        check_text("FRU", &self.fru)?;
        check_barcode(&self.identifier)
    }
}

/// A label job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum LabelVariant {
    /// Incoming equipment, identified by a 6-character OSI number.
    EquipmentIntake { identifier: String },
    /// Incoming golden unit, identified by a 6-character number.
    GoldenUnitIntake { identifier: String },
    /// Outgoing part with date, FRU and claim.
    PartOutbound(OutboundFields),
    /// Up to five short lines of arbitrary text.
    FreeForm { lines: Vec<String> },
    /// One outbound label per table row.
    BatchFromTable { rows: Vec<OutboundFields> },
}

/// One printed row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Text(String),
    Barcode(BarcodeSpec),
}

/// Rows printed together, separated from the next block by the planned
/// spacing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub rows: Vec<Row>,
}

impl Block {
    fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// The blocks of a single label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub name: &'static str,
    pub blocks: Vec<Block>,
    /// Whether the final feed includes the intake adjustment.
    pub intake_adjustment: bool,
}

impl LabelLayout {
    /// Total number of rows across all blocks.
    pub fn row_count(&self) -> usize {
        self.blocks.iter().map(|b| b.rows.len()).sum()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl LabelVariant {
    /// Template name, as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EquipmentIntake { .. } => "equipment_intake",
            Self::GoldenUnitIntake { .. } => "golden_unit_intake",
            Self::PartOutbound(_) => "part_outbound",
            Self::FreeForm { .. } => "free_form",
            Self::BatchFromTable { .. } => "batch_from_table",
        }
    }

    /// Check the input before anything is emitted.
    pub fn validate(&self) -> Result<(), LabelError> {
        match self {
            Self::EquipmentIntake { identifier } | Self::GoldenUnitIntake { identifier } => {
                let actual = identifier.chars().count();
                if actual != IDENTIFIER_LEN {
                    return Err(LabelError::InvalidIdentifier {
                        expected: IDENTIFIER_LEN,
                        actual,
                    });
                }
                check_text("identifier", identifier)?;
                check_barcode(identifier)
            }
            Self::PartOutbound(fields) => fields.validate(),
            Self::FreeForm { lines } => lines
                .iter()
                .take(FREE_FORM_LINES)
                .try_for_each(|line| check_text("line", line)),
            Self::BatchFromTable { rows } => {
                rows.iter().enumerate().try_for_each(|(i, row)| {
                    row.validate().inspect_err(|e| {
                        tracing::warn!(row = i + 1, error = %e, "batch row rejected");
                    })
                })
            }
        }
    }

    /// Number of labels this job prints.
    pub fn label_count(&self) -> usize {
        match self {
            Self::BatchFromTable { rows } => rows.len(),
            _ => 1,
        }
    }

    /// Validate and lay out every label of the job. `date` is printed on
    /// outbound labels.
    pub fn layouts(&self, date: NaiveDate) -> Result<Vec<LabelLayout>, LabelError> {
        self.validate()?;

        let layouts = match self {
            Self::EquipmentIntake { identifier } => vec![intake_layout(
                "equipment_intake",
                &format!(" OSI {id}\t   *{id}", id = identifier),
                identifier,
            )],
            Self::GoldenUnitIntake { identifier } => vec![intake_layout(
                "golden_unit_intake",
                &format!("  GU {id}\t   _{id}", id = identifier),
                identifier,
            )],
            Self::PartOutbound(fields) => vec![outbound_layout(fields, date)],
            Self::FreeForm { lines } => vec![free_form_layout(lines)],
            Self::BatchFromTable { rows } => {
                rows.iter().map(|row| outbound_layout(row, date)).collect()
            }
        };

        Ok(layouts)
    }
}

fn intake_layout(name: &'static str, line: &str, identifier: &str) -> LabelLayout {
    let labelled = || {
        Block::new(vec![
            Row::Text(line.to_string()),
            Row::Barcode(BarcodeSpec::code39(identifier, ModuleWidth::Normal)),
        ])
    };

    LabelLayout {
        name,
        blocks: vec![
            labelled(),
            labelled(),
            Block::new(vec![Row::Text(line.to_string())]),
        ],
        intake_adjustment: true,
    }
}

fn outbound_layout(fields: &OutboundFields, date: NaiveDate) -> LabelLayout {
    LabelLayout {
        name: "part_outbound",
        blocks: vec![
            Block::new(vec![Row::Text(format!(
                "           {}\n",
                date.format("%d/%m/%Y")
            ))]),
            Block::new(vec![
                Row::Text(format!(
                    " FRU:   {}\n",
                    truncate(&fields.fru, OUTBOUND_FIELD_MAX)
                )),
                Row::Text(format!(
                    " CLAIM: {}\n",
                    truncate(&fields.claim, OUTBOUND_FIELD_MAX)
                )),
            ]),
            Block::new(vec![
                Row::Text(format!(" OSI:   {}\n", fields.identifier)),
                Row::Barcode(BarcodeSpec::code39(&fields.identifier, ModuleWidth::Wide)),
            ]),
        ],
        intake_adjustment: false,
    }
}

fn free_form_layout(lines: &[String]) -> LabelLayout {
    let blocks = (0..FREE_FORM_LINES)
        .map(|i| {
            let line = lines
                .get(i)
                .map(|l| truncate(l, FREE_FORM_LINE_MAX))
                .unwrap_or("");
            let text = if line.is_empty() {
                " \n".to_string()
            } else {
                format!("{}\n", line)
            };
            Block::new(vec![Row::Text(text)])
        })
        .collect();

    LabelLayout {
        name: "free_form",
        blocks,
        intake_adjustment: false,
    }
}

fn check_text(field: &str, value: &str) -> Result<(), LabelError> {
    match value.chars().find(|c| c.is_control()) {
        Some(c) => Err(LabelError::InvalidInput(format!(
            "{} contains control character {:?}",
            field, c
        ))),
        None => Ok(()),
    }
}

fn check_barcode(identifier: &str) -> Result<(), LabelError> {
    let payload = format!("*{}*", identifier);
    if barcode::is_code39_payload(&payload) {
        Ok(())
    } else {
        Err(LabelError::InvalidBarcode(payload))
    }
}

/// First `max` characters of `s`.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
