use crate::engine::OcrError;
use crate::region::{BoundingBox, TextRegion};

// level page_num block_num par_num line_num word_num left top width height conf text
const COLUMNS: usize = 12;
const WORD_LEVEL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    page: u32,
    block: u32,
    par: u32,
    line: u32,
}

struct LineAccumulator {
    key: LineKey,
    words: Vec<String>,
    confidences: Vec<f32>,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl LineAccumulator {
    fn new(key: LineKey) -> Self {
        Self {
            key,
            words: Vec::new(),
            confidences: Vec::new(),
            left: f32::MAX,
            top: f32::MAX,
            right: f32::MIN,
            bottom: f32::MIN,
        }
    }

    fn push(&mut self, word: &str, conf: f32, bbox: BoundingBox) {
        self.words.push(word.to_string());
        if conf >= 0.0 {
            self.confidences.push(conf);
        }
        self.left = self.left.min(bbox.x);
        self.top = self.top.min(bbox.y);
        self.right = self.right.max(bbox.x + bbox.width);
        self.bottom = self.bottom.max(bbox.y + bbox.height);
    }

    fn finish(self) -> Option<TextRegion> {
        if self.words.is_empty() {
            return None;
        }
        let confidence = if self.confidences.is_empty() {
            None
        } else {
            let mean = self.confidences.iter().sum::<f32>() / self.confidences.len() as f32;
            Some(mean / 100.0)
        };
        Some(TextRegion {
            text: self.words.join(" "),
            bounding_box: Some(BoundingBox {
                x: self.left,
                y: self.top,
                width: self.right - self.left,
                height: self.bottom - self.top,
            }),
            confidence,
        })
    }
}

fn parse_u32(field: &str, row: usize) -> Result<u32, OcrError> {
    field
        .trim()
        .parse()
        .map_err(|_| OcrError::EngineError(format!("malformed tsv row {row}: {field:?}")))
}

fn parse_f32(field: &str, row: usize) -> Result<f32, OcrError> {
    field
        .trim()
        .parse()
        .map_err(|_| OcrError::EngineError(format!("malformed tsv row {row}: {field:?}")))
}

/// Folds tesseract's word-level TSV output into one region per text line.
pub fn parse_tsv(data: &str) -> Result<Vec<TextRegion>, OcrError> {
    let mut regions = Vec::new();
    let mut current: Option<LineAccumulator> = None;

    for (row, line) in data.lines().enumerate() {
        if row == 0 && line.starts_with("level") {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.splitn(COLUMNS, '\t').collect();
        if fields.len() < COLUMNS - 1 {
            return Err(OcrError::EngineError(format!("truncated tsv row {row}")));
        }

        if parse_u32(fields[0], row)? != WORD_LEVEL {
            continue;
        }
        let text = fields.get(11).map(|t| t.trim()).unwrap_or_default();
        if text.is_empty() {
            continue;
        }

        let key = LineKey {
            page: parse_u32(fields[1], row)?,
            block: parse_u32(fields[2], row)?,
            par: parse_u32(fields[3], row)?,
            line: parse_u32(fields[4], row)?,
        };
        let bbox = BoundingBox {
            x: parse_f32(fields[6], row)?,
            y: parse_f32(fields[7], row)?,
            width: parse_f32(fields[8], row)?,
            height: parse_f32(fields[9], row)?,
        };
        let conf = parse_f32(fields[10], row)?;

        let acc = match current.take() {
            Some(acc) if acc.key == key => acc,
            Some(acc) => {
                regions.extend(acc.finish());
                LineAccumulator::new(key)
            }
            None => LineAccumulator::new(key),
        };
        let acc = current.insert(acc);
        acc.push(text, conf, bbox);
    }

    if let Some(acc) = current {
        regions.extend(acc.finish());
    }

    Ok(regions)
}
