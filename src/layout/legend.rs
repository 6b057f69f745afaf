use crate::error::{KleError, KtResult};

/// Number of legend positions on a keycap.
pub const LEGEND_SLOTS: usize = 12;

/// Drawn in place of a legend line that is empty after trimming.
pub const BLANK_LEGEND: &str = "\u{2423}";

/// Source slot -> destination slot for each alignment code, as defined by kle-serial.
/// `-1` drops the source slot.
#[rustfmt::skip]
pub const LABEL_MAP: [[i8; LEGEND_SLOTS]; 8] = [
    //0   1   2   3   4   5   6   7   8   9  10  11
    [ 0,  6,  2,  8,  9, 11,  3,  5,  1,  4,  7, 10], // 0 = no centering
    [ 1,  7, -1, -1,  9, 11,  4, -1, -1, -1, -1, 10], // 1 = center x
    [ 3, -1,  5, -1,  9, 11, -1, -1,  4, -1, -1, 10], // 2 = center y
    [ 4, -1, -1, -1,  9, 11, -1, -1, -1, -1, -1, 10], // 3 = center x & y
    [ 0,  6,  2,  8, 10, -1,  3,  5,  1,  4,  7, -1], // 4 = center front (default)
    [ 1,  7, -1, -1, 10, -1,  4, -1, -1, -1, -1, -1], // 5 = center front & x
    [ 3, -1,  5, -1, 10, -1, -1, -1,  4, -1, -1, -1], // 6 = center front & y
    [ 4, -1, -1, -1, 10, -1, -1, -1, -1, -1, -1, -1], // 7 = center front & x & y
];

pub const DEFAULT_ALIGNMENT: u8 = 4;
pub const MAX_ALIGNMENT: u8 = 7;

pub type Legends = [String; LEGEND_SLOTS];

/// Expands raw legend text into the 12 keycap slots and reorders them for `alignment`.
pub fn normalize_legends(raw: &str, alignment: u8) -> KtResult<Legends> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() > LEGEND_SLOTS {
        return Err(KleError::Invariant(format!(
            "legend has {} lines, at most {} are allowed: {:?}",
            lines.len(),
            LEGEND_SLOTS,
            raw
        )));
    }
    let row = LABEL_MAP.get(alignment as usize).ok_or_else(|| {
        KleError::Invariant(format!("alignment {} is outside 0..=7", alignment))
    })?;

    let mut source: Legends = Default::default();
    for (slot, line) in source.iter_mut().enumerate() {
        let text = lines.get(slot).map(|l| l.trim()).unwrap_or("");
        *line = if text.is_empty() {
            BLANK_LEGEND.to_string()
        } else {
            text.to_string()
        };
    }

    let mut out: Legends = Default::default();
    for (text, &dest) in source.into_iter().zip(row.iter()) {
        if dest >= 0 {
            out[dest as usize] = text;
        }
    }
    Ok(out)
}

/// True for slots that carry no visible text.
pub fn is_blank(text: &str) -> bool {
    text.is_empty() || text == BLANK_LEGEND
}

/// The first slot, in slot order, that carries visible text.
pub fn primary_legend(legends: &Legends) -> Option<&str> {
    legends.iter().map(String::as_str).find(|l| !is_blank(l))
}
