use unicode_normalization::UnicodeNormalization as _;

// ---------------------------------------------------------------------------
// Chronological ordering of heterogeneous month labels
// ---------------------------------------------------------------------------
//
// Source spreadsheets write the `MES` column in whatever shape the operator
// typed that month: `3`, `03`, `2025-03`, `03/2025`, `Março`, `mar`, `March`.
// All of them must sort chronologically, and labels nobody can interpret sort
// after the recognized ones in stable lexicographic order.

/// Sort key for a month label. Ordering is `(rank, month, tiebreak)`:
/// recognized labels get rank 0 and their month number, everything else gets
/// rank 1 and compares by the folded label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    rank: u8,
    month: u8,
    tiebreak: String,
}

/// Remove diacritics by NFKD-decomposing and dropping combining marks.
pub fn strip_diacritics(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

fn is_combining_mark(c: char) -> bool {
    // Combining Diacritical Marks block covers everything Portuguese uses.
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Month names and abbreviations, full names first so that e.g. `marco`
/// wins over the `mar` abbreviation it contains.
const MONTH_NAMES: [(&str, u8); 39] = [
    ("janeiro", 1),
    ("fevereiro", 2),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("sept", 9),
    ("jan", 1),
    ("fev", 2),
    ("mar", 3),
    ("abr", 4),
    ("mai", 5),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("set", 9),
    ("sep", 9),
    ("out", 10),
    ("nov", 11),
    ("dez", 12),
    ("dec", 12),
];

/// Compute the chronological sort key for a raw month label.
pub fn month_sort_key(label: &str) -> MonthKey {
    let folded = strip_diacritics(label).to_lowercase().trim().to_string();

    if let Some(month) = parse_month_number(&folded) {
        return MonthKey {
            rank: 0,
            month,
            tiebreak: folded,
        };
    }

    for (name, month) in MONTH_NAMES {
        if folded.contains(name) {
            return MonthKey {
                rank: 0,
                month,
                tiebreak: folded,
            };
        }
    }

    MonthKey {
        rank: 1,
        month: 0,
        tiebreak: folded,
    }
}

/// Recognize `YYYY-MM`, `MM/YYYY` (either delimiter) and bare `1`..`12`.
fn parse_month_number(folded: &str) -> Option<u8> {
    if let Some((left, right)) = folded.split_once(['-', '/']) {
        let left = left.trim();
        let right = right.trim();
        if is_year(left) {
            return parse_month_field(right);
        }
        if is_year(right) {
            return parse_month_field(left);
        }
        return None;
    }
    parse_month_field(folded)
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_month_field(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u8>() {
        Ok(m) if (1..=12).contains(&m) => Some(m),
        _ => None,
    }
}

/// Distinct, non-empty month labels in chronological order.
pub fn sorted_months<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut months: Vec<String> = Vec::new();
    for label in labels {
        let label = label.trim();
        if label.is_empty() || months.iter().any(|m| m == label) {
            continue;
        }
        months.push(label.to_string());
    }
    months.sort_by_cached_key(|m| month_sort_key(m));
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        sorted_months(labels.iter().copied())
    }

    #[test]
    fn strips_portuguese_diacritics() {
        assert_eq!(strip_diacritics("Março"), "Marco");
        assert_eq!(strip_diacritics("décimo têrço"), "decimo terco");
    }

    #[test]
    fn year_month_formats_sort_by_month() {
        assert_eq!(
            sorted(&["2025-10", "2025-02", "2025/7"]),
            vec!["2025-02", "2025/7", "2025-10"]
        );
    }

    #[test]
    fn month_year_formats_sort_by_month() {
        assert_eq!(
            sorted(&["10/2025", "02/2025", "7-2025"]),
            vec!["02/2025", "7-2025", "10/2025"]
        );
    }

    #[test]
    fn bare_numbers_sort_numerically() {
        assert_eq!(sorted(&["10", "2", "01"]), vec!["01", "2", "10"]);
    }

    #[test]
    fn out_of_range_numbers_are_not_months() {
        // `13` and `0` fall to the unrecognized rank, after real months.
        assert_eq!(sorted(&["13", "fev", "0"]), vec!["fev", "0", "13"]);
    }

    #[test]
    fn portuguese_names_with_accents() {
        assert_eq!(
            sorted(&["Dezembro", "Março", "janeiro", "ago"]),
            vec!["janeiro", "Março", "ago", "Dezembro"]
        );
    }

    #[test]
    fn english_names_and_sept_variant() {
        assert_eq!(
            sorted(&["October", "Sept", "may"]),
            vec!["may", "Sept", "October"]
        );
    }

    #[test]
    fn name_embedded_in_longer_label_is_recognized() {
        assert_eq!(
            sorted(&["mes de outubro", "mes de marco"]),
            vec!["mes de marco", "mes de outubro"]
        );
    }

    #[test]
    fn unrecognized_labels_sort_last_lexicographically() {
        assert_eq!(
            sorted(&["zzz", "total", "jan"]),
            vec!["jan", "total", "zzz"]
        );
    }

    #[test]
    fn dedups_and_drops_empty_labels() {
        assert_eq!(sorted(&["jan", "", "jan", "  "]), vec!["jan"]);
    }
}
