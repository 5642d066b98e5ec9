use crate::listing::Entry;

/// Column widths taken from the dashed line under the table header.
///
/// Each width covers the dashes of a column plus the whitespace that follows
/// them. `Name` is always last and takes the remainder of the line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldWidths {
    date_time: usize,
    attr: usize,
    size: usize,
    compressed: Option<usize>,
}

impl FieldWidths {
    /// Recognizes a separator made of 4 or 5 runs of dashes.
    ///
    /// With only four runs the table has no `Compressed` column.
    pub fn from_separator(line: &str) -> Option<Self> {
        let mut widths = Vec::with_capacity(4);
        let mut rest = line.trim_end();
        loop {
            let dashes = rest.len() - rest.trim_start_matches('-').len();
            if dashes == 0 {
                return None;
            }
            let after_dashes = &rest[dashes..];
            if after_dashes.is_empty() {
                break;
            }
            let gap = &after_dashes[..after_dashes.len() - after_dashes.trim_start().len()];
            if gap.is_empty() {
                return None;
            }
            widths.push(dashes + gap.chars().count());
            rest = &after_dashes[gap.len()..];
        }
        match widths[..] {
            [date_time, attr, size, compressed] => Some(Self {
                date_time,
                attr,
                size,
                compressed: Some(compressed),
            }),
            [date_time, attr, size] => Some(Self {
                date_time,
                attr,
                size,
                compressed: None,
            }),
            _ => None,
        }
    }

    /// Cuts a table row into columns.
    pub fn slice(&self, line: &str) -> Entry {
        let mut rest = line;
        let date_time = take(&mut rest, self.date_time);
        let attr = take(&mut rest, self.attr);
        let size = take(&mut rest, self.size);
        let compressed = match self.compressed {
            Some(width) => take(&mut rest, width),
            None => "",
        };
        Entry {
            date_time: date_time.trim().to_string(),
            attr: attr.trim().to_string(),
            size: size.trim().to_string(),
            compressed: compressed.trim().to_string(),
            name: rest.trim().to_string(),
        }
    }
}

/// Splits off the first `width` characters.
fn take<'a>(line: &mut &'a str, width: usize) -> &'a str {
    let end = line
        .char_indices()
        .nth(width)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let (head, tail) = line.split_at(end);
    *line = tail;
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEPARATOR: &str =
        "------------------- ----- ------------ ------------  ------------------------";

    #[test]
    fn widths_include_trailing_gap() {
        let widths = FieldWidths::from_separator(SEPARATOR).unwrap();
        assert_eq!(
            FieldWidths {
                date_time: 20,
                attr: 6,
                size: 13,
                compressed: Some(14),
            },
            widths
        );
    }

    #[test]
    fn four_runs_have_no_compressed_column() {
        let widths =
            FieldWidths::from_separator("------------------- ----- ------------ ----").unwrap();
        assert_eq!(None, widths.compressed);
        let entry = widths.slice("2020-01-01 10:00:00 ....A           12 a  b");
        assert_eq!("12", entry.size);
        assert_eq!("", entry.compressed);
        assert_eq!("a  b", entry.name);
    }

    #[test]
    fn other_lines_are_not_separators() {
        for line in [
            "",
            "--",
            "-- --",
            "----- -----",
            "------------------- ----- ------------ ------------  ---- ----",
            "------------------- ----- ------------ ------------  ----x",
            " ------------------- ----- ------------ ------------  ----",
            "   Date      Time    Attr         Size   Compressed  Name",
        ] {
            assert_eq!(None, FieldWidths::from_separator(line), "line = {line:?}");
        }
    }

    #[test]
    fn slice_keeps_spaces_inside_name() {
        let widths = FieldWidths::from_separator(SEPARATOR).unwrap();
        let entry = widths.slice(
            "2014-06-06 00:08:39 ....A      3301358       152684  20140602_Website_(Sjabloon CDE) Zonder klantgegevens (His).csv",
        );
        assert_eq!(
            Entry {
                date_time: "2014-06-06 00:08:39".into(),
                attr: "....A".into(),
                size: "3301358".into(),
                compressed: "152684".into(),
                name: "20140602_Website_(Sjabloon CDE) Zonder klantgegevens (His).csv".into(),
            },
            entry
        );
    }

    #[test]
    fn slice_counts_characters_not_bytes() {
        let widths = FieldWidths::from_separator("--- -- -- --  ----").unwrap();
        let entry = widths.slice("€€€ éé 1  2   The €U/sucks/file.txt  ");
        assert_eq!("€€€", entry.date_time);
        assert_eq!("éé", entry.attr);
        assert_eq!("1", entry.size);
        assert_eq!("2", entry.compressed);
        assert_eq!("The €U/sucks/file.txt", entry.name);
    }

    #[test]
    fn short_lines_produce_blank_columns() {
        let widths = FieldWidths::from_separator(SEPARATOR).unwrap();
        let entry = widths.slice("2014-06-06 00:08:39 D....");
        assert_eq!("D....", entry.attr);
        assert_eq!("", entry.size);
        assert_eq!("", entry.name);
    }
}
