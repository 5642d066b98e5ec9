use std::io::Error;
use std::io::Write;

use sevenzip_archive::Entry;
use sevenzip_archive::Metadata;

/// Prints entries under a header, with sizes aligned to the right.
pub fn print_entries<W: Write>(entries: &[Entry], mut writer: W) -> Result<(), Error> {
    let mut widths = HEADER.map(|title| title.chars().count());
    for entry in entries {
        for (width, value) in widths.iter_mut().zip(cells(entry)) {
            *width = (*width).max(value.chars().count());
        }
    }
    write_row(&mut writer, &widths, HEADER)?;
    for entry in entries {
        write_row(&mut writer, &widths, cells(entry))?;
    }
    Ok(())
}

pub fn print_metadata<W: Write>(metadata: &Metadata, mut writer: W) -> Result<(), Error> {
    let width = metadata
        .iter()
        .map(|(field, _)| field.as_str().len())
        .max()
        .unwrap_or(0);
    for (field, value) in metadata.iter() {
        writeln!(writer, "{:width$} = {}", field.as_str(), value)?;
    }
    Ok(())
}

fn cells(entry: &Entry) -> [&str; 5] {
    [
        entry.date_time.as_str(),
        entry.attr.as_str(),
        entry.size.as_str(),
        entry.compressed.as_str(),
        entry.name.as_str(),
    ]
}

// The name is not padded.
fn write_row<W: Write>(writer: &mut W, widths: &[usize; 5], row: [&str; 5]) -> Result<(), Error> {
    let [date_time, attr, size, compressed, name] = row;
    writeln!(
        writer,
        "{date_time:<w0$}{GAP}{attr:<w1$}{GAP}{size:>w2$}{GAP}{compressed:>w3$}{GAP}{name}",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}

const HEADER: [&str; 5] = ["Date Time", "Attr", "Size", "Compressed", "Name"];
const GAP: &str = "  ";

#[cfg(test)]
mod tests {
    use super::*;
    use sevenzip_archive::MetaField;

    #[test]
    fn sizes_are_right_aligned() {
        let entries = [
            Entry {
                date_time: "2024-01-02 03:04:05".into(),
                attr: "....A".into(),
                size: "6".into(),
                compressed: "10".into(),
                name: "hello.txt".into(),
            },
            Entry {
                date_time: "2024-01-02 03:04:05".into(),
                attr: "D....".into(),
                size: "0".into(),
                compressed: "".into(),
                name: "a dir".into(),
            },
        ];
        let mut output = Vec::new();
        print_entries(&entries, &mut output).unwrap();
        assert_eq!(
            "Date Time            Attr   Size  Compressed  Name\n\
             2024-01-02 03:04:05  ....A     6          10  hello.txt\n\
             2024-01-02 03:04:05  D....     0              a dir\n",
            String::from_utf8(output).unwrap()
        );
    }

    #[test]
    fn empty_archive_prints_only_the_header() {
        let mut output = Vec::new();
        print_entries(&[], &mut output).unwrap();
        assert_eq!(
            "Date Time  Attr  Size  Compressed  Name\n",
            String::from_utf8(output).unwrap()
        );
    }

    #[test]
    fn metadata_values_are_aligned() {
        let metadata: Metadata = [
            (MetaField::Type, "7z".to_string()),
            (MetaField::PhysicalSize, "134".to_string()),
        ]
        .into_iter()
        .collect();
        let mut output = Vec::new();
        print_metadata(&metadata, &mut output).unwrap();
        assert_eq!(
            "Type          = 7z\nPhysical Size = 134\n",
            String::from_utf8(output).unwrap()
        );
    }
}
