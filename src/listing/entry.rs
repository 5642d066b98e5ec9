use serde::Deserialize;
use serde::Serialize;

/// One row of the listing table.
///
/// All columns are kept exactly as the tool printed them (minus surrounding
/// whitespace). The numeric accessors return `None` for blank or non-numeric
/// cells, which the tool prints e.g. for directories and for all but the
/// first file of a solid block.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entry {
    pub date_time: String,
    pub attr: String,
    pub size: String,
    pub compressed: String,
    pub name: String,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Option<u64> {
        self.size.parse().ok()
    }

    pub fn compressed(&self) -> Option<u64> {
        self.compressed.parse().ok()
    }

    pub fn is_dir(&self) -> bool {
        self.attr.starts_with('D')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_numbers_decode_to_none() {
        let entry = Entry {
            date_time: "2014-06-06 00:08:39".into(),
            attr: "D....".into(),
            size: "".into(),
            compressed: "n/a".into(),
            name: "dir".into(),
        };
        assert_eq!(None, entry.size());
        assert_eq!(None, entry.compressed());
        assert!(entry.is_dir());
    }

    #[test]
    fn serialized_keys_match_column_names() {
        let entry = Entry {
            size: "12".into(),
            name: "a b.txt".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!("12", json["Size"]);
        assert_eq!("a b.txt", json["Name"]);
        assert!(json.get("DateTime").is_some());
        assert_eq!(Some(12), entry.size());
    }
}
