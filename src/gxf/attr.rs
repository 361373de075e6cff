use hashbrown::HashMap;

/// Case-insensitive view over the 9th column of a GFF3/GTF line.
///
/// Three fragment syntaxes are accepted, separated by `;`:
///
/// * `key=value` (GFF3); everything after the first `=` is the value, verbatim.
/// * `key "value"` (GTF); one layer of surrounding double quotes is stripped.
/// * `key` alone, stored with no value.
///
/// Keys are lower-cased. A repeated key keeps its last value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes<'a> {
    entries: HashMap<String, Option<&'a str>>,
}

impl<'a> Attributes<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut entries = HashMap::new();

        for fragment in line.split(';') {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }

            let (key, value) = split_fragment(fragment);
            entries.insert(key.to_lowercase(), value);
        }

        Self { entries }
    }

    /// Returns the value of `key`, or `None` when the key is absent or bare.
    ///
    /// `key` must already be lower-case.
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries.get(key).copied().flatten()
    }

    #[inline(always)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one fragment carried a value.
    ///
    /// Columns made only of bare words (`g1.t1`) have no values; those are
    /// identifiers rather than key/value attributes.
    pub fn has_values(&self) -> bool {
        self.entries.values().any(Option::is_some)
    }
}

fn split_fragment(fragment: &str) -> (&str, Option<&str>) {
    if let Some((key, value)) = fragment.split_once('=') {
        (key.trim(), Some(value))
    } else if let Some((key, value)) = fragment.split_once(' ') {
        (key, Some(strip_quotes(value.trim())))
    } else {
        (fragment, None)
    }
}

#[inline(always)]
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gff() {
        let attr = Attributes::parse("ID=ENSG00000223972;Name=DDX11L1");
        assert_eq!(attr.len(), 2);
        assert_eq!(attr.get("id"), Some("ENSG00000223972"));
        assert_eq!(attr.get("name"), Some("DDX11L1"));
    }

    #[test]
    fn test_parse_gtf() {
        let line = "gene_id \"ENSG00000223972\"; transcript_id \"g1.t1\"; level 2;";
        let attr = Attributes::parse(line);
        assert_eq!(attr.len(), 3);
        assert_eq!(attr.get("gene_id"), Some("ENSG00000223972"));
        assert_eq!(attr.get("transcript_id"), Some("g1.t1"));
        assert_eq!(attr.get("level"), Some("2"));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let attr = Attributes::parse("ID=g1;Parent=chr1.g0;PROTEIN_ID=P1");
        assert_eq!(attr.get("id"), Some("g1"));
        assert_eq!(attr.get("parent"), Some("chr1.g0"));
        assert_eq!(attr.get("protein_id"), Some("P1"));
        assert_eq!(attr.get("ID"), None);
    }

    #[test]
    fn test_value_keeps_inner_equals() {
        let attr = Attributes::parse("ID=g1;Note=a=b=c");
        assert_eq!(attr.get("note"), Some("a=b=c"));
    }

    #[test]
    fn test_trailing_separator_and_empty_value() {
        let attr = Attributes::parse("ID=g1;Name=;");
        assert_eq!(attr.len(), 2);
        assert_eq!(attr.get("name"), Some(""));
    }

    #[test]
    fn test_bare_identifier() {
        let attr = Attributes::parse("g7.t2");
        assert_eq!(attr.len(), 1);
        assert!(attr.contains("g7.t2"));
        assert_eq!(attr.get("g7.t2"), None);
        assert!(!attr.has_values());
    }

    #[test]
    fn test_only_one_quote_layer_is_stripped() {
        let attr = Attributes::parse("note \"\"quoted\"\"");
        assert_eq!(attr.get("note"), Some("\"quoted\""));
    }

    #[test]
    fn test_empty_column() {
        let attr = Attributes::parse("");
        assert!(attr.is_empty());
        assert!(!attr.has_values());
    }
}
