//! Ordered zone-name → verdict mapping.

/// Per-zone verdicts in zone input order, one entry per zone.
///
/// With the `serde` feature it serializes as a JSON object whose keys keep
/// the input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectionResult {
    entries: Vec<(String, bool)>,
}

impl DetectionResult {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mapping with room for `n` zones.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Append a verdict. Callers keep names unique.
    pub fn push(&mut self, name: impl Into<String>, present: bool) {
        self.entries.push((name.into(), present));
    }

    /// Verdict for `name`, if that zone was part of the request.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// Number of zones reported.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the request had no zones.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, present)` pairs in zone input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Zone names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for (name, v) in iter {
            out.push(name, v);
        }
        out
    }
}

impl<'a> IntoIterator for &'a DetectionResult {
    type Item = (&'a str, bool);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, bool)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DetectionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, v) in &self.entries {
            map.serialize_entry(name, v)?;
        }
        map.end()
    }
}
