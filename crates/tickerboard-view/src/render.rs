use crate::record::Record;
use crate::region::Block;

/// Field names a view never prints verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExclusionSet(&'static [&'static str]);

impl ExclusionSet {
    /// Company profile: internal ids, links and images.
    pub const PROFILE: Self = Self(&[
        "cik",
        "cusip",
        "defaultImage",
        "image",
        "isin",
        "website",
        "changes",
    ]);

    /// Income statement, balance sheet and cash flow statement.
    pub const STATEMENT: Self = Self(&["link", "finalLink", "acceptedDate", "date"]);

    /// Most recent close; the date is shown as its own heading.
    pub const HISTORICAL: Self = Self(&["label", "vwap", "changeOverTime", "date"]);

    /// Market index widgets; the name is shown as the widget heading.
    pub const MARKET_INDEX: Self =
        Self(&["name", "symbol", "exchange", "eps", "marketCap", "pe"]);

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|excluded| *excluded == key)
    }
}

/// One `key : value` paragraph per field of `record`, in record order,
/// skipping excluded fields.
pub fn record_lines(record: &Record, exclude: &ExclusionSet) -> Vec<Block> {
    record
        .entries()
        .filter(|(key, _)| !exclude.contains(key))
        .map(|(key, value)| Block::Paragraph(format!("{key} : {value}")))
        .collect()
}

/// Append the lines of `record` to `area`, the pending contents of a region.
pub fn display_record(area: &mut Vec<Block>, record: &Record, exclude: &ExclusionSet) {
    area.extend(record_lines(record, exclude));
}
