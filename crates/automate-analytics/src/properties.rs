use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AnalyticsError, Result};

pub const PLUGIN_PROPERTIES_FILE: &str = "plugin.properties";
pub const TRACKING_ID_KEY: &str = "google.analytics.tracking.id";

/// Parses a properties file.
///
/// Keys end at the first `=`, `:` or whitespace; one `=`/`:` after the key is
/// optional. A line ending in an odd number of backslashes continues on the
/// next line. `#` and `!` start comments. Escape sequences inside keys and
/// values (`\uXXXX`, `\=`) are kept verbatim.
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    let mut logical = String::new();
    let mut continuing = false;

    for raw in text.lines() {
        let line = raw.trim_start();
        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }
        if ends_with_continuation(line) {
            logical.push_str(&line[..line.len() - 1]);
            continuing = true;
            continue;
        }
        logical.push_str(line);
        insert_entry(&mut props, &logical);
        logical.clear();
        continuing = false;
    }
    if continuing {
        insert_entry(&mut props, &logical);
    }
    props
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn insert_entry(props: &mut BTreeMap<String, String>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let key_end = line
        .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
        .unwrap_or(line.len());
    let mut value = line[key_end..].trim_start();
    if let Some(rest) = value.strip_prefix(['=', ':']) {
        value = rest.trim_start();
    }
    props.insert(line[..key_end].to_string(), value.to_string());
}

/// Reads the collector tracking id. A missing or empty key is `Ok(None)`;
/// an unreadable file is an error.
pub fn load_tracking_id(path: &Path) -> Result<Option<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_properties(&text)
        .remove(TRACKING_ID_KEY)
        .filter(|id| !id.is_empty()))
}
