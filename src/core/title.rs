//! Search title derivation.
//!
//! Release folders decorate the series name with bracketed group/quality
//! tags and dash qualifiers; the catalog search wants the bare title.

use regex::Regex;

/// Derive a catalog search title from a folder's base name.
///
/// Strips every `[...]` segment together with its surrounding whitespace,
/// then cuts the remainder at the first dash. Case and width are left
/// untouched. The result may be empty; an empty query simply yields no
/// catalog matches.
pub fn derive_search_title(folder_name: &str) -> String {
    let mut title = folder_name.to_string();

    if let Ok(re) = Regex::new(r"\s*\[[^\]]*\]\s*") {
        title = re.replace_all(&title, "").into_owned();
    }
    if let Ok(re) = Regex::new(r"\s*-\s*.*$") {
        title = re.replace_all(&title, "").into_owned();
    }

    title
}
