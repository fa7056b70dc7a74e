use crate::catalog::{Catalog, Category};
use crate::entry::DesktopFile;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Indices of the catalog entries matching `query`, best match first.
    pub fn search(&mut self, query: &str, catalog: &Catalog, locale: Option<&str>) -> Vec<usize> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();

        let mut scored: Vec<(usize, u32)> = catalog
            .indices(Category::All)
            .iter()
            .filter_map(|&index| {
                let file = catalog.get(index)?;
                let haystack = search_text(file, locale);
                let score = pattern.score(Utf32Str::new(&haystack, &mut buf), &mut self.matcher)?;
                Some((index, score))
            })
            .collect();

        // `All` is already in name order, so the stable sort breaks ties by name.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }
}

/// Localized `Name`, `GenericName` and `Comment`, then `Exec`.
fn search_text(file: &DesktopFile, locale: Option<&str>) -> String {
    let Some(entry) = file.desktop_entry() else {
        return String::new();
    };
    let mut parts: Vec<&str> = ["Name", "GenericName", "Comment"]
        .iter()
        .filter_map(|key| entry.localized(key, locale))
        .collect();
    parts.extend(entry.get("Exec"));
    parts.join(" ")
}
