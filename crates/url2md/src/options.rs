//! Fixed conversion configuration

/// Configuration passed to the conversion engine
///
/// Not user-controlled: constructed once at process start and shared by
/// every request. The readability thresholds are deliberately permissive
/// so marginal content is kept rather than discarded.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Prefer main-content regions (`main`, `article`, `[role=main]`)
    /// when one exists
    pub isolate_main: bool,
    /// CSS selectors for elements dropped before conversion
    pub exclude: Vec<String>,
    /// Regions with less text than this are candidates for removal
    pub min_content_length: usize,
    /// Regions scoring below this are removed (negative keeps nearly all)
    pub min_score: i32,
    /// Drop regions whose class/id look like boilerplate
    pub remove_unlikely_content: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            isolate_main: true,
            exclude: [
                "script",
                "style",
                "nav",
                ".nav",
                "#nav",
                ".header",
                ".footer",
                ".sidebar",
                ".advertisement",
                "[class*=\"ad-\"]",
                "[class*=\"social\"]",
                "[class*=\"share\"]",
                "iframe[src*=\"facebook\"]",
                "img[src*=\"facebook.com/tr\"]",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_content_length: 10,
            min_score: -50,
            remove_unlikely_content: false,
        }
    }
}
