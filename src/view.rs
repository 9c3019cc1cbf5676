/// The report text box as the presentation layer sees it.
///
/// While the user has the box focused, ordinary refreshes are held back so
/// the cursor isn't clobbered; the text is marked stale instead. Forced
/// refreshes always go through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPanel {
    text: String,
    focused: bool,
    stale: bool,
}

impl ReportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Offers a freshly built report. Returns whether the text was replaced.
    pub fn refresh(&mut self, report: String, force: bool) -> bool {
        if self.focused && !force {
            self.stale = self.text != report;
            return false;
        }
        self.text = report;
        self.stale = false;
        true
    }
}
