/// Full-screen screenshot viewer for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotViewer {
    screenshots: Vec<String>,
    index: usize,
}

impl ScreenshotViewer {
    /// `None` when there is nothing to show. Out-of-range indices wrap.
    pub fn open(screenshots: Vec<String>, index: i64) -> Option<Self> {
        if screenshots.is_empty() {
            return None;
        }
        let index = index.rem_euclid(screenshots.len() as i64) as usize;
        Some(Self { screenshots, index })
    }

    pub fn current(&self) -> &str {
        &self.screenshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.screenshots.len()
    }

    pub fn has_navigation(&self) -> bool {
        self.screenshots.len() > 1
    }

    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.screenshots.len()
    }

    pub fn previous_index(&self) -> usize {
        if self.index == 0 {
            self.screenshots.len() - 1
        } else {
            self.index - 1
        }
    }

    pub fn next(&mut self) {
        self.index = self.next_index();
    }

    pub fn previous(&mut self) {
        self.index = self.previous_index();
    }

    /// "2 / 5"
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.screenshots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shots(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://cdn/{i}.png")).collect()
    }

    #[test]
    fn empty_list_has_no_viewer() {
        assert!(ScreenshotViewer::open(Vec::new(), 0).is_none());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut viewer = ScreenshotViewer::open(shots(3), 0).unwrap();

        viewer.previous();
        assert_eq!(viewer.index(), 2);
        assert_eq!(viewer.counter(), "3 / 3");

        viewer.next();
        assert_eq!(viewer.index(), 0);
        assert_eq!(viewer.current(), "https://cdn/0.png");
    }

    #[test]
    fn out_of_range_index_wraps() {
        assert_eq!(ScreenshotViewer::open(shots(3), 4).unwrap().index(), 1);
        assert_eq!(ScreenshotViewer::open(shots(3), -1).unwrap().index(), 2);
    }

    #[test]
    fn single_screenshot_has_no_navigation() {
        let viewer = ScreenshotViewer::open(shots(1), 0).unwrap();
        assert!(!viewer.has_navigation());
        assert_eq!(viewer.next_index(), 0);
        assert_eq!(viewer.previous_index(), 0);
    }
}
