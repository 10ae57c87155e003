pub trait TabbedContainer {
    type Tab: Copy + PartialEq;

    fn tabs(&self) -> &[Self::Tab];
    fn active(&self) -> Self::Tab;
    fn select(&mut self, tab: Self::Tab) -> bool;
    fn set_sensitive(&mut self, sensitive: bool);
    fn is_sensitive(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneTab {
    Raw,
    Headers,
    Rendered,
}

impl PaneTab {
    pub fn title(self) -> &'static str {
        match self {
            PaneTab::Raw => "Raw",
            PaneTab::Headers => "Headers",
            PaneTab::Rendered => "Rendered",
        }
    }
}

/// Ordered, never empty tabs with one active tab. The first tab starts active.
#[derive(Debug, Clone)]
pub struct TabSet<T> {
    tabs: Vec<T>,
    active: usize,
    sensitive: bool,
}

impl<T: Copy + PartialEq> TabSet<T> {
    pub fn new(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut tabs = vec![first];
        tabs.extend(rest);
        Self {
            tabs,
            active: 0,
            sensitive: true,
        }
    }

    pub fn contains(&self, tab: T) -> bool {
        self.tabs.contains(&tab)
    }
}

impl<T: Copy + PartialEq> TabbedContainer for TabSet<T> {
    type Tab = T;

    fn tabs(&self) -> &[T] {
        &self.tabs
    }

    fn active(&self) -> T {
        self.tabs[self.active]
    }

    fn select(&mut self, tab: T) -> bool {
        match self.tabs.iter().position(|candidate| *candidate == tab) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    fn set_sensitive(&mut self, sensitive: bool) {
        self.sensitive = sensitive;
    }

    fn is_sensitive(&self) -> bool {
        self.sensitive
    }
}
