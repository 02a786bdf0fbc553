use crate::export::ExportFormat;
use crate::library::LibraryFilter;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Generator,
    Library,
    Export,
    Help,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Generator, Screen::Library, Screen::Export, Screen::Help];

    pub fn next(self) -> Self {
        match self {
            Screen::Generator => Screen::Library,
            Screen::Library => Screen::Export,
            Screen::Export => Screen::Help,
            Screen::Help => Screen::Generator,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Generator => Screen::Help,
            Screen::Library => Screen::Generator,
            Screen::Export => Screen::Library,
            Screen::Help => Screen::Export,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Generator => "generator",
            Screen::Library => "library",
            Screen::Export => "export",
            Screen::Help => "help",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Screen::ALL.into_iter().find(|s| s.name() == name)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > TOAST_TTL
    }
}

/// Single-slot notification area. A new toast replaces the current one, and
/// a dismissal only clears the toast it was scheduled for.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Toast>,
    next_id: u64,
}

impl Notifier {
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Toast {
            id: self.next_id,
            message: message.into(),
            kind,
            created_at: Instant::now(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|t| t.id == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().filter(|t| !t.is_expired())
    }
}

/// Which library field a text prompt edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Query,
    Tag,
    Rename,
    Tags,
}

impl InputTarget {
    pub fn label(self) -> &'static str {
        match self {
            InputTarget::Query => "Search",
            InputTarget::Tag => "Tag",
            InputTarget::Rename => "Name",
            InputTarget::Tags => "Tags (comma separated)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextInput {
    pub target: InputTarget,
    pub buffer: String,
}

/// Library screen selection and filter.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    pub filter: LibraryFilter,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl LibraryView {
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub screen: Screen,

    // Generator
    pub selected_slot: usize,

    // Library
    pub library_view: LibraryView,
    pub input: Option<TextInput>,

    // Export
    pub export_format: ExportFormat,

    pub toast: Notifier,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            screen: Screen::Generator,
            selected_slot: 0,
            library_view: LibraryView::default(),
            input: None,
            export_format: ExportFormat::default(),
            toast: Notifier::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_cycle_and_names() {
        for s in Screen::ALL {
            assert_eq!(s.next().prev(), s);
            assert_eq!(Screen::from_name(s.name()), Some(s));
        }
        assert_eq!(Screen::from_name("queue"), None);
    }

    #[test]
    fn test_new_toast_replaces_old_timer() {
        let mut n = Notifier::default();
        let first = n.show(ToastKind::Success, "Copied");
        let second = n.show(ToastKind::Error, "Clipboard unavailable");
        assert_ne!(first, second);

        // The first toast's timer fires late: must not clear the second.
        n.dismiss(first);
        assert_eq!(n.current().map(|t| t.message.as_str()), Some("Clipboard unavailable"));

        n.dismiss(second);
        assert!(n.current().is_none());
    }

    #[test]
    fn test_library_view_selection() {
        let mut v = LibraryView::default();
        v.select_next(0);
        assert_eq!(v.selected, 0);
        v.select_next(3);
        v.select_next(3);
        v.select_next(3);
        assert_eq!(v.selected, 2);
        v.clamp(1);
        assert_eq!(v.selected, 0);
        v.select_prev();
        assert_eq!(v.selected, 0);
    }

    #[test]
    fn test_update_scroll() {
        let mut v = LibraryView {
            selected: 12,
            ..Default::default()
        };
        v.update_scroll(5);
        assert_eq!(v.scroll_offset, 8);
        v.selected = 3;
        v.update_scroll(5);
        assert_eq!(v.scroll_offset, 3);
    }
}
