#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Clipboard(ClipboardEvent),
    /// The dismissal timer for toast `id` fired.
    ToastExpired(u64),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum ClipboardEvent {
    Copied { what: String },
    Failed(String),
}
