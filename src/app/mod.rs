pub mod actions;
pub mod events;
pub mod state;

use crate::clipboard;
use crate::color;
use crate::config::Config;
use crate::export;
use crate::input;
use crate::library::Library;
use crate::palette::PaletteEngine;
use crate::storage::Storage;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{ClipboardEvent, Event};
use state::{AppState, InputTarget, Screen, TextInput, ToastKind, TOAST_TTL};
use tokio::sync::mpsc;

/// Rows the library list scrolls by.
const LIBRARY_PAGE: usize = 20;

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    storage: Storage,
    palette: PaletteEngine,
    library: Library,
    state: AppState,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf) -> anyhow::Result<Self> {
        let storage = Storage::open(&cfg.db_path())?;
        Self::with_storage(cfg, config_path, storage)
    }

    pub fn with_storage(
        cfg: Config,
        config_path: std::path::PathBuf,
        storage: Storage,
    ) -> anyhow::Result<Self> {
        let palette = PaletteEngine::initialize(&storage, cfg.palette.size, cfg.palette.format)?;
        let library = Library::load(&storage)?;

        let mut state = AppState::new();
        if let Some(screen) = cfg.ui.last_screen.as_deref().and_then(Screen::from_name) {
            state.screen = screen;
        }

        Ok(Self {
            cfg,
            config_path,
            storage,
            palette,
            library,
            state,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());

        // Redraws happen on input, clipboard results and toast expiry only.
        self.draw(terminal)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Clipboard(ce) => self.handle_clipboard(ce, &tx),
                Event::ToastExpired(id) => self.state.toast.dismiss(id),
            }

            if self.state.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        self.save_state_on_quit();

        Ok(())
    }

    fn draw(&self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        tui::draw(
            terminal,
            &tui::Snapshot {
                app: &self.state,
                session: self.palette.state(),
                library: &self.library,
            },
        )
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.ui.last_screen = Some(self.state.screen.name().to_string());
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!("save config: {e:#}");
        }
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        if let Err(e) = self.reduce(action, tx) {
            tracing::error!("{e:#}");
            self.notify(ToastKind::Error, format!("{e:#}"), tx);
        }
    }

    fn reduce(&mut self, action: Action, tx: &mpsc::Sender<Event>) -> anyhow::Result<()> {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => self.set_screen(self.state.screen.next()),
            Action::PrevScreen => self.set_screen(self.state.screen.prev()),
            Action::SetScreen(screen) => self.set_screen(screen),

            Action::Regenerate => self.palette.regenerate(&self.storage)?,
            Action::SelectPrevSlot => {
                self.state.selected_slot = self.state.selected_slot.saturating_sub(1);
            }
            Action::SelectNextSlot => {
                let len = self.palette.state().slots.len();
                if len > 0 {
                    self.state.selected_slot = (self.state.selected_slot + 1).min(len - 1);
                }
            }
            Action::TogglePin => self.palette.toggle_pin(&self.storage, self.state.selected_slot)?,
            Action::CycleSize => {
                self.palette.cycle_size(&self.storage)?;
                self.clamp_selected_slot();
            }
            Action::ToggleFormat => {
                let format = self.palette.state().format.toggle();
                self.palette.change_format(&self.storage, format)?;
            }
            Action::ToggleDarkPreview => self.palette.toggle_dark_preview(&self.storage)?,
            Action::CopySelected => {
                if let Some(slot) = self.palette.state().slots.get(self.state.selected_slot) {
                    let text = match color::to_hex(&slot.value) {
                        Some(hex) => format!("#{hex}"),
                        None => slot.value.clone(),
                    };
                    self.spawn_copy(text.clone(), text, tx);
                }
            }
            Action::SaveToLibrary => {
                let colors = self.palette.state().pinned_hex();
                let saved = self
                    .library
                    .create(&self.storage, colors)?
                    .map(|e| e.name.clone());
                match saved {
                    Some(name) => self.notify(ToastKind::Success, format!("Saved \"{name}\""), tx),
                    None => self.notify(ToastKind::Error, "Pin at least one color to save", tx),
                }
            }

            Action::ListUp => {
                self.state.library_view.select_prev();
                self.state.library_view.update_scroll(LIBRARY_PAGE);
            }
            Action::ListDown => {
                let len = self.library.list(&self.state.library_view.filter).len();
                self.state.library_view.select_next(len);
                self.state.library_view.update_scroll(LIBRARY_PAGE);
            }
            Action::ToggleFavorite => {
                if let Some(id) = self.selected_entry_id() {
                    self.library.toggle_favorite(&self.storage, &id)?;
                    self.clamp_library_selection();
                }
            }
            Action::DeleteEntry => {
                if let Some(id) = self.selected_entry_id()
                    && self.library.delete(&self.storage, &id)?
                {
                    self.clamp_library_selection();
                    self.notify(ToastKind::Success, "Palette deleted", tx);
                }
            }
            Action::ApplyEntry => {
                if let Some(id) = self.selected_entry_id()
                    && self.library.apply_to_generator(&self.storage, &id)?
                {
                    self.reload_palette()?;
                    self.set_screen(Screen::Generator);
                }
            }
            Action::ToggleFavoritesOnly => {
                let filter = &mut self.state.library_view.filter;
                filter.favorites_only = !filter.favorites_only;
                self.state.library_view.selected = 0;
                self.state.library_view.scroll_offset = 0;
            }
            Action::ClearFilters => {
                self.state.library_view = Default::default();
            }

            Action::BeginInput(target) => self.begin_input(target),
            Action::InputChar(c) => {
                if let Some(input) = &mut self.state.input {
                    input.buffer.push(c);
                }
            }
            Action::Backspace => {
                if let Some(input) = &mut self.state.input {
                    input.buffer.pop();
                }
            }
            Action::SubmitInput => self.submit_input()?,
            Action::CancelInput => self.state.input = None,

            Action::NextExportFormat => {
                self.state.export_format = self.state.export_format.next();
            }
            Action::PrevExportFormat => {
                self.state.export_format = self.state.export_format.prev();
            }
            Action::CopyExport => {
                let format = self.state.export_format;
                let text = export::render(format, &self.palette.state().slots);
                self.spawn_copy(text, format.label().to_string(), tx);
            }

            Action::Resize => {}
        }
        Ok(())
    }

    fn handle_clipboard(&mut self, ev: ClipboardEvent, tx: &mpsc::Sender<Event>) {
        match ev {
            ClipboardEvent::Copied { what } => {
                self.notify(ToastKind::Success, format!("Copied {what}"), tx);
            }
            ClipboardEvent::Failed(e) => {
                tracing::warn!("copy failed: {e}");
                self.notify(ToastKind::Error, format!("Copy failed: {e}"), tx);
            }
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        self.state.input = None;
        self.state.screen = screen;
    }

    /// Re-run palette initialization, which consumes a pending handoff.
    fn reload_palette(&mut self) -> anyhow::Result<()> {
        self.palette =
            PaletteEngine::initialize(&self.storage, self.cfg.palette.size, self.cfg.palette.format)?;
        self.state.selected_slot = 0;
        Ok(())
    }

    fn clamp_selected_slot(&mut self) {
        let len = self.palette.state().slots.len();
        self.state.selected_slot = self.state.selected_slot.min(len.saturating_sub(1));
    }

    fn clamp_library_selection(&mut self) {
        let len = self.library.list(&self.state.library_view.filter).len();
        self.state.library_view.clamp(len);
        self.state.library_view.update_scroll(LIBRARY_PAGE);
    }

    fn selected_entry_id(&self) -> Option<String> {
        self.library
            .list(&self.state.library_view.filter)
            .get(self.state.library_view.selected)
            .map(|e| e.id.clone())
    }

    fn begin_input(&mut self, target: InputTarget) {
        let filter = &self.state.library_view.filter;
        let buffer = match target {
            InputTarget::Query => filter.query.clone().unwrap_or_default(),
            InputTarget::Tag => filter.tag.clone().unwrap_or_default(),
            InputTarget::Rename | InputTarget::Tags => {
                let Some(entry) = self
                    .selected_entry_id()
                    .and_then(|id| self.library.find(&id).cloned())
                else {
                    return;
                };
                if target == InputTarget::Rename {
                    entry.name
                } else {
                    entry.tags.join(", ")
                }
            }
        };
        self.state.input = Some(TextInput { target, buffer });
    }

    fn submit_input(&mut self) -> anyhow::Result<()> {
        let Some(input) = self.state.input.take() else {
            return Ok(());
        };
        let value = input.buffer.trim().to_string();
        match input.target {
            InputTarget::Query | InputTarget::Tag => {
                let value = (!value.is_empty()).then_some(value);
                let view = &mut self.state.library_view;
                if input.target == InputTarget::Query {
                    view.filter.query = value;
                } else {
                    view.filter.tag = value;
                }
                view.selected = 0;
                view.scroll_offset = 0;
            }
            InputTarget::Rename => {
                if let Some(id) = self.selected_entry_id() {
                    self.library.update(&self.storage, &id, Some(&value), None)?;
                }
            }
            InputTarget::Tags => {
                if let Some(id) = self.selected_entry_id() {
                    self.library.update(&self.storage, &id, None, Some(&value))?;
                    self.clamp_library_selection();
                }
            }
        }
        Ok(())
    }

    /// Show a toast and schedule its dismissal. A newer toast makes the
    /// pending dismissal a no-op.
    fn notify(&mut self, kind: ToastKind, message: impl Into<String>, tx: &mpsc::Sender<Event>) {
        let id = self.state.toast.show(kind, message);
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(TOAST_TTL).await;
            let _ = tx.send(Event::ToastExpired(id)).await;
        });
    }

    fn spawn_copy(&self, text: String, what: String, tx: &mpsc::Sender<Event>) {
        let command = self.cfg.clipboard.command.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match clipboard::copy(&text, command.as_deref()).await {
                Ok(()) => ClipboardEvent::Copied { what },
                Err(e) => ClipboardEvent::Failed(e.to_string()),
            };
            let _ = tx.send(Event::Clipboard(ev)).await;
        });
    }
}
