use super::state::{InputTarget, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),

    // Generator
    Regenerate,
    SelectPrevSlot,
    SelectNextSlot,
    TogglePin,
    CycleSize,
    ToggleFormat,
    ToggleDarkPreview,
    CopySelected,
    SaveToLibrary,

    // Library
    ListUp,
    ListDown,
    ToggleFavorite,
    DeleteEntry,
    ApplyEntry,
    ToggleFavoritesOnly,
    ClearFilters,

    // Text prompt
    BeginInput(InputTarget),
    InputChar(char),
    Backspace,
    SubmitInput,
    CancelInput,

    // Export
    NextExportFormat,
    PrevExportFormat,
    CopyExport,

    Resize,
}
