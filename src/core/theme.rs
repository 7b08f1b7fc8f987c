//! Color palettes. The theme flag picks one whole palette; there are no
//! per-color overrides.

/// Named semantic color roles, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: &'static str,
    /// Raised areas such as headers and inputs
    pub surface: &'static str,
    /// Primary text
    pub text: &'static str,
    /// Taglines, captions and hints
    pub text_secondary: &'static str,
    /// Dividers and outlines
    pub border: &'static str,
    /// Idea cards
    pub card: &'static str,
    /// Accent and call-to-action color
    pub primary: &'static str,
    /// Confirmations
    pub success: &'static str,
    /// Failures and validation messages
    pub error: &'static str,
}

/// Light theme colors
pub const LIGHT: Palette = Palette {
    background: "#F9FAFB",
    surface: "#FFFFFF",
    text: "#1F2937",
    text_secondary: "#6B7280",
    border: "#E5E7EB",
    card: "#FFFFFF",
    primary: "#8B5CF6",
    success: "#10B981",
    error: "#EF4444",
};

/// Dark theme colors
pub const DARK: Palette = Palette {
    background: "#111827",
    surface: "#1F2937",
    text: "#F9FAFB",
    text_secondary: "#9CA3AF",
    border: "#374151",
    card: "#1F2937",
    primary: "#A78BFA",
    success: "#34D399",
    error: "#F87171",
};

/// The palette for the given theme flag.
#[must_use]
pub const fn palette_for(dark: bool) -> &'static Palette {
    if dark { &DARK } else { &LIGHT }
}
