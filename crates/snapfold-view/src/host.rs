use crate::format::humanize_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStyle {
    Plain,
    /// Visually framed group.
    Boxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Size to content.
    Fit,
    /// Take the remaining row width.
    Expand,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f32,
    pub y: f32,
}

/// Immediate-mode UI primitives the presenter draws with.
///
/// Calls arrive in a fixed per-frame traversal order. Nothing returned by a
/// host is kept across frames apart from plain values (scroll position,
/// foldout state, selected tab), which the caller owns.
pub trait RenderHost {
    fn begin_horizontal(&mut self, style: GroupStyle);
    fn end_horizontal(&mut self);
    fn begin_vertical(&mut self, style: GroupStyle);
    fn end_vertical(&mut self);
    fn begin_scroll(&mut self, position: ScrollPosition) -> ScrollPosition;
    fn end_scroll(&mut self);
    fn label(&mut self, text: &str, width: Width);
    /// Returns the foldout state after any user interaction this frame.
    fn foldout(&mut self, expanded: bool, title: &str) -> bool;
    /// Returns the selected tab index after any user interaction this frame.
    fn toolbar(&mut self, selected: usize, tabs: &[&str]) -> usize;
    /// True when clicked this frame.
    fn button(&mut self, text: &str) -> bool;

    fn format_bytes(&self, bytes: u64) -> String {
        humanize_bytes(bytes)
    }
}
