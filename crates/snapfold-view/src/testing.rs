//! Test doubles shared by the presenter and window tests.

use snapfold_aggregate::SnapshotInfo;
use snapfold_types::RawNativeObject;

use crate::host::{GroupStyle, RenderHost, ScrollPosition, Width};
use crate::source::{SnapshotDelivery, SnapshotSource, SnapshotTicket, snapshot_channel};

/// Builds a sorted `SnapshotInfo` from `(type, size, instance_id, name)` rows.
pub(crate) fn info(rows: &[(&str, u64, i32, &str)]) -> SnapshotInfo {
    let mut info = SnapshotInfo::new();
    for &(type_name, size, instance_id, name) in rows {
        info.add_object(type_name, RawNativeObject::new(0, size, instance_id, name));
    }
    info.sort();
    info
}

pub(crate) struct Row {
    boxed: bool,
    cells: Vec<String>,
}

/// Renders every frame to flat text lines. Horizontal groups become one line
/// with ` | ` between cells; boxed groups are bracketed.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub(crate) lines: Vec<String>,
    pub(crate) row: Option<Row>,
    pub(crate) verticals: Vec<GroupStyle>,
    pub(crate) foldout_clicks: Vec<String>,
    pub(crate) scroll_to: Option<ScrollPosition>,
    pub(crate) toolbar_pick: Option<usize>,
    pub(crate) press_button: bool,
}

impl RecordingHost {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    pub(crate) fn click_foldout(&mut self, title: &str) {
        self.foldout_clicks.push(title.to_owned());
    }

    fn emit(&mut self, text: String) {
        match self.row.as_mut() {
            Some(row) => row.cells.push(text),
            None => self.lines.push(text),
        }
    }
}

impl RenderHost for RecordingHost {
    fn begin_horizontal(&mut self, style: GroupStyle) {
        self.row = Some(Row {
            boxed: style == GroupStyle::Boxed,
            cells: Vec::new(),
        });
    }

    fn end_horizontal(&mut self) {
        if let Some(row) = self.row.take() {
            let line = row.cells.join(" | ");
            self.lines
                .push(if row.boxed { format!("[box] {line}") } else { line });
        }
    }

    fn begin_vertical(&mut self, style: GroupStyle) {
        if style == GroupStyle::Boxed {
            self.lines.push("[box]".to_owned());
        }
        self.verticals.push(style);
    }

    fn end_vertical(&mut self) {
        if self.verticals.pop() == Some(GroupStyle::Boxed) {
            self.lines.push("[/box]".to_owned());
        }
    }

    fn begin_scroll(&mut self, position: ScrollPosition) -> ScrollPosition {
        self.scroll_to.unwrap_or(position)
    }

    fn end_scroll(&mut self) {}

    fn label(&mut self, text: &str, _width: Width) {
        self.emit(text.to_owned());
    }

    fn foldout(&mut self, expanded: bool, title: &str) -> bool {
        let expanded = if let Some(pos) = self.foldout_clicks.iter().position(|t| t == title) {
            self.foldout_clicks.remove(pos);
            !expanded
        } else {
            expanded
        };
        self.emit(format!("{} {title}", if expanded { "v" } else { ">" }));
        expanded
    }

    fn toolbar(&mut self, selected: usize, tabs: &[&str]) -> usize {
        let selected = self.toolbar_pick.take().unwrap_or(selected);
        let rendered: Vec<String> = tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                if index == selected {
                    format!("[{tab}]")
                } else {
                    (*tab).to_owned()
                }
            })
            .collect();
        self.emit(rendered.join(" "));
        selected
    }

    fn button(&mut self, text: &str) -> bool {
        self.emit(format!("({text})"));
        std::mem::take(&mut self.press_button)
    }
}

/// A source whose deliveries the test completes by hand.
#[derive(Default)]
pub(crate) struct ManualSource {
    pub(crate) requests: usize,
    pub(crate) deliveries: Vec<SnapshotDelivery>,
}

impl SnapshotSource for ManualSource {
    fn request_snapshot(&mut self) -> SnapshotTicket {
        self.requests += 1;
        let (delivery, ticket) = snapshot_channel();
        self.deliveries.push(delivery);
        ticket
    }
}
