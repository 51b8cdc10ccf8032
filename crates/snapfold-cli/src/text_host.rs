use snapfold_view::{GroupStyle, RenderHost, ScrollPosition, Width};

/// Which foldouts start open in a non-interactive render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expand {
    Nothing,
    All,
    Only(String),
}

impl Expand {
    fn opens(&self, title: &str) -> bool {
        match self {
            Self::Nothing => false,
            Self::All => true,
            Self::Only(name) => name == title,
        }
    }
}

struct Row {
    style: GroupStyle,
    cells: Vec<String>,
}

/// Renders one frame as plain text.
///
/// There is no user input, so the button never fires, foldouts follow
/// [`Expand`], and the toolbar reports the tab chosen on the command line.
pub struct TextHost {
    out: String,
    indent: usize,
    row: Option<Row>,
    verticals: Vec<GroupStyle>,
    expand: Expand,
    tab: Option<usize>,
}

impl TextHost {
    pub fn new(expand: Expand, tab: Option<usize>) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            row: None,
            verticals: Vec::new(),
            expand,
            tab,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn cell(&mut self, text: String) {
        match self.row.as_mut() {
            Some(row) => row.cells.push(text),
            None => self.line(&text),
        }
    }
}

impl RenderHost for TextHost {
    fn begin_horizontal(&mut self, style: GroupStyle) {
        self.row = Some(Row {
            style,
            cells: Vec::new(),
        });
    }

    fn end_horizontal(&mut self) {
        let Some(row) = self.row.take() else {
            return;
        };
        let text = match row.style {
            GroupStyle::Plain => row.cells.join("  "),
            GroupStyle::Boxed => format!("[ {} ]", row.cells.join(" | ")),
        };
        self.line(&text);
    }

    fn begin_vertical(&mut self, style: GroupStyle) {
        if style == GroupStyle::Boxed {
            self.indent += 2;
        }
        self.verticals.push(style);
    }

    fn end_vertical(&mut self) {
        if self.verticals.pop() == Some(GroupStyle::Boxed) {
            self.indent = self.indent.saturating_sub(2);
        }
    }

    fn begin_scroll(&mut self, position: ScrollPosition) -> ScrollPosition {
        position
    }

    fn end_scroll(&mut self) {}

    fn label(&mut self, text: &str, _width: Width) {
        self.cell(text.to_owned());
    }

    fn foldout(&mut self, expanded: bool, title: &str) -> bool {
        let expanded = expanded || self.expand.opens(title);
        let marker = if expanded { '▾' } else { '▸' };
        self.cell(format!("{marker} {title}"));
        expanded
    }

    fn toolbar(&mut self, selected: usize, tabs: &[&str]) -> usize {
        let selected = self.tab.unwrap_or(selected);
        let rendered: Vec<String> = tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                if index == selected {
                    format!("<{tab}>")
                } else {
                    (*tab).to_owned()
                }
            })
            .collect();
        self.cell(rendered.join(" "));
        selected
    }

    fn button(&mut self, _text: &str) -> bool {
        false
    }
}
