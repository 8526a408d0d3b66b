use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table with per-column alignment.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers = headers.into_iter().map(Into::into).collect::<Vec<String>>();
        let aligns = vec![Align::Left; headers.len()];
        Self {
            headers,
            aligns,
            rows: Vec::new(),
        }
    }

    /// Right-aligns the given columns, typically the numeric ones.
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        for &idx in columns {
            if let Some(align) = self.aligns.get_mut(idx) {
                *align = Align::Right;
            }
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths = self
            .headers
            .iter()
            .map(|h| display_width(h).max(1))
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", self.format_row(&self.headers, &widths));
        let separator = widths
            .iter()
            .map(|w| "-".repeat((*w).max(3)))
            .collect::<Vec<_>>();
        let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
        let _ = writeln!(output, "{}", self.format_row(&separator, &separator_widths));
        for row in &self.rows {
            let _ = writeln!(output, "{}", self.format_row(row, &widths));
        }
        output
    }

    fn format_row(&self, values: &[String], widths: &[usize]) -> String {
        let cells = values
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((value, &width), align)| {
                let sanitized = sanitize_cell(value);
                let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
                match align {
                    Align::Left => format!("{sanitized}{padding}"),
                    Align::Right => format!("{padding}{sanitized}"),
                }
            })
            .collect::<Vec<_>>();
        cells.join("  ").trim_end().to_string()
    }
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // skip ANSI escape sequence
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
