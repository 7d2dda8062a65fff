/// A run summary: a heading followed by a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    heading: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Summary {
    pub fn new(heading: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Summary {
            heading: heading.into(),
            header,
            rows,
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render as the HTML GitHub shows on the run page
    pub fn to_html(&self) -> String {
        let mut html = format!("<h1>{}</h1>\n<table>", escape_html(&self.heading));

        html.push_str("<tr>");
        for cell in &self.header {
            html.push_str(&format!("<th>{}</th>", escape_html(cell)));
        }
        html.push_str("</tr>");

        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>");
        }

        html.push_str("</table>\n");
        html
    }

    /// Render as an aligned plain-text table
    pub fn to_text(&self) -> String {
        let columns = self.header.len();
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let padding = width.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(padding))
                })
                .collect();
            padded.join(" | ").trim_end().to_string()
        };

        let mut lines = vec![self.heading.clone(), format_row(&self.header)];
        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        lines.push(separator.join("-+-"));
        for row in &self.rows {
            lines.push(format_row(row));
        }

        lines.join("\n") + "\n"
    }
}
