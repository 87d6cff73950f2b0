//! CSV-like tables: newline-separated rows, comma-separated cells

use crate::render::escape::push_escaped;

/// First row becomes header cells; blank input renders nothing
pub fn render_table(content: &str) -> String {
    let rows: Vec<Vec<&str>> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(str::trim).collect())
        .collect();

    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut out = String::from("<table class=\"content-table\"><thead><tr>");
    for cell in header {
        out.push_str("<th>");
        push_escaped(&mut out, cell);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in body {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            push_escaped(&mut out, cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}
