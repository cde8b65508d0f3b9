//! HTML body rendering for the digest email.

use crate::record::MovieRecord;

/// Renders the digest body: one document, one table, a fixed four-column
/// header row, and one row per record. The link column renders as a
/// hyperlink with fixed anchor text rather than the raw URL.
///
/// Zero records still produce a well-formed table with only the header row.
#[must_use]
pub fn render_body(records: &[MovieRecord]) -> String {
    let mut html = String::from(
        "<html>\n<body>\n<h2>Top IMDb Movies</h2>\n\
         <table border=\"1\" style=\"border-collapse: collapse; width: 100%;\">\n\
         <tr>\n\
         <th style=\"width: 40%;\">Title</th>\n\
         <th style=\"width: 15%;\">Year</th>\n\
         <th style=\"width: 15%;\">Rating</th>\n\
         <th style=\"width: 30%;\">Link</th>\n\
         </tr>\n",
    );
    for record in records {
        html.push_str("<tr>\n");
        html.push_str(&format!("<td>{}</td>\n", escape(&record.title)));
        html.push_str(&format!("<td>{}</td>\n", escape(&record.year)));
        html.push_str(&format!("<td>{}</td>\n", escape(&record.rating)));
        html.push_str(&format!(
            "<td><a href=\"{}\">IMDb Page</a></td>\n",
            escape(&record.link)
        ));
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Minimal HTML escaping for text interpolated into the table.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
