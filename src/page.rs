//! HTML rendering of a [`Page`].

use std::fmt::Write;

use crate::dashboard::{CityReport, Content, Page, Sidebar};

const CHART_SIZE: (u32, u32) = (900, 420);

const STYLE: &str = "\
body{margin:0;display:flex;font-family:-apple-system,'Segoe UI',sans-serif;color:#262730}\
aside{width:260px;min-height:100vh;padding:24px;background:#f0f2f6;box-sizing:border-box}\
main{flex:1;padding:32px 48px}\
select{width:100%;padding:6px}\
.metric-label{font-size:14px;color:#555}\
.metric-value{font-size:40px;font-weight:600}\
table{border-collapse:collapse;width:700px;max-width:100%}\
th,td{border:1px solid #ddd;padding:4px 10px;text-align:left}\
td.num{text-align:right}\
.error{padding:16px;border-radius:6px;background:#ffe5e5;color:#9b1c1c}\
figure{margin:24px 0}\
footer{margin-top:24px;font-size:12px;color:#888}";

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(page: &Page) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&page.sidebar.title));
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");

    render_sidebar(&mut html, &page.sidebar);

    html.push_str("<main>\n");
    match &page.content {
        Content::Success(report) => render_report(&mut html, report),
        Content::Failure { message } => {
            let _ = writeln!(html, "<div class=\"error\" role=\"alert\">{}</div>", escape(message));
        }
    }
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, sidebar: &Sidebar) {
    html.push_str("<aside>\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&sidebar.title));
    let _ = writeln!(html, "<h2>{}</h2>", escape(&sidebar.prompt));

    html.push_str("<form method=\"get\" action=\"/\">\n");
    let _ = writeln!(html, "<label for=\"city\">{}</label>", escape(&sidebar.selector_label));
    html.push_str("<select id=\"city\" name=\"city\" onchange=\"this.form.submit()\">\n");
    for city in &sidebar.cities {
        let selected = if *city == sidebar.selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(city),
            selected
        );
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Show</button></noscript>\n</form>\n");

    let _ = writeln!(html, "<h2>{}</h2>", escape(&sidebar.note_heading));
    let _ = writeln!(html, "<p>{}</p>", escape(&sidebar.note));
    let _ = writeln!(
        html,
        "<p><a href=\"{}\">{}</a></p>",
        escape(&sidebar.link.href),
        escape(&sidebar.link.text)
    );
    html.push_str("</aside>\n");
}

fn render_report(html: &mut String, report: &CityReport) {
    let _ = writeln!(html, "<h1>{}</h1>", escape(&report.title));
    let _ = writeln!(
        html,
        "<div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>",
        escape(&report.metric.label),
        escape(&report.metric.value.to_string())
    );

    let _ = writeln!(html, "<h3>{}</h3>", escape(&report.table_heading));
    html.push_str("<table>\n<thead><tr><th></th><th>Concentration</th></tr></thead>\n<tbody>\n");
    for row in &report.table {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
            escape(&row.label),
            row.concentration
        );
    }
    html.push_str("</tbody>\n</table>\n");

    match report.chart.to_svg(CHART_SIZE) {
        Ok(Some(svg)) => {
            let _ = writeln!(html, "<figure class=\"chart\">{}</figure>", svg);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("failed to draw chart for {}: {}", report.city, e),
    }

    let _ = writeln!(html, "<h3>{}</h3>", escape(&report.details.heading));
    html.push_str("<details>\n");
    let _ = writeln!(html, "<summary>{}</summary>", escape(&report.details.caption));
    for line in &report.details.lines {
        let _ = writeln!(html, "<p>{}</p>", escape(line));
    }
    html.push_str("</details>\n");

    let _ = writeln!(
        html,
        "<footer>Fetched at {}</footer>",
        report.fetched_at.format("%Y-%m-%d %H:%M:%S %Z")
    );
}
