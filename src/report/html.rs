use crate::models::{FullReport, VersionStatus};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:2em}\
th,td{border:1px solid #ccc;padding:.3em .8em;text-align:left}\
.in_sync{color:#1a7f37}.drift{color:#cf222e}.unknown{color:#9a6700}";

/// Render the dependency page. `deps` is the full report of one check.
pub fn render(deps: &FullReport) -> String {
    let mut body = String::new();

    for ecosystem in &deps.ecosystems {
        body.push_str(&format!("<h2>{}</h2>", escape(&ecosystem.ecosystem.to_string())));

        if ecosystem.records.is_empty() {
            body.push_str("<p>No dependent projects.</p>");
            continue;
        }

        body.push_str(
            "<table><tr><th>Project</th><th>Dependency</th><th>Expected</th><th>Is</th><th>Current</th><th>Status</th></tr>",
        );
        for record in &ecosystem.records {
            let status = record.status();
            body.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                css_class(status),
                escape(&record.name),
                escape(&record.dependency),
                escape(record.expected.as_deref().unwrap_or("-")),
                escape(record.is.as_deref().unwrap_or("-")),
                escape(record.current.as_deref().unwrap_or("-")),
                status
            ));
        }
        body.push_str("</table>");
    }

    page(&body)
}

/// Page shown when the check could not complete.
pub fn render_error(message: &str) -> String {
    page(&format!("<p class=\"drift\">{}</p>", escape(message)))
}

fn page(body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Kit dependencies</title>\
<style>{STYLE}</style></head><body><h1>Kit dependencies</h1>{body}</body></html>"
    )
}

fn css_class(status: VersionStatus) -> &'static str {
    match status {
        VersionStatus::InSync => "in_sync",
        VersionStatus::Drift => "drift",
        VersionStatus::Unknown => "unknown",
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
