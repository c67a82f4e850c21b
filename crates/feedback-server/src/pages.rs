//! Server-rendered HTML for the form and thank-you pages.

use std::fmt::Write as _;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="/static/feedback.css">
"#;

/// Escape text for safe inclusion in HTML element content and attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// The feedback form, optionally with an error banner above it.
#[must_use]
pub fn feedback_form(max_message_length: usize, error: Option<&str>) -> String {
    let mut html = String::from(HEAD);
    html.push_str("<title>Share your feedback</title>\n</head>\n<body>\n<main>\n");
    html.push_str("<h1>How was your experience?</h1>\n");

    if let Some(error) = error {
        let _ = writeln!(
            html,
            r#"<p class="error" role="alert">{}</p>"#,
            escape_html(error)
        );
    }

    let _ = write!(
        html,
        r#"<form method="post" action="/submit">
<fieldset>
<legend>Sentiment</legend>
<label><input type="radio" name="sentiment" value="positive" required> Positive</label>
<label><input type="radio" name="sentiment" value="negative"> Negative</label>
</fieldset>
<label for="message">Message (optional, up to {max_message_length} characters)</label>
<textarea id="message" name="message" rows="5" maxlength="{max_message_length}"></textarea>
<button type="submit">Send feedback</button>
</form>
"#
    );

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[must_use]
pub fn thanks() -> String {
    let mut html = String::from(HEAD);
    html.push_str(
        "<title>Thank you</title>\n</head>\n<body>\n<main>\n\
         <h1>Thank you!</h1>\n\
         <p>Your feedback has been recorded.</p>\n\
         <p><a href=\"/\">Send more feedback</a></p>\n\
         </main>\n</body>\n</html>\n",
    );
    html
}
