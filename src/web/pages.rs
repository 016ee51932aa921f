//! HTML rendering for the form pages

/// Escape text for use inside HTML element content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const FORM: &str = r#"<form method="post" action="/">
  <label>Length <input type="number" name="length" min="1" max="62" value="12" required></label>
  <fieldset>
    <legend>Character sets</legend>
    <label><input type="checkbox" name="sets" value="digits" checked> Digits (0-9)</label>
    <label><input type="checkbox" name="sets" value="lower" checked> Lowercase (a-z)</label>
    <label><input type="checkbox" name="sets" value="upper" checked> Uppercase (A-Z)</label>
  </fieldset>
  <button type="submit">Generate</button>
</form>"#;

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Unique Password Generator</title>\n</head>\n<body>\n\
         <h1>Unique Password Generator</h1>\n{}\n{}\n</body>\n</html>\n",
        body, FORM
    )
}

pub fn form_page() -> String {
    layout("")
}

pub fn result_page(password: &str) -> String {
    layout(&format!(
        "<p>Your password:</p>\n<pre class=\"password\">{}</pre>",
        escape(password)
    ))
}

pub fn error_page(message: &str) -> String {
    layout(&format!("<p class=\"error\">{}</p>", escape(message)))
}
