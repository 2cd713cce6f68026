//! HTML rendering for the upload form.
//!
//! One page, rendered inline; the crate carries no template engine.

use crate::utils::formats::OUTPUT_EXTENSIONS;

/// Render the upload form, with an optional flash message and the size cap
/// surfaced to the user.
pub fn index_page(flash: Option<&str>, max_upload_mib: usize) -> String {
    let flash_html = match flash {
        Some(message) => format!(
            r#"<p class="flash">{}</p>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let options: String = OUTPUT_EXTENSIONS
        .iter()
        .map(|ext| format!(r#"<option value="{ext}">{}</option>"#, ext.to_uppercase()))
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Image Converter</title>
<style>
body {{ font-family: sans-serif; max-width: 36rem; margin: 3rem auto; padding: 0 1rem; }}
.flash {{ background: #fff3cd; border: 1px solid #ffe69c; padding: .6rem .8rem; border-radius: .25rem; }}
label {{ display: block; margin: 1rem 0 .25rem; }}
.hint {{ color: #666; font-size: .85rem; }}
</style>
</head>
<body>
<h1>Image Converter</h1>
{flash_html}
<form action="/convert" method="post" enctype="multipart/form-data">
<label for="file">Image file</label>
<input id="file" type="file" name="file" required>
<label for="output_format">Output format</label>
<select id="output_format" name="output_format">{options}</select>
<p><button type="submit">Convert</button></p>
</form>
<p class="hint">Supported inputs: HEIC, JPG, JPEG, PNG, BMP, TIFF, GIF &middot; max {max_upload_mib}MB</p>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
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
