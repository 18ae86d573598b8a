//! Inquiry form.

use std::fmt::Write as _;

use super::html_escape;
use crate::models::ContactForm;

/// Renders the inquiry form with labels, placeholders and package options
/// taken from `form`.
pub fn render_contact_form(output: &mut String, form: &ContactForm) {
    output.push_str("<form class=\"contact-form\" method=\"get\" action=\"#contact\">\n");

    output.push_str("<div class=\"row\">\n");
    let _ = writeln!(
        output,
        "<div><label for=\"name\">{}</label>\
         <input id=\"name\" name=\"name\" placeholder=\"{}\" required></div>",
        html_escape(&form.name_label),
        html_escape(&form.name_placeholder)
    );
    let _ = writeln!(
        output,
        "<div><label for=\"phone\">{}</label>\
         <input id=\"phone\" name=\"phone\" type=\"tel\" placeholder=\"{}\" required></div>",
        html_escape(&form.phone_label),
        html_escape(&form.phone_placeholder)
    );
    output.push_str("</div>\n");

    let _ = writeln!(
        output,
        "<div><label for=\"package\">{}</label><select id=\"package\" name=\"package\">",
        html_escape(&form.package_label)
    );
    let _ = writeln!(
        output,
        "<option value=\"\" disabled selected>{}</option>",
        html_escape(&form.package_placeholder)
    );
    for package in &form.packages {
        let _ = writeln!(
            output,
            "<option value=\"{}\">{}</option>",
            html_escape(&package.value),
            html_escape(&package.label)
        );
    }
    output.push_str("</select></div>\n");

    let _ = writeln!(
        output,
        "<div><label for=\"message\">{}</label>\
         <textarea id=\"message\" name=\"message\" rows=\"4\" placeholder=\"{}\"></textarea></div>",
        html_escape(&form.message_label),
        html_escape(&form.message_placeholder)
    );

    let _ = writeln!(
        output,
        "<button type=\"submit\">{}</button>",
        html_escape(&form.submit_button)
    );
    output.push_str("</form>\n");
}
