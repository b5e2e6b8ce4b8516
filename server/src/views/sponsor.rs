//! Directory degli sponsor

use super::{error_explanation, escape, layout};
use crate::core::flash::Flash;
use crate::dtos::SponsorForm;
use crate::entities::Sponsor;
use axum::response::Html;

pub fn index(
    sponsors: &[Sponsor],
    form: &SponsorForm,
    errors: &[String],
    flash: Option<Flash>,
) -> Html<String> {
    let rows: String = sponsors
        .iter()
        .map(|s| {
            let website = s
                .website
                .as_deref()
                .map(|w| format!(r#"<a href="{url}">{url}</a>"#, url = escape(w)))
                .unwrap_or_default();
            format!(
                r#"<tr id="sponsor_{}"><td>{}</td><td>{website}</td></tr>"#,
                s.sponsor_id,
                escape(&s.name),
            )
        })
        .collect();

    let body = format!(
        r#"<table id="sponsors"><tbody>{rows}</tbody></table>
<h2>New sponsor</h2>
{errors}
<form id="sponsor_form" method="post" action="/admin/sponsors">
<label for="sponsor_name">Name</label>
<input type="text" id="sponsor_name" name="name" value="{name}">
<label for="sponsor_website">Website</label>
<input type="url" id="sponsor_website" name="website" value="{website}">
<button type="submit">Create sponsor</button>
</form>"#,
        errors = error_explanation(errors),
        name = escape(form.name.as_deref().unwrap_or_default()),
        website = escape(form.website.as_deref().unwrap_or_default()),
    );

    layout("Sponsors", flash, &body)
}
