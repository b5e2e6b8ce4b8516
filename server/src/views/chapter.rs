//! Directory dei capitoli

use super::{error_explanation, escape, layout};
use crate::core::flash::Flash;
use crate::dtos::ChapterForm;
use crate::entities::Chapter;
use axum::response::Html;

pub fn index(
    chapters: &[Chapter],
    form: &ChapterForm,
    errors: &[String],
    flash: Option<Flash>,
) -> Html<String> {
    let rows: String = chapters
        .iter()
        .map(|c| {
            format!(
                r#"<tr id="chapter_{id}"><td><a href="/admin/chapters/{id}/workshops">{name}</a></td><td>{city}</td><td>{email}</td><td><form method="post" action="/admin/chapters/{id}/delete"><button type="submit">Delete</button></form></td></tr>"#,
                id = c.chapter_id,
                name = escape(&c.name),
                city = escape(c.city.as_deref().unwrap_or_default()),
                email = escape(c.email.as_deref().unwrap_or_default()),
            )
        })
        .collect();

    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());
    let body = format!(
        r#"<table id="chapters"><tbody>{rows}</tbody></table>
<h2>New chapter</h2>
{errors}
<form id="chapter_form" method="post" action="/admin/chapters">
<label for="chapter_name">Name</label>
<input type="text" id="chapter_name" name="name" value="{name}">
<label for="chapter_city">City</label>
<input type="text" id="chapter_city" name="city" value="{city}">
<label for="chapter_email">Email</label>
<input type="email" id="chapter_email" name="email" value="{email}">
<button type="submit">Create chapter</button>
</form>"#,
        errors = error_explanation(errors),
        name = value(&form.name),
        city = value(&form.city),
        email = value(&form.email),
    );

    layout("Chapters", flash, &body)
}
