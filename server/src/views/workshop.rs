//! Pagine dei workshop: lista per capitolo, dettaglio, form e scelta del pubblico da invitare

use super::{error_explanation, escape, humanize_date, layout, time_range};
use crate::core::flash::Flash;
use crate::dtos::{InvitationSummary, WorkshopForm};
use crate::entities::{Audience, Chapter, Member, Sponsor, Workshop, WorkshopInvitation};
use axum::response::Html;

/// Dati necessari alla pagina di dettaglio
pub struct WorkshopPage {
    pub workshop: Workshop,
    pub chapter: Chapter,
    pub host: Option<Sponsor>,
    pub sponsors: Vec<Sponsor>,
    pub summary: InvitationSummary,
    pub invitations: Vec<(WorkshopInvitation, Member)>,
}

/// Dati del form di creazione/modifica
pub struct WorkshopFormPage<'a> {
    pub title: &'a str,
    pub action: String,
    pub form: &'a WorkshopForm,
    pub errors: &'a [String],
    pub chapters: &'a [Chapter],
    pub sponsors: &'a [Sponsor],
}

pub fn workshop_path(workshop_id: i64) -> String {
    format!("/admin/workshops/{workshop_id}")
}

pub fn index(chapter: &Chapter, workshops: &[Workshop], flash: Option<Flash>) -> Html<String> {
    let rows: String = workshops
        .iter()
        .map(|w| {
            format!(
                r#"<tr id="workshop_{id}"><td><a href="{path}">{date}</a></td><td>{time}</td><td><a href="{path}/edit">Edit</a></td></tr>"#,
                id = w.workshop_id,
                path = workshop_path(w.workshop_id),
                date = humanize_date(&w.date_and_time, true),
                time = time_range(&w.date_and_time, w.ends_at.as_ref()),
            )
        })
        .collect();

    let body = if workshops.is_empty() {
        "<p>There are no workshops for this chapter yet.</p>".to_string()
    } else {
        format!(
            r#"<table id="workshops"><thead><tr><th>Date</th><th>Time</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
        )
    };

    layout(
        &format!("{} workshops", chapter.name),
        flash,
        &format!(r#"{body}<p><a href="/admin/workshops/new">New workshop</a></p>"#),
    )
}

pub fn show(page: &WorkshopPage, flash: Option<Flash>) -> Html<String> {
    let path = workshop_path(page.workshop.workshop_id);

    let host = match &page.host {
        Some(host) => format!("<p>{}</p>", escape(&host.name)),
        None => "<p>No host assigned</p>".to_string(),
    };

    let sponsors = if page.sponsors.is_empty() {
        "<p>No sponsors assigned</p>".to_string()
    } else {
        let items: String = page
            .sponsors
            .iter()
            .map(|s| format!("<li>{}</li>", escape(&s.name)))
            .collect();
        format!("<ul>{items}</ul>")
    };

    let description = page
        .workshop
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="description">{}</p>"#, escape(d)))
        .unwrap_or_default();

    let invitations: String = page
        .invitations
        .iter()
        .map(|(invitation, member)| invitation_row(&path, invitation, member))
        .collect();

    let body = format!(
        r#"<p class="chapter">{chapter}</p>
<p class="date">{date}</p>
<p class="time">{time}</p>
{description}
<section id="host"><h2>Host</h2>{host}</section>
<section id="sponsors"><h2>Sponsors</h2>{sponsors}</section>
<section id="attendance">
<h2>Invitations</h2>
<p>{attending} attending, {pending} pending, {declined} declined</p>
<table><tbody>{invitations}</tbody></table>
</section>
<ul class="actions">
<li><a href="{path}/send_invites">Invite</a></li>
<li><a href="{path}/edit">Edit</a></li>
<li><a href="{path}/attendees/emails.txt">Attendee emails</a></li>
<li><a href="{path}/attendees/checklist.txt">Attendee checklist</a></li>
<li><a href="/admin/chapters/{chapter_id}/workshops">All {chapter} workshops</a></li>
</ul>"#,
        chapter = escape(&page.chapter.name),
        chapter_id = page.chapter.chapter_id,
        date = humanize_date(&page.workshop.date_and_time, false),
        time = time_range(&page.workshop.date_and_time, page.workshop.ends_at.as_ref()),
        attending = page.summary.attending,
        pending = page.summary.pending,
        declined = page.summary.declined,
    );

    layout("Workshop", flash, &body)
}

fn invitation_row(path: &str, invitation: &WorkshopInvitation, member: &Member) -> String {
    format!(
        r#"<tr id="invitation_{id}"><td>{name}</td><td>{role}</td><td>{status}</td><td><form method="post" action="{path}/invitations/{id}"><select name="status"><option value="attending">attending</option><option value="declined">declined</option><option value="pending">pending</option></select><button type="submit">Update</button></form></td></tr>"#,
        id = invitation.invitation_id,
        name = escape(&member.full_name()),
        role = invitation.role,
        status = invitation.status,
    )
}

fn chapter_select(form: &WorkshopForm, chapters: &[Chapter]) -> String {
    let selected = form.chapter_id.as_deref().unwrap_or_default();
    let options: String = chapters
        .iter()
        .map(|c| {
            let id = c.chapter_id.to_string();
            format!(
                r#"<option value="{id}"{sel}>{name}</option>"#,
                sel = if id == selected { " selected" } else { "" },
                name = escape(&c.name),
            )
        })
        .collect();

    format!(
        r#"<label for="workshop_chapter_id">Chapter</label>
<select id="workshop_chapter_id" name="chapter_id"><option value=""></option>{options}</select>"#
    )
}

fn sponsor_selects(form: &WorkshopForm, sponsors: &[Sponsor]) -> String {
    let host = form.host_id.as_deref().unwrap_or_default();
    let selected_sponsors = form.sponsor_ids.clone().unwrap_or_default();

    let host_options: String = sponsors
        .iter()
        .map(|s| {
            let id = s.sponsor_id.to_string();
            format!(
                r#"<option value="{id}"{sel}>{name}</option>"#,
                sel = if id == host { " selected" } else { "" },
                name = escape(&s.name),
            )
        })
        .collect();

    let sponsor_options: String = sponsors
        .iter()
        .map(|s| {
            let id = s.sponsor_id.to_string();
            format!(
                r#"<option value="{id}"{sel}>{name}</option>"#,
                sel = if selected_sponsors.contains(&id) { " selected" } else { "" },
                name = escape(&s.name),
            )
        })
        .collect();

    // l'input nascosto rende esplicito l'insieme vuoto quando non si seleziona nulla
    format!(
        r#"<label for="workshop_host">Host</label>
<select id="workshop_host" name="host_id"><option value=""></option>{host_options}</select>
<label for="workshop_sponsor_ids">Sponsors</label>
<input type="hidden" name="sponsor_ids" value="">
<select id="workshop_sponsor_ids" name="sponsor_ids" multiple>{sponsor_options}</select>"#
    )
}

pub fn form(page: &WorkshopFormPage) -> Html<String> {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());

    let body = format!(
        r#"{errors}
<form id="workshop_form" method="post" action="{action}">
{chapter_select}
<label for="workshop_date">Date</label>
<input type="date" id="workshop_date" name="date" value="{date}">
<label for="workshop_begins_at">Begins at</label>
<input type="time" id="workshop_begins_at" name="begins_at" value="{begins_at}">
<label for="workshop_ends_at">Ends at</label>
<input type="time" id="workshop_ends_at" name="ends_at" value="{ends_at}">
<label for="workshop_description">Description</label>
<textarea id="workshop_description" name="description">{description}</textarea>
{sponsor_selects}
<button type="submit">Save</button>
</form>"#,
        errors = error_explanation(page.errors),
        action = escape(&page.action),
        chapter_select = chapter_select(page.form, page.chapters),
        date = value(&page.form.date),
        begins_at = value(&page.form.begins_at),
        ends_at = value(&page.form.ends_at),
        description = value(&page.form.description),
        sponsor_selects = sponsor_selects(page.form, page.sponsors),
    );

    layout(page.title, None, &body)
}

/// Scelta del pubblico: un pulsante per studenti e uno per coach
pub fn send_invites(workshop: &Workshop, chapter: &Chapter) -> Html<String> {
    let path = workshop_path(workshop.workshop_id);
    let buttons: String = [Audience::Student, Audience::Coach]
        .iter()
        .map(|audience| {
            format!(
                r#"<form method="post" action="{path}/invite/{plural}"><button type="submit">{heading}</button></form>"#,
                plural = audience.plural(),
                heading = audience.heading(),
            )
        })
        .collect();

    let body = format!(
        r#"<p>{chapter} workshop on {date}</p>
<p>Send invitations to the members subscribed to {chapter}:</p>
{buttons}
<p><a href="{path}">Back to workshop</a></p>"#,
        chapter = escape(&chapter.name),
        date = humanize_date(&workshop.date_and_time, true),
    );

    layout("Send invitations", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn chapter() -> Chapter {
        Chapter {
            chapter_id: 1,
            name: "London".to_string(),
            city: None,
            email: None,
        }
    }

    fn workshop() -> Workshop {
        Workshop {
            workshop_id: 9,
            chapter_id: 1,
            date_and_time: Utc.with_ymd_and_hms(2026, 10, 17, 11, 30, 0).unwrap(),
            ends_at: Some(Utc.with_ymd_and_hms(2026, 10, 17, 12, 45, 0).unwrap()),
            host_id: Some(1),
            description: None,
        }
    }

    #[test]
    fn test_show_renders_regions_and_invite_action() {
        let page = WorkshopPage {
            workshop: workshop(),
            chapter: chapter(),
            host: Some(Sponsor {
                sponsor_id: 1,
                name: "Acme <Corp>".to_string(),
                website: None,
            }),
            sponsors: vec![],
            summary: InvitationSummary::default(),
            invitations: vec![],
        };

        let Html(html) = show(&page, None);
        assert!(html.contains(r#"<section id="host"><h2>Host</h2><p>Acme &lt;Corp&gt;</p></section>"#));
        assert!(html.contains("No sponsors assigned"));
        assert!(html.contains("11:30 - 12:45"));
        assert!(html.contains(r#"<a href="/admin/workshops/9/send_invites">Invite</a>"#));
    }

    #[test]
    fn test_form_keeps_selected_values() {
        let form_values = WorkshopForm {
            chapter_id: Some("1".to_string()),
            host_id: Some("2".to_string()),
            sponsor_ids: Some(vec!["2".to_string()]),
            ..Default::default()
        };
        let sponsors = vec![
            Sponsor {
                sponsor_id: 1,
                name: "Acme Corp".to_string(),
                website: None,
            },
            Sponsor {
                sponsor_id: 2,
                name: "Globex".to_string(),
                website: None,
            },
        ];

        let Html(html) = form(&WorkshopFormPage {
            title: "Edit workshop",
            action: "/admin/workshops/9".to_string(),
            form: &form_values,
            errors: &[],
            chapters: &[chapter()],
            sponsors: &sponsors,
        });

        assert!(html.contains(r#"<option value="1" selected>London</option>"#));
        assert!(html.contains(r#"<select id="workshop_host" name="host_id"><option value=""></option><option value="1">Acme Corp</option><option value="2" selected>Globex</option></select>"#));
        assert!(!html.contains("error_explanation"));
    }
}
