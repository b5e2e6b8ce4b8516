//! Export testuali dei partecipanti confermati

use crate::dtos::AttendeeDTO;
use crate::entities::Audience;
use std::collections::HashSet;

/// Un indirizzo email per riga, senza ripetizioni per chi partecipa con entrambi i ruoli
pub fn emails(attendees: &[AttendeeDTO]) -> String {
    let mut seen = HashSet::new();
    attendees
        .iter()
        .filter(|a| seen.insert(a.email.as_str()))
        .map(|a| format!("{}\n", a.email))
        .collect()
}

/// Checklist da stampare: studenti e poi coach, una casella per persona
pub fn checklist(attendees: &[AttendeeDTO]) -> String {
    let mut out = String::new();
    for audience in [Audience::Student, Audience::Coach] {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(audience.heading());
        out.push('\n');
        for attendee in attendees.iter().filter(|a| a.role == audience) {
            out.push_str(&format!("[ ] {}\n", attendee.full_name()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(id: i64, name: &str, surname: &str, role: Audience) -> AttendeeDTO {
        AttendeeDTO {
            member_id: id,
            name: name.to_string(),
            surname: surname.to_string(),
            email: format!("{}.{}@example.com", name, surname).to_lowercase(),
            role,
        }
    }

    #[test]
    fn test_emails_one_per_line() {
        let attendees = vec![
            attendee(1, "Jane", "Doe", Audience::Student),
            attendee(2, "Maria", "Rossi", Audience::Coach),
        ];
        assert_eq!(
            emails(&attendees),
            "jane.doe@example.com\nmaria.rossi@example.com\n"
        );
        assert_eq!(emails(&[]), "");
    }

    #[test]
    fn test_emails_lists_each_address_once() {
        let attendees = vec![
            attendee(1, "Jane", "Doe", Audience::Student),
            attendee(1, "Jane", "Doe", Audience::Coach),
            attendee(2, "Maria", "Rossi", Audience::Coach),
        ];
        assert_eq!(
            emails(&attendees),
            "jane.doe@example.com\nmaria.rossi@example.com\n"
        );
        // la checklist invece la mostra in entrambe le sezioni
        assert_eq!(
            checklist(&attendees),
            "Students\n[ ] Jane Doe\n\nCoaches\n[ ] Jane Doe\n[ ] Maria Rossi\n"
        );
    }

    #[test]
    fn test_checklist_groups_by_role() {
        let attendees = vec![
            attendee(2, "Maria", "Rossi", Audience::Coach),
            attendee(1, "Jane", "Doe", Audience::Student),
        ];
        assert_eq!(
            checklist(&attendees),
            "Students\n[ ] Jane Doe\n\nCoaches\n[ ] Maria Rossi\n"
        );
    }
}
