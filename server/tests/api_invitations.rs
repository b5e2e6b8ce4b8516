//! Integration tests per l'invio degli inviti
//!
//! Test per:
//! - GET /admin/workshops/{id}/send_invites
//! - POST /admin/workshops/{id}/invite/{audience}
//! - POST /admin/workshops/{id}/invitations/{invitation_id}

mod common;

#[cfg(test)]
mod invitation_tests {
    use super::common::*;
    use axum_test::http::{HeaderName, StatusCode};
    use planner::mailer::RecordingTransport;
    use sqlx::SqlitePool;
    use std::sync::Arc;

    async fn pending_invitations(pool: &SqlitePool, workshop_id: i64) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM workshop_invitations WHERE workshop_id = ? AND status = 'pending'",
        )
        .bind(workshop_id)
        .fetch_one(pool)
        .await
        .expect("count invitations")
    }

    async fn unsent_invitations(pool: &SqlitePool, workshop_id: i64) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM workshop_invitations WHERE workshop_id = ? AND emailed_at IS NULL",
        )
        .bind(workshop_id)
        .fetch_one(pool)
        .await
        .expect("count unsent invitations")
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members", "chapters", "sponsors", "workshops")))]
    async fn test_send_invites_page(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/admin/workshops/2/send_invites")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains(r#"action="/admin/workshops/2/invite/students"><button type="submit">Students</button>"#));
        assert!(html.contains(r#"action="/admin/workshops/2/invite/coaches"><button type="submit">Coaches</button>"#));
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("members", "chapters", "sponsors", "workshops", "subscriptions")
    ))]
    async fn test_invite_students(pool: SqlitePool) -> sqlx::Result<()> {
        let transport = Arc::new(RecordingTransport::new());
        let server = create_test_server(create_test_state_with_transport(pool.clone(), transport.clone()));

        let response = server
            .post("/admin/workshops/2/invite/students")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location").to_str().unwrap(), "/admin/workshops/2");
        assert!(
            response
                .header("set-cookie")
                .to_str()
                .unwrap()
                .starts_with("flash=student_invites")
        );

        let show = server
            .get("/admin/workshops/2")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .add_header(HeaderName::from_static("cookie"), "flash=student_invites")
            .await;
        assert!(show.text().contains("Invitations to students are being emailed out"));

        // il worker invita i due studenti iscritti a London
        assert_eq!(wait_for_deliveries(&transport, 2).await, 2);
        let recipients: Vec<String> = transport.delivered().into_iter().map(|m| m.to).collect();
        assert_eq!(recipients, vec!["jane.doe@example.com", "john.smith@example.com"]);
        assert_eq!(pending_invitations(&pool, 2).await, 2);
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("members", "chapters", "sponsors", "workshops", "subscriptions")
    ))]
    async fn test_invite_coaches_twice_does_not_duplicate(pool: SqlitePool) -> sqlx::Result<()> {
        let transport = Arc::new(RecordingTransport::new());
        let server = create_test_server(create_test_state_with_transport(pool.clone(), transport.clone()));

        for _ in 0..2 {
            server
                .post("/admin/workshops/3/invite/coaches")
                .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
                .await
                .assert_status(StatusCode::SEE_OTHER);
        }

        assert_eq!(wait_for_deliveries(&transport, 2).await, 2);
        // i job sono processati in ordine: il secondo non trova nuovi destinatari
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(transport.delivered().len(), 2);
        assert_eq!(pending_invitations(&pool, 3).await, 2);
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("members", "chapters", "sponsors", "workshops", "subscriptions")
    ))]
    async fn test_failed_deliveries_are_resent_on_next_dispatch(pool: SqlitePool) -> sqlx::Result<()> {
        let failing = Arc::new(RecordingTransport::failing());
        let server = create_test_server(create_test_state_with_transport(pool.clone(), failing.clone()));

        let response = server
            .post("/admin/workshops/2/invite/students")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .await;

        // la richiesta viene confermata anche se il trasporto rifiuta le email
        response.assert_status(StatusCode::SEE_OTHER);
        assert!(
            response
                .header("set-cookie")
                .to_str()
                .unwrap()
                .starts_with("flash=student_invites")
        );
        assert_eq!(wait_for_attempts(&failing, 2).await, 2);
        assert!(failing.delivered().is_empty());
        assert_eq!(pending_invitations(&pool, 2).await, 2);
        assert_eq!(unsent_invitations(&pool, 2).await, 2);

        let transport = Arc::new(RecordingTransport::new());
        let server = create_test_server(create_test_state_with_transport(pool.clone(), transport.clone()));
        server
            .post("/admin/workshops/2/invite/students")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .await
            .assert_status(StatusCode::SEE_OTHER);

        assert_eq!(wait_for_deliveries(&transport, 2).await, 2);
        let recipients: Vec<String> = transport.delivered().into_iter().map(|m| m.to).collect();
        assert_eq!(recipients, vec!["jane.doe@example.com", "john.smith@example.com"]);
        assert_eq!(pending_invitations(&pool, 2).await, 2);
        // mark_emailed avviene dopo la consegna: attende che il worker lo registri
        for _ in 0..50 {
            if unsent_invitations(&pool, 2).await == 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(unsent_invitations(&pool, 2).await, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members", "chapters", "sponsors", "workshops")))]
    async fn test_invite_unknown_audience(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/admin/workshops/2/invite/sponsors")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members", "chapters", "sponsors", "workshops")))]
    async fn test_invite_other_chapter_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/admin/workshops/2/invite/students")
            .add_header(HeaderName::from_static("authorization"), bearer(LOCAL_ORGANISER))
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    // ============================================================
    // Test per POST /admin/workshops/{id}/invitations/{invitation_id}
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("members", "chapters", "sponsors", "workshops", "invitations")
    ))]
    async fn test_record_response(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let response = server
            .post("/admin/workshops/1/invitations/5")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .form(&[("status", "attending")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let status: String =
            sqlx::query_scalar("SELECT status FROM workshop_invitations WHERE invitation_id = 5")
                .fetch_one(&pool)
                .await?;
        assert_eq!(status, "attending");
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("members", "chapters", "sponsors", "workshops", "invitations")
    ))]
    async fn test_record_response_for_other_workshop(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // l'invito 6 appartiene al workshop 6
        let response = server
            .post("/admin/workshops/1/invitations/6")
            .add_header(HeaderName::from_static("authorization"), bearer(ORGANISER))
            .form(&[("status", "attending")])
            .await;

        response.assert_status_not_found();
        Ok(())
    }
}
