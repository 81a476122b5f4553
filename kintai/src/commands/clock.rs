use anyhow::Result;
use freee_hr::domain::{ClockType, TimeClockRequest};

use super::Context;
use crate::{console::Console, error::KintaiError, labels, time_utils, token};

pub async fn run(ctx: &Context, console: &mut dyn Console, clock_type: ClockType) -> Result<()> {
    let scope = ctx.employee_scope()?;
    let client = token::authorized_client(ctx).await?;

    let label = labels::clock_label(&clock_type).to_string();
    let request = TimeClockRequest {
        company_id: scope.company_id,
        clock_type,
        base_date: ctx.today,
    };

    match client.submit_time_clock(scope.employee_id, &request).await {
        Ok(response) => {
            let clock_time = response
                .datetime
                .as_deref()
                .map(time_utils::format_clock_time)
                .unwrap_or_default();
            console.print(&format!("✓ {}打刻完了: {}", label, clock_time));
            Ok(())
        }
        Err(e) => Err(KintaiError::ClockFailed {
            label,
            message: e.message(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        console::ScriptedConsole,
        testing::{seed_ready_user, test_context, write_config, write_token, MockServer, REFRESHED},
    };

    #[tokio::test]
    async fn test_clock_in_success_prints_time() {
        let server = MockServer::start(&[
            (200, REFRESHED),
            (201, r#"{"datetime": "2024-05-01T08:59:59Z"}"#),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        seed_ready_user(dir.path());
        let ctx = test_context(dir.path(), &server.base_url());
        let mut console = ScriptedConsole::default();

        run(&ctx, &mut console, ClockType::ClockIn).await.unwrap();

        assert_eq!(console.output, vec!["✓ 出勤打刻完了: 08:59:59"]);

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].path(), "/hr/api/v1/employees/200/time_clocks");
        assert_eq!(requests[1].header("authorization"), Some("Bearer new-access"));
        assert_eq!(
            requests[1].json(),
            json!({"company_id": 100, "type": "clock_in", "base_date": "2024-05-02"})
        );
    }

    #[tokio::test]
    async fn test_clock_rejection_reports_provider_message() {
        let server = MockServer::start(&[
            (200, REFRESHED),
            (422, r#"{"message": "already clocked in"}"#),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        seed_ready_user(dir.path());
        let ctx = test_context(dir.path(), &server.base_url());
        let mut console = ScriptedConsole::default();

        let err = run(&ctx, &mut console, ClockType::ClockIn)
            .await
            .unwrap_err();

        let err = err.downcast_ref::<KintaiError>().unwrap();
        assert!(err.is_report());
        assert_eq!(err.to_string(), "✗ 出勤打刻失敗: already clocked in");
        assert!(console.output.is_empty());
    }

    #[tokio::test]
    async fn test_clock_with_unparseable_time_prints_it_raw() {
        let server = MockServer::start(&[
            (200, REFRESHED),
            (200, r#"{"datetime": "sometime today"}"#),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        seed_ready_user(dir.path());
        let ctx = test_context(dir.path(), &server.base_url());
        let mut console = ScriptedConsole::default();

        run(&ctx, &mut console, ClockType::BreakEnd).await.unwrap();

        assert_eq!(console.output, vec!["✓ 休憩終了打刻完了: sometime today"]);
    }

    #[tokio::test]
    async fn test_clock_with_empty_token_file_makes_no_request() {
        let server = MockServer::start(&[(200, REFRESHED), (201, "{}")]).await;
        let dir = tempfile::tempdir().unwrap();
        seed_ready_user(dir.path());
        std::fs::write(dir.path().join("token.json"), "").unwrap();
        let ctx = test_context(dir.path(), &server.base_url());
        let mut console = ScriptedConsole::default();

        let err = run(&ctx, &mut console, ClockType::ClockOut)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<KintaiError>(),
            Some(KintaiError::NotAuthenticated)
        ));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clock_without_ids_makes_no_request() {
        let server = MockServer::start(&[(200, REFRESHED), (201, "{}")]).await;
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            json!({"client_id": "my-client", "client_secret": "my-secret", "company_id": 100}),
        );
        write_token(dir.path(), json!({"access_token": "a", "refresh_token": "r"}));
        let ctx = test_context(dir.path(), &server.base_url());
        let mut console = ScriptedConsole::default();

        let err = run(&ctx, &mut console, ClockType::ClockIn)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<KintaiError>(),
            Some(KintaiError::IdsNotResolved)
        ));
        assert!(server.requests().is_empty());
    }
}
