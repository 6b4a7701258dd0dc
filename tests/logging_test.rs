//! Rejection logging tests

mod helpers;

use std::io::Write;
use std::sync::{Arc, Mutex};
use helpers::*;
use rabbot::api;
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_failed_lookups_log_a_rejection() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    assert!(!api::list_shifts(&mut session, 9).await.unwrap().is_success());
    assert!(!api::get_shift_by_name(&mut session, 9, &json!("Night")).await.unwrap().is_success());
    assert!(!api::list_schedule_users(&mut session, 9).await.unwrap().is_success());
    assert!(!api::list_mutations(&mut session, 5).await.unwrap().is_success());
    assert!(!api::get_cover_on(&mut session, 5, date(2016, 10, 3)).await.unwrap().is_success());

    let output = logs.contents();
    for operation in ["list_shifts", "get_shift_by_name", "list_schedule_users", "list_mutations", "get_cover_on"] {
        let line = output
            .lines()
            .find(|line| line.contains("Operation rejected") && line.contains(operation))
            .unwrap_or_else(|| panic!("no rejection logged for {}:\n{}", operation, output));
        assert!(line.contains("no-"), "codes missing in: {}", line);
    }
}
