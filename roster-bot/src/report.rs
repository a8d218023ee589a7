use std::process::ExitCode;

use roster_alert::AlertSink;
use tracing::debug;

const FALLBACK_MESSAGE: &str = "Roster sync failed";

/// Split an error chain into the alert headline (outermost context) and the
/// detail text (remaining causes joined by `: `).
pub fn split_report(err: &anyhow::Error) -> (String, String) {
    let mut chain = err.chain().map(ToString::to_string);
    let headline = chain.next().unwrap_or_default();
    let causes: Vec<String> = chain.collect();

    if causes.is_empty() {
        (FALLBACK_MESSAGE.to_owned(), headline)
    } else {
        (headline, causes.join(": "))
    }
}

/// Alert about `err` and hand back the failing exit code. The code does not
/// depend on whether the alert got through.
pub async fn report_failure(alert: &AlertSink, err: &anyhow::Error) -> ExitCode {
    let (message, detail) = split_report(err);
    let outcome = alert.notify(&message, &detail).await;
    debug!(?outcome, "alert attempted");

    ExitCode::FAILURE
}
