//! `termline spin`

use crate::SpinArgs;
use anyhow::{Result, bail};
use std::time::Duration;
use termline::{Completion, Console, SpinnerConfig};
use tracing::debug;

/// Spin for `args.millis`, then finish with the success (or fail) line.
///
/// Ctrl-C finishes with the fail line right away and reports the
/// interruption as an error.
pub async fn spin(console: &mut Console, args: &SpinArgs) -> Result<()> {
    let config = SpinnerConfig::new(
        args.text.as_str(),
        with_detail(&args.text),
        with_detail(&args.text),
    );
    console.spinner.start(config);

    tokio::select! {
        () = tokio::time::sleep(Duration::from_millis(args.millis)) => {}
        signal = tokio::signal::ctrl_c() => {
            debug!(?signal, "spinner interrupted");
            console.spinner.error(Some("interrupted"));
            bail!("interrupted");
        }
    }

    let detail = args.detail.as_deref();
    if args.fail {
        console.spinner.error(detail);
    } else {
        console.spinner.success(detail);
    }
    Ok(())
}

/// `text` alone, or `text: detail` when a detail is given.
fn with_detail(text: &str) -> Completion {
    let text = text.to_string();
    Completion::dynamic(move |detail| {
        if detail.is_empty() {
            text.clone()
        } else {
            format!("{text}: {detail}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use termline::{LabelDecorator, ManualClock, RecordingSink, SilentSink};

    fn console(sink: &RecordingSink) -> Console {
        let out = sink.clone();
        Console::with_sinks(
            move || out.clone(),
            SilentSink,
            Arc::new(ManualClock::new()),
            Arc::new(LabelDecorator),
        )
    }

    fn args(fail: bool, detail: Option<&str>) -> SpinArgs {
        SpinArgs {
            text: "fetching".into(),
            millis: 1,
            fail,
            detail: detail.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_success_line() {
        let sink = RecordingSink::new();
        let mut console = console(&sink);

        spin(&mut console, &args(false, None)).await.unwrap();

        assert!(sink.writes().contains(&"green: ✔ fetching".to_string()));
        assert!(!console.spinner.is_running());
    }

    #[tokio::test]
    async fn test_fail_line_with_detail() {
        let sink = RecordingSink::new();
        let mut console = console(&sink);

        spin(&mut console, &args(true, Some("timeout"))).await.unwrap();

        assert!(sink.writes().contains(&"red: ✘ fetching: timeout".to_string()));
    }
}
