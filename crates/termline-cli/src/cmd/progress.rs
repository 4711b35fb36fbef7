//! `termline progress`

use crate::ProgressArgs;
use anyhow::{Result, bail};
use std::time::Duration;
use termline::{Console, ProgressConfig};

/// Walk the bar through every step, pausing `args.millis` between steps.
pub async fn progress(console: &mut Console, args: &ProgressArgs) -> Result<()> {
    let mut config = ProgressConfig::new(
        args.text.as_str(),
        format!("{}: done", args.text),
        format!("{}: interrupted", args.text),
    )
    .with_steps(args.steps)
    .with_bar_length(args.bar_length)
    .with_numeric(args.numeric);
    if let Some(unit) = &args.unit {
        config = config.with_unit(unit.as_str());
    }

    console.progress.start(config);
    let pause = Duration::from_millis(args.millis);

    for step in 1..=args.steps {
        tokio::select! {
            () = tokio::time::sleep(pause) => {}
            _ = tokio::signal::ctrl_c() => {
                console.progress.fail();
                bail!("interrupted at step {step} of {}", args.steps);
            }
        }
        console.progress.fraction(fraction(step, args.steps));
    }
    Ok(())
}

/// `step / steps`, pinned to exactly `1.0` on the last step.
fn fraction(step: u32, steps: u32) -> f64 {
    if step >= steps {
        1.0
    } else {
        f64::from(step) / f64::from(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use termline::{LabelDecorator, ManualClock, RecordingSink, SilentSink};

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_last_step_is_exactly_one() {
        assert_eq!(fraction(1, 4), 0.25);
        assert_eq!(fraction(3, 3), 1.0);
        assert_eq!(fraction(7, 3), 1.0);
    }

    #[tokio::test]
    async fn test_walk_completes() {
        let sink = RecordingSink::new();
        let out = sink.clone();
        let mut console = Console::with_sinks(
            move || out.clone(),
            SilentSink,
            Arc::new(ManualClock::new()),
            Arc::new(LabelDecorator),
        );
        let args = ProgressArgs {
            text: "copy".into(),
            steps: 4,
            bar_length: 4,
            unit: Some("files".into()),
            numeric: true,
            millis: 1,
        };

        progress(&mut console, &args).await.unwrap();

        let writes = sink.writes();
        assert!(writes.contains(&"[▓░░░](1/4 files)".to_string()));
        assert!(writes.contains(&"[▓▓▓▓](4/4 files)".to_string()));
        assert_eq!(writes[writes.len() - 2], "green: ✔ copy: done");
        assert!(!console.progress.is_started());
    }
}
