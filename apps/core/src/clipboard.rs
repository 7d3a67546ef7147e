//! System clipboard access through the platform's command line tools.

use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

/// Somewhere an answer can be copied to.
#[async_trait]
pub trait Clipboard: Send + Sync + 'static {
    async fn copy(&self, text: &str) -> Result<(), AppError>;
}

/// Candidate tools, in lookup order, with the arguments that make them read stdin.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Longest a clipboard tool may run before the copy is abandoned.
const COPY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pipes text into the first clipboard tool found in `PATH`.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tool: Option<(PathBuf, Vec<String>)>,
    timeout: Duration,
}

impl SystemClipboard {
    /// Looks up a clipboard tool once. Missing tools are reported on first copy.
    pub fn detect() -> Self {
        let tool = CANDIDATES.iter().find_map(|(name, args)| {
            which::which(name)
                .ok()
                .map(|path| (path, args.iter().map(|a| a.to_string()).collect()))
        });
        match &tool {
            Some((path, _)) => info!("Clipboard tool: {:?}", path),
            None => warn!("No clipboard tool found in PATH; copy will be unavailable"),
        }
        Self {
            tool,
            timeout: COPY_TIMEOUT,
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<(), AppError> {
        let (program, args) = self.tool.as_ref().ok_or_else(|| {
            AppError::Clipboard(
                "no clipboard tool available (install pbcopy, wl-copy, xclip or xsel)".to_string(),
            )
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let status = timeout(self.timeout, async {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
                // Dropping stdin closes the pipe so the tool can finish.
            }
            child.wait().await
        })
        .await
        .map_err(|_| {
            warn!("{} did not finish within {:?}", program.display(), self.timeout);
            AppError::Clipboard(format!(
                "{} did not finish within {:?}",
                program.display(),
                self.timeout
            ))
        })??;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::Clipboard(format!(
                "{} exited with {}",
                program.display(),
                status
            )))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn clipboard_with(tool: &str, args: &[&str], timeout: Duration) -> SystemClipboard {
        SystemClipboard {
            tool: Some((
                which::which(tool).unwrap(),
                args.iter().map(|a| a.to_string()).collect(),
            )),
            timeout,
        }
    }

    #[tokio::test]
    async fn test_copy_through_tool() {
        let clipboard = clipboard_with("cat", &[], Duration::from_secs(5));
        clipboard.copy("Answer text").await.unwrap();
    }

    #[tokio::test]
    async fn test_hung_tool_times_out() {
        let clipboard = clipboard_with("sleep", &["30"], Duration::from_millis(200));
        let started = std::time::Instant::now();

        let err = clipboard.copy("Answer text").await.unwrap_err();

        assert!(matches!(err, AppError::Clipboard(_)), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_failing_tool_is_reported() {
        let clipboard = clipboard_with("sh", &["-c", "cat > /dev/null; exit 3"], Duration::from_secs(5));
        let err = clipboard.copy("Answer text").await.unwrap_err();
        assert!(matches!(err, AppError::Clipboard(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let clipboard = SystemClipboard {
            tool: None,
            timeout: COPY_TIMEOUT,
        };
        let err = clipboard.copy("Answer text").await.unwrap_err();
        assert!(matches!(err, AppError::Clipboard(_)));
    }
}
