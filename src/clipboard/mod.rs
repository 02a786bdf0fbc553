//! System clipboard via the platform's copy command.

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no clipboard command configured")]
    NoCommand,
    #[error("clipboard unavailable ({program}): {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Pick the copy command: an explicit override, else a per-platform default.
pub fn resolve_command(override_cmd: Option<&str>) -> Option<Vec<String>> {
    if let Some(cmd) = override_cmd {
        let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
        return (!parts.is_empty()).then_some(parts);
    }
    let default: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else {
        &["xclip", "-selection", "clipboard"]
    };
    Some(default.iter().map(|s| s.to_string()).collect())
}

/// Write `text` to the clipboard. No retry on failure.
pub async fn copy(text: &str, override_cmd: Option<&str>) -> Result<(), ClipboardError> {
    let argv = resolve_command(override_cmd).ok_or(ClipboardError::NoCommand)?;
    let program = argv[0].clone();

    let mut child = Command::new(&program)
        .args(&argv[1..])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|source| ClipboardError::Spawn {
            program: program.clone(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()).await {
            Ok(()) => {}
            // The command quit early; its exit status says why.
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Err(source) => {
                return Err(ClipboardError::Spawn {
                    program: program.clone(),
                    source,
                });
            }
        }
        // Closing stdin lets the command finish.
        drop(stdin);
    }

    let status = child.wait().await.map_err(|source| ClipboardError::Spawn {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(ClipboardError::Failed { program, status });
    }
    tracing::debug!(%program, bytes = text.len(), "copied to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_override() {
        assert_eq!(
            resolve_command(Some("xsel --clipboard --input")),
            Some(vec!["xsel".to_string(), "--clipboard".to_string(), "--input".to_string()])
        );
        assert_eq!(resolve_command(Some("   ")), None);
        assert!(resolve_command(None).is_some_and(|argv| !argv.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_command_is_unavailable() {
        let err = copy("00ff00", Some("hues-no-such-clipboard-tool"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipboardError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_through_command() {
        copy("00ff00", Some("cat")).await.unwrap();
        let err = copy("00ff00", Some("false")).await.unwrap_err();
        assert!(matches!(err, ClipboardError::Failed { .. }));
    }
}
