use crate::error::{ConverterError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        // Try xclip first, then xsel
        match pipe_to("xclip", &["-selection", "clipboard"], text) {
            Err(ConverterError::Clipboard(msg)) if msg.starts_with("Failed to spawn") => {
                pipe_to("xsel", &["--clipboard", "--input"], text).map_err(|e| {
                    ConverterError::Clipboard(format!("{}. Install xclip or xsel.", e))
                })
            }
            other => other,
        }
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(ConverterError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

/// Pipes text into a user-supplied clipboard command line such as `wl-copy`
/// or `xclip -selection primary`.
pub fn copy_with_command(command_line: &str, text: &str) -> Result<()> {
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ConverterError::Clipboard("Clipboard command is empty".to_string()))?;
    let args: Vec<&str> = parts.collect();
    pipe_to(program, &args, text)
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ConverterError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(|e| {
            ConverterError::Clipboard(format!("Failed to write to {}: {}", program, e))
        })?;
    }

    let status = child
        .wait()
        .map_err(|e| ConverterError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ConverterError::Clipboard(format!(
            "{} exited with error",
            program
        )))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_copy_with_command_pipes_text() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.txt");
        let script = dir.path().join("clip.sh");
        fs::write(&script, format!("cat > {}\n", target.display())).unwrap();

        copy_with_command(&format!("sh {}", script.display()), "copied text").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "copied text");
    }

    #[test]
    fn test_copy_with_missing_command() {
        let err = copy_with_command("no-such-clipboard-tool", "x").unwrap_err();
        assert!(err.to_string().contains("Failed to spawn no-such-clipboard-tool"));
    }

    #[test]
    fn test_copy_with_failing_command() {
        // depending on timing the write hits a closed pipe or the exit status fails
        let err = copy_with_command("false", "x").unwrap_err();
        assert!(matches!(err, ConverterError::Clipboard(_)));
        assert!(err.to_string().contains("false"));
    }

    #[test]
    fn test_copy_with_empty_command() {
        assert!(matches!(
            copy_with_command("   ", "x"),
            Err(ConverterError::Clipboard(_))
        ));
    }
}
