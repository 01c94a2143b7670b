// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generates `run-once.sh`: the exit-trapped wrapper a one-off session's
//! pane runs, per distilled §4.4 "One-off Script Template".

use std::fs;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Render the script body. `command` is executed verbatim — no quoting
/// transformation, matching the "intended to be a shell one-liner"
/// semantics from the distilled spec.
pub fn render(command: &str, working_dir: Option<&str>, log_path: &Path, result_path: &Path) -> String {
    let cd_clause = match working_dir {
        Some(dir) => format!("cd {} || exit 1\n", shell_quote(dir)),
        None => String::new(),
    };

    format!(
        r#"#!/bin/bash
START_TS="$(date -u +%Y-%m-%dT%H:%M:%S.%3NZ)"
RESULT_FILE={result_file}
LOG_FILE={log_file}

on_exit() {{
    CODE=$?
    END_TS="$(date -u +%Y-%m-%dT%H:%M:%S.%3NZ)"
    MESSAGE="session exited with code ${{CODE}}"
    printf '[orchestrator] %s at %s\n' "$MESSAGE" "$END_TS" >> "$LOG_FILE"
    printf '{{"exit_code": %s, "started_at": "%s", "finished_at": "%s", "message": "%s"}}\n' \
        "$CODE" "$START_TS" "$END_TS" "$MESSAGE" > "$RESULT_FILE"
    exit "$CODE"
}}
trap on_exit EXIT

{cd_clause}{command}
"#,
        result_file = shell_quote(&result_path.to_string_lossy()),
        log_file = shell_quote(&log_path.to_string_lossy()),
        cd_clause = cd_clause,
        command = command,
    )
}

/// Write the rendered script to `path` with mode `0755` (owner rwx, group
/// rx, others rx), so the pane can execute it directly.
pub fn write(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn render_includes_command_and_trap() {
        let script = render(
            "printf hello\n",
            None,
            &PathBuf::from("/tmp/a/console.log"),
            &PathBuf::from("/tmp/a/result.json"),
        );
        assert!(script.starts_with("#!/bin/bash"));
        assert!(script.contains("trap on_exit EXIT"));
        assert!(script.contains("printf hello"));
        assert!(!script.contains("cd "));
    }

    #[test]
    fn render_with_working_dir_cds_first_and_fails_fast() {
        let script = render(
            "ls",
            Some("/tmp/work dir"),
            &PathBuf::from("/tmp/a/console.log"),
            &PathBuf::from("/tmp/a/result.json"),
        );
        assert!(script.contains("cd '/tmp/work dir' || exit 1"));
    }

    #[test]
    fn write_sets_executable_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run-once.sh");
        write(&path, "#!/bin/bash\ntrue\n").unwrap();

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
