use std::path::Path;

use reviewguard_types::{AddedLine, FileDiff, FileStatus, Hunk};

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("malformed hunk header: {0}")]
    MalformedHunkHeader(String),
}

/// Parse a unified diff (git-style) into per-file diffs.
///
/// Added lines carry 1-based new-file line numbers recovered from hunk
/// headers. Renamed files keep their old path in `FileStatus::Renamed`;
/// binary files appear in the output with no hunks.
pub fn scan_unified_diff(diff_text: &str) -> Result<Vec<FileDiff>, DiffError> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut current: Option<FileState> = None;

    for raw in diff_text.lines() {
        if let Some(rest) = raw.strip_prefix("diff --git ") {
            if let Some(state) = current.take() {
                files.push(state.finish());
            }
            current = Some(FileState::new(parse_diff_git_paths(rest)));
            continue;
        }

        let Some(state) = current.as_mut() else {
            continue;
        };

        if state.in_hunk {
            if raw.starts_with("@@") {
                state.start_hunk(parse_hunk_header(raw)?);
                continue;
            }
            if raw.starts_with('\\') {
                // "\ No newline at end of file"
                continue;
            }
            match raw.as_bytes().first().copied() {
                Some(b'+') => state.push_added(raw[1..].to_string()),
                Some(b'-') => {}
                Some(b' ') => state.skip_context(),
                // A line outside the diff grammar ends the hunk section
                // (e.g. trailing commit trailers in `git format-patch` output).
                _ => state.in_hunk = false,
            }
            continue;
        }

        if raw.starts_with("new file mode") {
            state.status = Some(FileStatus::Added);
        } else if raw.starts_with("deleted file mode") {
            state.status = Some(FileStatus::Deleted);
        } else if let Some(from) = raw.strip_prefix("rename from ") {
            state.rename_from = Some(from.trim().to_string());
        } else if let Some(to) = raw.strip_prefix("rename to ") {
            state.path = Some(normalize_path(to.trim()));
        } else if raw.starts_with("Binary files ") || raw.starts_with("GIT binary patch") {
            state.status = Some(FileStatus::Binary);
        } else if let Some(rest) = raw.strip_prefix("--- ") {
            if file_marker_path(rest).is_none() && state.status.is_none() {
                // `--- /dev/null` means the file is new.
                state.status = Some(FileStatus::Added);
            }
        } else if let Some(rest) = raw.strip_prefix("+++ ") {
            match file_marker_path(rest) {
                Some(p) => state.path = Some(p),
                // `+++ /dev/null` means the file was deleted; keep the old path.
                None => state.status = Some(FileStatus::Deleted),
            }
        } else if raw.starts_with("@@") {
            state.start_hunk(parse_hunk_header(raw)?);
        }
    }

    if let Some(state) = current.take() {
        files.push(state.finish());
    }

    Ok(files)
}

struct FileState {
    path: Option<String>,
    status: Option<FileStatus>,
    rename_from: Option<String>,
    hunks: Vec<Hunk>,
    in_hunk: bool,
    next_line: u32,
}

impl FileState {
    fn new(path: Option<String>) -> Self {
        Self {
            path,
            status: None,
            rename_from: None,
            hunks: Vec::new(),
            in_hunk: false,
            next_line: 0,
        }
    }

    fn start_hunk(&mut self, new_start: u32) {
        self.hunks.push(Hunk {
            new_start,
            added: Vec::new(),
        });
        self.next_line = new_start;
        self.in_hunk = true;
    }

    fn push_added(&mut self, content: String) {
        let line = self.next_line;
        if let Some(h) = self.hunks.last_mut() {
            h.added.push(AddedLine { line, content });
        }
        self.next_line = self.next_line.saturating_add(1);
    }

    fn skip_context(&mut self) {
        self.next_line = self.next_line.saturating_add(1);
    }

    fn finish(self) -> FileDiff {
        let status = match (self.status, self.rename_from) {
            (Some(FileStatus::Binary), _) => FileStatus::Binary,
            (_, Some(from)) => FileStatus::Renamed { from },
            (Some(s), None) => s,
            (None, None) => FileStatus::Modified,
        };
        let hunks = if matches!(status, FileStatus::Binary) {
            Vec::new()
        } else {
            self.hunks
        };
        FileDiff {
            path: self.path.unwrap_or_default(),
            status,
            hunks,
        }
    }
}

/// New-file start line from `@@ -a,b +c,d @@` (count is optional).
fn parse_hunk_header(line: &str) -> Result<u32, DiffError> {
    let plus = line
        .split_whitespace()
        .find(|tok| tok.starts_with('+'))
        .ok_or_else(|| DiffError::MalformedHunkHeader(line.to_string()))?;

    let start_str = plus[1..].split(',').next().unwrap_or("");
    start_str
        .parse()
        .map_err(|_| DiffError::MalformedHunkHeader(line.to_string()))
}

/// Best-effort path from `a/foo b/foo`. The b-side starts at the last
/// ` b/` marker so paths containing spaces survive; the `+++` marker
/// wins when present.
fn parse_diff_git_paths(rest: &str) -> Option<String> {
    if let Some(pos) = rest.rfind(" b/") {
        return Some(normalize_path(&rest[pos + 3..]));
    }
    let b_side = rest.split_whitespace().nth(1)?;
    Some(normalize_path(
        b_side.strip_prefix("b/").unwrap_or(b_side),
    ))
}

/// Path from a `---`/`+++` marker body; None for `/dev/null`.
fn file_marker_path(rest: &str) -> Option<String> {
    let first = rest.split('\t').next().unwrap_or(rest).trim();
    if first == "/dev/null" {
        return None;
    }
    let stripped = first
        .strip_prefix("a/")
        .or_else(|| first.strip_prefix("b/"))
        .unwrap_or(first);
    Some(normalize_path(stripped))
}

fn normalize_path(p: &str) -> String {
    Path::new(p)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_line_numbers_from_hunk_headers() {
        let diff = r#"diff --git a/src/lib.ts b/src/lib.ts
index 0000000..1111111 100644
--- a/src/lib.ts
+++ b/src/lib.ts
@@ -1,2 +1,3 @@
 const a = 1;
+const b = 2;
 const c = 3;
@@ -10,1 +11,2 @@
 const d = 4;
+const e = 5;
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 1);
        let f = &files[0];
        assert_eq!(f.path, "src/lib.ts");
        assert_eq!(f.status, FileStatus::Modified);
        assert_eq!(f.hunks.len(), 2);
        assert_eq!(f.hunks[0].added[0].line, 2);
        assert_eq!(f.hunks[0].added[0].content, "const b = 2;");
        assert_eq!(f.hunks[1].added[0].line, 12);
    }

    #[test]
    fn classifies_new_files() {
        let diff = r#"diff --git a/src/new.ts b/src/new.ts
new file mode 100644
index 0000000..2222222
--- /dev/null
+++ b/src/new.ts
@@ -0,0 +1,2 @@
+export const x = 1;
+export const y = 2;
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Added);
        assert_eq!(files[0].added_line_count(), 2);
        assert_eq!(files[0].hunks[0].added[0].line, 1);
    }

    #[test]
    fn classifies_deleted_files_with_old_path() {
        let diff = r#"diff --git a/src/old.ts b/src/old.ts
deleted file mode 100644
index 2222222..0000000
--- a/src/old.ts
+++ /dev/null
@@ -1,2 +0,0 @@
-export const x = 1;
-export const y = 2;
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files[0].status, FileStatus::Deleted);
        assert_eq!(files[0].path, "src/old.ts");
        assert_eq!(files[0].added_line_count(), 0);
    }

    #[test]
    fn classifies_renames_with_old_and_new_paths() {
        let diff = r#"diff --git a/src/old_name.ts b/src/new_name.ts
similarity index 95%
rename from src/old_name.ts
rename to src/new_name.ts
index 1111111..2222222 100644
--- a/src/old_name.ts
+++ b/src/new_name.ts
@@ -4,1 +4,2 @@
 const a = 1;
+const b = 2;
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files[0].path, "src/new_name.ts");
        assert_eq!(
            files[0].status,
            FileStatus::Renamed {
                from: "src/old_name.ts".to_string()
            }
        );
        assert_eq!(files[0].added_line_count(), 1);
    }

    #[test]
    fn binary_files_are_listed_without_hunks() {
        let diff = r#"diff --git a/logo.png b/logo.png
index 1111111..2222222 100644
Binary files a/logo.png and b/logo.png differ
diff --git a/src/a.ts b/src/a.ts
--- a/src/a.ts
+++ b/src/a.ts
@@ -1,1 +1,2 @@
 const a = 1;
+const b = 2;
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].status, FileStatus::Binary);
        assert!(files[0].hunks.is_empty());
        assert_eq!(files[1].added_line_count(), 1);
    }

    #[test]
    fn binary_file_paths_with_spaces_survive() {
        let diff = r#"diff --git a/assets/logo v2.png b/assets/logo v2.png
index 1111111..2222222 100644
Binary files a/assets/logo v2.png and b/assets/logo v2.png differ
"#;

        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files[0].path, "assets/logo v2.png");
        assert_eq!(files[0].status, FileStatus::Binary);
    }

    #[test]
    fn malformed_hunk_header_is_fatal() {
        let diff = r#"diff --git a/src/a.ts b/src/a.ts
--- a/src/a.ts
+++ b/src/a.ts
@@ garbage @@
+const b = 2;
"#;

        let err = scan_unified_diff(diff).unwrap_err();
        assert!(matches!(err, DiffError::MalformedHunkHeader(_)));
    }

    #[test]
    fn non_numeric_hunk_start_is_fatal() {
        let diff = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1,1 +x,2 @@\n+a\n";
        assert!(scan_unified_diff(diff).is_err());
    }

    #[test]
    fn empty_diff_yields_no_files() {
        assert!(scan_unified_diff("").unwrap().is_empty());
        assert!(scan_unified_diff("\n\n").unwrap().is_empty());
    }

    #[test]
    fn multiple_files_preserve_diff_order() {
        let diff = r#"diff --git a/b.ts b/b.ts
--- a/b.ts
+++ b/b.ts
@@ -1,1 +1,2 @@
 x
+y
diff --git a/a.ts b/a.ts
--- a/a.ts
+++ b/a.ts
@@ -1,1 +1,2 @@
 x
+z
"#;
        let files = scan_unified_diff(diff).unwrap();
        assert_eq!(files[0].path, "b.ts");
        assert_eq!(files[1].path, "a.ts");
    }
}
