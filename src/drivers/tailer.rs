use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use crate::drivers::MonitorError;
use crate::types::Window;
/// Anything that can produce the current line window on demand.
pub trait WindowSource {
    fn read_window(&mut self) -> Result<Window, MonitorError>;
}
/// Re-opens the file on every call and keeps only the trailing lines.
///
/// No handle or offset survives between calls, so truncation and rotation of
/// the source file need no special handling.
pub struct FileTailer {
    path: PathBuf,
    bound: usize,
}
impl FileTailer {
    pub fn new(path: impl Into<PathBuf>, bound: usize) -> Result<Self, MonitorError> {
        if bound == 0 {
            return Err(MonitorError::InvalidWindowBound);
        }
        Ok(Self {
            path: path.into(),
            bound,
        })
    }
}
impl WindowSource for FileTailer {
    fn read_window(&mut self) -> Result<Window, MonitorError> {
        let access = |source| MonitorError::FileAccess {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).map_err(access)?;
        let window = trailing_lines(BufReader::new(file), self.bound).map_err(access)?;
        log::trace!("read {} lines from {}", window.len(), self.path.display());
        Ok(window)
    }
}
/// Keeps the last `bound` physical lines of `reader`, oldest first.
///
/// Terminators (`\n` or `\r\n`) are stripped. A final line without a terminator
/// is kept as-is. Invalid UTF-8 is replaced rather than rejected so that a
/// half-written multibyte sequence cannot fail the whole read.
pub fn trailing_lines<R: BufRead>(mut reader: R, bound: usize) -> std::io::Result<Window> {
    let mut queue: VecDeque<String> = VecDeque::with_capacity(bound);
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        if queue.len() == bound {
            queue.pop_front();
        }
        queue.push_back(String::from_utf8_lossy(&raw).into_owned());
    }
    Ok(Window::from_lines(queue))
}
/// In-memory source useful for tests and deterministic playback.
///
/// Each entry is the whole file content at one tick; `None` means the file is
/// missing at that tick. The last entry repeats once the queue drains.
#[cfg(test)]
pub struct ManualSource {
    queue: VecDeque<Option<String>>,
    bound: usize,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(contents: impl IntoIterator<Item = Option<String>>, bound: usize) -> Self {
        Self {
            queue: contents.into_iter().collect(),
            bound: bound.max(1),
        }
    }
}
#[cfg(test)]
impl WindowSource for ManualSource {
    fn read_window(&mut self) -> Result<Window, MonitorError> {
        let current = if self.queue.len() > 1 {
            self.queue.pop_front().flatten()
        } else {
            self.queue.front().cloned().flatten()
        };
        let missing = || MonitorError::FileAccess {
            path: PathBuf::from("<manual>"),
            source: std::io::ErrorKind::NotFound.into(),
        };
        let text = current.ok_or_else(missing)?;
        trailing_lines(std::io::Cursor::new(text.into_bytes()), self.bound).map_err(|source| {
            MonitorError::FileAccess {
                path: PathBuf::from("<manual>"),
                source,
            }
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::{Cursor, Write};
    fn lines_of(window: &Window) -> Vec<&str> {
        window.lines().iter().map(String::as_str).collect()
    }
    #[test]
    fn keeps_only_the_last_n_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1,2,3\n4,5,6\n7,8,9\n").unwrap();
        let mut tailer = FileTailer::new(file.path(), 2).unwrap();
        let window = tailer.read_window().unwrap();
        assert_eq!(lines_of(&window), vec!["4,5,6", "7,8,9"]);
    }
    #[test]
    fn short_file_returns_every_line() {
        let window = trailing_lines(Cursor::new("a\nb\n"), 10).unwrap();
        assert_eq!(lines_of(&window), vec!["a", "b"]);
        let empty = trailing_lines(Cursor::new(""), 3).unwrap();
        assert!(empty.is_empty());
    }
    #[test]
    fn window_length_is_min_of_bound_and_line_count() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let bound = rng.gen_range(1..40);
            let total = rng.gen_range(0..80);
            let text: String = (0..total).map(|i| format!("{i},{i}\n")).collect();
            let window = trailing_lines(Cursor::new(text), bound).unwrap();
            assert_eq!(window.len(), bound.min(total));
            if total >= bound {
                let expected: Vec<String> =
                    (total - bound..total).map(|i| format!("{i},{i}")).collect();
                assert_eq!(window.lines(), expected.as_slice());
            }
        }
    }
    #[test]
    fn partial_last_line_is_kept() {
        let window = trailing_lines(Cursor::new("1,2\r\n3,4\n5,"), 5).unwrap();
        assert_eq!(lines_of(&window), vec!["1,2", "3,4", "5,"]);
    }
    #[test]
    fn missing_file_is_a_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut tailer = FileTailer::new(dir.path().join("absent.txt"), 5).unwrap();
        let err = tailer.read_window().unwrap_err();
        assert!(matches!(err, MonitorError::FileAccess { .. }));
    }
    #[test]
    fn rereads_after_truncation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\n2\n3\n").unwrap();
        let mut tailer = FileTailer::new(file.path(), 10).unwrap();
        assert_eq!(tailer.read_window().unwrap().len(), 3);
        file.as_file().set_len(0).unwrap();
        assert!(tailer.read_window().unwrap().is_empty());
    }
    #[test]
    fn zero_bound_is_rejected() {
        assert!(matches!(
            FileTailer::new("out.txt", 0),
            Err(MonitorError::InvalidWindowBound)
        ));
    }
    #[test]
    fn manual_source_replays_then_repeats_last() {
        let mut source = ManualSource::new(
            vec![Some("1\n2\n".to_owned()), None, Some("3\n".to_owned())],
            1,
        );
        assert_eq!(lines_of(&source.read_window().unwrap()), vec!["2"]);
        assert!(source.read_window().is_err());
        assert_eq!(lines_of(&source.read_window().unwrap()), vec!["3"]);
        assert_eq!(lines_of(&source.read_window().unwrap()), vec!["3"]);
    }
}
