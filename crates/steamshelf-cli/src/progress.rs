use crate::display::{Painter, gray};
use std::io::Write;
use steamshelf_library::Progress;

const CLEAR_WIDTH: usize = 50;

/// Single-line progress indicator on stderr, redrawn in place
pub struct ProgressLine {
    enabled: bool,
    stop_after: Option<usize>,
    painter: Painter,
    drawn: bool,
}

impl ProgressLine {
    pub fn new(enabled: bool, stop_after: Option<usize>) -> Self {
        Self {
            enabled,
            stop_after,
            painter: Painter::stderr(),
            drawn: false,
        }
    }

    pub fn status(&self, progress: Progress) -> String {
        match self.stop_after {
            Some(limit) => format!(
                "Checked {}/{}, found {}/{}",
                progress.processed, progress.total, progress.matched, limit
            ),
            None => format!("Progress: {}/{}", progress.processed, progress.total),
        }
    }

    pub fn update(&mut self, progress: Progress) {
        if !self.enabled {
            return;
        }

        let line = self.painter.paint(self.status(progress), gray());
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{line}");
        let _ = stderr.flush();
        self.drawn = true;
    }

    /// Erase the line so the results start on a clean row
    pub fn finish(&mut self) {
        if self.drawn {
            eprint!("\r{}\r", " ".repeat(CLEAR_WIDTH));
            self.drawn = false;
        }
    }
}
