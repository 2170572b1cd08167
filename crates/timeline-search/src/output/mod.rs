//! Rendering search results.

mod format;
mod pager;

pub use format::{format_line, time_ago_in_words};
pub use pager::{pager_command, should_page, OutputSink, PagerProcess};

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::twitter::Post;

/// Writes one formatted line per post.
pub struct Presenter<W: Write> {
    out: W,
    now: DateTime<Utc>,
}

impl<W: Write> Presenter<W> {
    /// Present relative to the current time.
    pub fn new(out: W) -> Self {
        Self::with_now(out, Utc::now())
    }

    /// Present relative to a fixed time.
    pub fn with_now(out: W, now: DateTime<Utc>) -> Self {
        Self { out, now }
    }

    /// Write every post, returning how many lines were written.
    ///
    /// Stops quietly if the reader went away (pager quit early).
    pub fn render<'a, I>(&mut self, posts: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut written = 0;
        for post in posts {
            match writeln!(self.out, "{}", format_line(post, self.now)) {
                Ok(()) => written += 1,
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(written),
                Err(e) => return Err(e),
            }
        }
        match self.out.flush() {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(written),
            other => other.map(|()| written),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
