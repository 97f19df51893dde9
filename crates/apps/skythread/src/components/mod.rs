//! Reusable text components for skythread

mod placeholders;
mod post_card;
mod reply_list;

pub use placeholders::{BlockedPlaceholder, ErrorDisplay, LoadingIndicator, NotFoundPlaceholder};
pub use post_card::PostCard;
pub use reply_list::ReplyList;

/// Indentation added per nesting level
const INDENT: &str = "  ";

/// Line-oriented output buffer that tracks nesting
#[derive(Debug, Default)]
pub struct Canvas {
    out: String,
    depth: usize,
    prefix: &'static str,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one or more lines at the current nesting level
    pub fn line(&mut self, text: impl AsRef<str>) {
        for line in text.as_ref().lines() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(self.prefix);
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Render `f` one nesting level deeper
    pub fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    /// Render `f` with every line marked by `prefix`
    pub fn prefixed(&mut self, prefix: &'static str, f: impl FnOnce(&mut Self)) {
        let previous = std::mem::replace(&mut self.prefix, prefix);
        f(self);
        self.prefix = previous;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// A component consumed by rendering into a [`Canvas`]
pub trait RenderOnce {
    fn render(self, canvas: &mut Canvas);

    /// Render on a fresh canvas
    fn to_text(self) -> String
    where
        Self: Sized,
    {
        let mut canvas = Canvas::new();
        self.render(&mut canvas);
        canvas.finish()
    }
}
