//! Thread view - a focused post with its parents and replies

use bsky::{ThreadNode, ThreadViewPost};

use crate::components::{
    BlockedPlaceholder, Canvas, NotFoundPlaceholder, PostCard, RenderOnce, ReplyList,
};

/// Marker for parent posts shown as context
const CONTEXT_PREFIX: &str = "│ ";

/// Thread view showing the requested post in context
pub struct ThreadView<'a> {
    thread: &'a ThreadViewPost,
    max_depth: usize,
}

impl<'a> ThreadView<'a> {
    pub fn new(thread: &'a ThreadViewPost, max_depth: usize) -> Self {
        Self { thread, max_depth }
    }

    fn render_ancestors(&self, canvas: &mut Canvas) {
        let ancestors = self.thread.ancestors();
        if ancestors.is_empty() {
            return;
        }

        canvas.prefixed(CONTEXT_PREFIX, |c| {
            for (i, node) in ancestors.into_iter().enumerate() {
                if i > 0 {
                    c.blank();
                }
                match node {
                    ThreadNode::Post(parent) => PostCard::compact(&parent.post).render(c),
                    ThreadNode::NotFound(post) => NotFoundPlaceholder::new(post).render(c),
                    ThreadNode::Blocked(post) => BlockedPlaceholder::new(post).render(c),
                    ThreadNode::Unknown => {}
                }
            }
        });
        canvas.blank();
    }
}

impl RenderOnce for ThreadView<'_> {
    fn render(self, canvas: &mut Canvas) {
        self.render_ancestors(canvas);
        PostCard::new(&self.thread.post).render(canvas);

        if self.thread.replies.is_empty() {
            return;
        }

        canvas.blank();
        canvas.line(format!(
            "Replies ({} loaded)",
            self.thread.loaded_reply_count()
        ));
        ReplyList::new(&self.thread.replies, self.max_depth).render(canvas);
    }
}
