//! Reply list component - nested replies below a post

use bsky::ThreadNode;

use super::{BlockedPlaceholder, Canvas, NotFoundPlaceholder, PostCard, RenderOnce};

/// Props for ReplyList
pub struct ReplyList<'a> {
    replies: &'a [ThreadNode],
    /// Levels still allowed below this list
    max_depth: usize,
}

impl<'a> ReplyList<'a> {
    pub fn new(replies: &'a [ThreadNode], max_depth: usize) -> Self {
        Self { replies, max_depth }
    }
}

impl RenderOnce for ReplyList<'_> {
    fn render(self, canvas: &mut Canvas) {
        if self.max_depth == 0 {
            return;
        }
        for reply in self.replies {
            ReplyItem::new(reply, self.max_depth - 1).render(canvas);
        }
    }
}

/// A single reply and, depth permitting, its own replies
pub struct ReplyItem<'a> {
    node: &'a ThreadNode,
    max_depth: usize,
}

impl<'a> ReplyItem<'a> {
    pub fn new(node: &'a ThreadNode, max_depth: usize) -> Self {
        Self { node, max_depth }
    }
}

impl RenderOnce for ReplyItem<'_> {
    fn render(self, canvas: &mut Canvas) {
        match self.node {
            ThreadNode::Post(thread) => {
                canvas.blank();
                PostCard::compact(&thread.post).render(canvas);

                let hidden = thread.loaded_reply_count();
                if self.max_depth == 0 && hidden > 0 {
                    canvas.nested(|c| c.line(format!("… {hidden} more")));
                    return;
                }
                canvas.nested(|c| ReplyList::new(&thread.replies, self.max_depth).render(c));
            }
            ThreadNode::NotFound(post) => {
                canvas.blank();
                NotFoundPlaceholder::new(post).render(canvas);
            }
            ThreadNode::Blocked(post) => {
                canvas.blank();
                BlockedPlaceholder::new(post).render(canvas);
            }
            ThreadNode::Unknown => {}
        }
    }
}
