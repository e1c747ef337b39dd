//! Default event handlers keeping counters and notifications in step

use async_trait::async_trait;

use super::{EventHandler, ForumEvent};
use crate::backend::store::{DiscussionStore, NotificationStore, PostStore, Store, StoreError};
use crate::shared::forum::{Notification, NotificationKind};

/// Maintains `posts.like_count`
pub struct LikeCounter;

#[async_trait]
impl EventHandler for LikeCounter {
    async fn handle(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError> {
        match event {
            ForumEvent::LikeCreated(like) => store.adjust_post_likes(like.post_id, 1).await,
            ForumEvent::LikeUpdated(like) => {
                let delta = if like.is_active() { 1 } else { -1 };
                store.adjust_post_likes(like.post_id, delta).await
            }
            _ => Ok(()),
        }
    }
}

/// Tells a post's author that someone liked it
pub struct LikeNotifier;

#[async_trait]
impl EventHandler for LikeNotifier {
    async fn handle(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError> {
        let ForumEvent::LikeCreated(like) = event else {
            return Ok(());
        };

        let post = store.get_post(like.post_id).await?;
        if post.author_id == like.user_id {
            return Ok(());
        }

        let mut notification = Notification::new(NotificationKind::Like, like.user_id, post.author_id, post.id);
        store.create_notification(&mut notification).await
    }
}

/// Maintains `discussions.comment_count`, `first_post` and `last_post`
pub struct PostCounter;

#[async_trait]
impl EventHandler for PostCounter {
    async fn handle(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError> {
        match event {
            ForumEvent::PostCreated(post) => {
                store.adjust_discussion_comments(post.discussion_id, 1, post.id).await
            }
            ForumEvent::PostDeleted(post) => {
                store.adjust_discussion_comments(post.discussion_id, -1, 0).await
            }
            _ => Ok(()),
        }
    }
}

/// Notifies the discussion author and the replied-to user about a new post
pub struct PostNotifier;

#[async_trait]
impl EventHandler for PostNotifier {
    async fn handle(&self, store: &dyn Store, event: &ForumEvent) -> Result<(), StoreError> {
        let ForumEvent::PostCreated(post) = event else {
            return Ok(());
        };

        let discussion = store.get_discussion(post.discussion_id).await?;
        let mut recipients = vec![(discussion.author_id, NotificationKind::Comment)];
        if post.reply_id > 0 {
            recipients.push((post.reply_id, NotificationKind::Reply));
        }

        let mut notified = Vec::with_capacity(recipients.len());
        for (to, kind) in recipients {
            if to <= 0 || to == post.author_id || notified.contains(&to) {
                continue;
            }
            let mut notification = Notification::new(kind, post.author_id, to, post.id)
                .with_content(discussion.title.clone());
            store.create_notification(&mut notification).await?;
            notified.push(to);
        }
        Ok(())
    }
}
