//! Author subscriptions with recipe previews.

use std::sync::Arc;

use crate::domain::entities::{Subscription, User};
use crate::domain::repositories::{FollowRepository, RecipeRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for subscribing to recipe authors and listing subscriptions.
pub struct SubscriptionService<W: FollowRepository, R: RecipeRepository, U: UserRepository> {
    follow_repository: Arc<W>,
    recipe_repository: Arc<R>,
    user_repository: Arc<U>,
}

impl<W: FollowRepository, R: RecipeRepository, U: UserRepository> SubscriptionService<W, R, U> {
    pub fn new(
        follow_repository: Arc<W>,
        recipe_repository: Arc<R>,
        user_repository: Arc<U>,
    ) -> Self {
        Self {
            follow_repository,
            recipe_repository,
            user_repository,
        }
    }

    /// Subscribes `user_id` to `author_id` and returns the author with a
    /// recipe preview of at most `recipes_limit` entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown author and
    /// [`AppError::Validation`] for self-subscription or a duplicate
    /// subscription.
    pub async fn subscribe(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: i64,
    ) -> Result<Subscription, AppError> {
        if user_id == author_id {
            return Err(AppError::bad_request(
                "Cannot subscribe to yourself",
                json!({}),
            ));
        }

        let author = self.get_user(author_id).await?;

        let added = self.follow_repository.add(user_id, author_id).await?;
        if !added {
            return Err(AppError::bad_request(
                "Already subscribed to this user",
                json!({ "author_id": author_id }),
            ));
        }

        self.build_subscription(author, recipes_limit).await
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown author and
    /// [`AppError::Validation`] if no subscription existed.
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        self.get_user(author_id).await?;

        let removed = self.follow_repository.remove(user_id, author_id).await?;
        if !removed {
            return Err(AppError::bad_request(
                "Not subscribed to this user",
                json!({ "author_id": author_id }),
            ));
        }

        Ok(())
    }

    /// Lists the user's subscriptions, each with a recipe preview, plus
    /// the total subscription count for pagination.
    pub async fn subscriptions(
        &self,
        user_id: i64,
        recipes_limit: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Subscription>, i64), AppError> {
        let authors = self
            .follow_repository
            .list_following(user_id, offset, limit)
            .await?;
        let count = self.follow_repository.count_following(user_id).await?;

        let mut subscriptions = Vec::with_capacity(authors.len());
        for author in authors {
            subscriptions.push(self.build_subscription(author, recipes_limit).await?);
        }

        Ok((subscriptions, count))
    }

    /// Returns the subset of `user_ids` that `user_id` follows.
    pub async fn followed_ids(
        &self,
        user_id: i64,
        user_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError> {
        self.follow_repository.followed_ids(user_id, user_ids).await
    }

    async fn build_subscription(
        &self,
        author: User,
        recipes_limit: i64,
    ) -> Result<Subscription, AppError> {
        let recipes = self
            .recipe_repository
            .list_by_author(author.id, recipes_limit)
            .await?;
        let recipes_count = self.recipe_repository.count_by_author(author.id).await?;

        Ok(Subscription {
            user: author,
            recipes,
            recipes_count,
        })
    }

    async fn get_user(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))
    }
}
