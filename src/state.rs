//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, FavoriteService, RecipeService, ShoppingListService, ShortLinkService,
    SubscriptionService,
};
use crate::infrastructure::persistence::{
    PgCartRepository, PgFavoriteRepository, PgFollowRepository, PgIngredientRepository,
    PgRecipeRepository, PgShortLinkRepository, PgTagRepository, PgTokenRepository,
    PgUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub base_url: String,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub recipe_service: Arc<RecipeService<PgRecipeRepository, PgIngredientRepository, PgTagRepository>>,
    pub favorite_service: Arc<FavoriteService<PgFavoriteRepository, PgRecipeRepository>>,
    pub shopping_list_service: Arc<ShoppingListService<PgCartRepository, PgRecipeRepository>>,
    pub short_link_service: Arc<ShortLinkService<PgShortLinkRepository>>,
    pub subscription_service:
        Arc<SubscriptionService<PgFollowRepository, PgRecipeRepository, PgUserRepository>>,
}

impl AppState {
    /// Wires every service to its PostgreSQL-backed repository.
    pub fn new(db: PgPool, base_url: String, token_signing_secret: String) -> Self {
        let pool = Arc::new(db.clone());

        let recipe_repository = Arc::new(PgRecipeRepository::new(pool.clone()));

        Self {
            db,
            base_url,
            auth_service: Arc::new(AuthService::new(
                Arc::new(PgTokenRepository::new(pool.clone())),
                token_signing_secret,
            )),
            recipe_service: Arc::new(RecipeService::new(
                recipe_repository.clone(),
                Arc::new(PgIngredientRepository::new(pool.clone())),
                Arc::new(PgTagRepository::new(pool.clone())),
            )),
            favorite_service: Arc::new(FavoriteService::new(
                Arc::new(PgFavoriteRepository::new(pool.clone())),
                recipe_repository.clone(),
            )),
            shopping_list_service: Arc::new(ShoppingListService::new(
                Arc::new(PgCartRepository::new(pool.clone())),
                recipe_repository.clone(),
            )),
            short_link_service: Arc::new(ShortLinkService::new(Arc::new(
                PgShortLinkRepository::new(pool.clone()),
            ))),
            subscription_service: Arc::new(SubscriptionService::new(
                Arc::new(PgFollowRepository::new(pool.clone())),
                recipe_repository,
                Arc::new(PgUserRepository::new(pool)),
            )),
        }
    }
}
