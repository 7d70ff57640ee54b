//! Typed CRUD calls for every [`Resource`], following the
//! `/{collection}` and `/{collection}/{id}` routes.

use youth_council_shared::{FormPayload, Resource, Updatable};

use crate::{error::ApiError, http::ApiClient};

pub fn collection_path<R: Resource>() -> String {
    format!("/{}", R::COLLECTION)
}

pub fn item_path<R: Resource>(id: i64) -> String {
    format!("/{}/{}", R::COLLECTION, id)
}

impl ApiClient {
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.get_json(&collection_path::<R>()).await
    }

    pub async fn create<R: Resource>(&self, payload: FormPayload) -> Result<R, ApiError> {
        let created: R = self.post_form(&collection_path::<R>(), payload).await?;
        tracing::info!("created {} {:?}", R::LABEL, created.id());
        Ok(created)
    }

    pub async fn update<R: Updatable>(&self, id: i64, payload: FormPayload) -> Result<R, ApiError> {
        let updated: R = self.put_form(&item_path::<R>(id), payload).await?;
        tracing::info!("updated {} {id}", R::LABEL);
        Ok(updated)
    }

    pub async fn remove<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        self.delete_path(&item_path::<R>(id)).await?;
        tracing::info!("deleted {} {id}", R::LABEL);
        Ok(())
    }
}
