use shared::{
    domain::{ShoppingItemId, ShoppingListId},
    error::ValidationError,
    protocol::{Listing, NewShoppingListItem, PurchasedUpdate, ShoppingList, ShoppingListItem},
};
use serde::Serialize;

use crate::{api::ApiClient, error::ClientError};

#[derive(Serialize)]
struct NewShoppingList<'a> {
    name: &'a str,
}

pub struct ShoppingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ShoppingApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn lists(&self) -> Result<Vec<ShoppingList>, ClientError> {
        let listing: Listing<ShoppingList> = self.client.get("/shopping/lists/").await?;
        Ok(listing.into_items())
    }

    pub async fn create_list(&self, name: &str) -> Result<ShoppingList, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" }.into());
        }
        self.client
            .post("/shopping/lists/", &NewShoppingList { name })
            .await
    }

    pub async fn get_list(&self, list_id: ShoppingListId) -> Result<ShoppingList, ClientError> {
        self.client.get(&format!("/shopping/lists/{list_id}/")).await
    }

    pub async fn items(&self, list_id: ShoppingListId) -> Result<Vec<ShoppingListItem>, ClientError> {
        let listing: Listing<ShoppingListItem> = self
            .client
            .get(&format!("/shopping/lists/{list_id}/items/"))
            .await?;
        Ok(listing.into_items())
    }

    pub async fn add_item(
        &self,
        list_id: ShoppingListId,
        item: &NewShoppingListItem,
    ) -> Result<ShoppingListItem, ClientError> {
        if item.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" }.into());
        }
        self.client
            .post(&format!("/shopping/lists/{list_id}/items/"), item)
            .await
    }

    pub async fn set_purchased(
        &self,
        item_id: ShoppingItemId,
        is_purchased: bool,
    ) -> Result<ShoppingListItem, ClientError> {
        self.client
            .patch(
                &format!("/shopping/items/{item_id}/"),
                &PurchasedUpdate { is_purchased },
            )
            .await
    }
}
