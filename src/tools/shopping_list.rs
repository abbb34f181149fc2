use super::tool::{Tool, ToolFuture, ToolProvider};
use crate::schemas::{decode_arguments, parameters_schema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: u32,
}

/// Parameters for `addItem`
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddItemParams {
    /// Name of the item, e.g. "milk"
    pub name: String,
    /// How many to add (defaults to 1)
    #[serde(default)]
    #[schemars(range(min = 1))]
    pub quantity: Option<u32>,
}

/// Parameters for `removeItem`
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RemoveItemParams {
    /// Name of the item to remove
    pub name: String,
    /// How many to remove; omit to remove the item entirely
    #[serde(default)]
    #[schemars(range(min = 1))]
    pub quantity: Option<u32>,
}

/// Parameters for `getItems`
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetItemsParams {}

/// In-memory shopping list shared by the shopping tools
#[derive(Debug, Clone, Default)]
pub struct ShoppingCart {
    items: Arc<Mutex<Vec<ShoppingItem>>>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `name`, merging with an existing entry
    pub async fn add_item(&self, name: &str, quantity: u32) -> String {
        let name = name.trim();
        if name.is_empty() {
            return "Please specify an item name.".to_string();
        }
        let quantity = quantity.max(1);

        let mut items = self.items.lock().await;
        let existing = items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name));
        let total = match existing {
            Some(idx) => {
                let item = &mut items[idx];
                item.quantity = item.quantity.saturating_add(quantity);
                item.quantity
            }
            None => {
                items.push(ShoppingItem {
                    name: name.to_string(),
                    quantity,
                });
                quantity
            }
        };

        info!(item = name, quantity, total, "Added item to shopping list");
        if total == quantity {
            format!("Added {quantity} x {name} to the shopping list.")
        } else {
            format!("Added {quantity} x {name} to the shopping list ({total} in total).")
        }
    }

    /// Take `quantity` of `name` off the list, or all of it when `None`
    pub async fn remove_item(&self, name: &str, quantity: Option<u32>) -> String {
        let name = name.trim();
        if name.is_empty() {
            return "Please specify an item name.".to_string();
        }

        let mut items = self.items.lock().await;
        let Some(idx) = items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))
        else {
            return format!("{name} is not on the shopping list.");
        };

        let remaining = match quantity {
            Some(quantity) => items[idx].quantity.saturating_sub(quantity.max(1)),
            None => 0,
        };

        info!(item = name, remaining, "Removed item from shopping list");
        if remaining == 0 {
            let removed = items.remove(idx);
            format!("Removed {} from the shopping list.", removed.name)
        } else {
            items[idx].quantity = remaining;
            format!(
                "Removed {} x {} from the shopping list ({} left).",
                quantity.unwrap_or_default(),
                items[idx].name,
                remaining
            )
        }
    }

    /// Snapshot of the list in insertion order
    pub async fn items(&self) -> Vec<ShoppingItem> {
        self.items.lock().await.clone()
    }

    /// The list rendered as one sentence
    pub async fn describe_items(&self) -> String {
        let items = self.items.lock().await;
        if items.is_empty() {
            return "The shopping list is empty.".to_string();
        }
        let lines: Vec<String> = items
            .iter()
            .map(|item| format!("{} x {}", item.quantity, item.name))
            .collect();
        format!("Shopping list: {}.", lines.join(", "))
    }
}

impl ToolProvider for ShoppingCart {
    fn describe(&self) -> Vec<Arc<dyn Tool>> {
        vec![
            Arc::new(AddItemTool(self.clone())),
            Arc::new(RemoveItemTool(self.clone())),
            Arc::new(GetItemsTool(self.clone())),
        ]
    }
}

/// `addItem` tool callback
#[derive(Debug)]
pub struct AddItemTool(ShoppingCart);

impl Tool for AddItemTool {
    fn name(&self) -> &'static str {
        "addItem"
    }

    fn description(&self) -> &'static str {
        "Add an item to the shopping list, or increase its quantity if it is already there"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<AddItemParams>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: AddItemParams = decode_arguments(self.name(), parameters)?;
            Ok(self
                .0
                .add_item(&params.name, params.quantity.unwrap_or(1))
                .await)
        })
    }
}

/// `removeItem` tool callback
#[derive(Debug)]
pub struct RemoveItemTool(ShoppingCart);

impl Tool for RemoveItemTool {
    fn name(&self) -> &'static str {
        "removeItem"
    }

    fn description(&self) -> &'static str {
        "Remove an item from the shopping list, or decrease its quantity"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<RemoveItemParams>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: RemoveItemParams = decode_arguments(self.name(), parameters)?;
            Ok(self.0.remove_item(&params.name, params.quantity).await)
        })
    }
}

/// `getItems` tool callback
#[derive(Debug)]
pub struct GetItemsTool(ShoppingCart);

impl Tool for GetItemsTool {
    fn name(&self) -> &'static str {
        "getItems"
    }

    fn description(&self) -> &'static str {
        "Get all items currently on the shopping list"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<GetItemsParams>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let _: GetItemsParams = decode_arguments(self.name(), parameters)?;
            Ok(self.0.describe_items().await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_merges_case_insensitively() {
        let cart = ShoppingCart::new();
        assert_eq!(cart.add_item("Milk", 2).await, "Added 2 x Milk to the shopping list.");
        assert_eq!(
            cart.add_item(" milk ", 1).await,
            "Added 1 x milk to the shopping list (3 in total)."
        );
        assert_eq!(
            cart.items().await,
            vec![ShoppingItem {
                name: "Milk".to_string(),
                quantity: 3
            }]
        );
    }

    #[tokio::test]
    async fn test_remove_partial_and_full() {
        let cart = ShoppingCart::new();
        cart.add_item("eggs", 12).await;
        cart.add_item("bread", 1).await;

        assert_eq!(
            cart.remove_item("EGGS", Some(5)).await,
            "Removed 5 x eggs from the shopping list (7 left)."
        );
        assert_eq!(cart.remove_item("eggs", Some(10)).await, "Removed eggs from the shopping list.");
        assert_eq!(cart.remove_item("bread", None).await, "Removed bread from the shopping list.");
        assert_eq!(cart.remove_item("jam", None).await, "jam is not on the shopping list.");
        assert!(cart.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_listing_keeps_insertion_order() {
        let cart = ShoppingCart::new();
        assert_eq!(cart.describe_items().await, "The shopping list is empty.");
        cart.add_item("milk", 2).await;
        cart.add_item("bread", 1).await;
        assert_eq!(cart.describe_items().await, "Shopping list: 2 x milk, 1 x bread.");
    }

    #[tokio::test]
    async fn test_blank_names() {
        let cart = ShoppingCart::new();
        assert_eq!(cart.add_item("  ", 1).await, "Please specify an item name.");
        assert_eq!(cart.remove_item("", None).await, "Please specify an item name.");
    }

    #[tokio::test]
    async fn test_tools_share_one_cart() {
        let cart = ShoppingCart::new();
        let tools = cart.describe();
        let names: Vec<_> = tools.iter().map(|tool| tool.name()).collect();
        assert_eq!(names, vec!["addItem", "removeItem", "getItems"]);

        tools[0]
            .execute(json!({"name": "apples", "quantity": 4}))
            .await
            .unwrap();
        tools[0].execute(json!({"name": "pears"})).await.unwrap();
        let listing = tools[2].execute(json!({})).await.unwrap();
        assert_eq!(listing, "Shopping list: 4 x apples, 1 x pears.");
    }

    #[tokio::test]
    async fn test_bad_arguments_are_errors_before_the_cart_is_touched() {
        let cart = ShoppingCart::new();
        let tools = cart.describe();
        let err = tools[0].execute(json!({"quantity": 2})).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENTS");
        assert!(cart.items().await.is_empty());
    }
}
