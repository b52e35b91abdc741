//! Map locations with their hidden-object scenes and markets.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, LocationId, NpcId, PuzzleId};
use crate::item::Item;

/// A point of interest on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique location id.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// NPCs present here.
    #[serde(default)]
    pub npc_ids: Vec<NpcId>,
    /// Objects the player can find or interact with.
    #[serde(default)]
    pub hidden_objects: Vec<SceneObject>,
    /// Trading post, if the location has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
}

/// Something clickable in a hidden-object scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    /// Object id. Picked-up objects become items with this id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_image: Option<String>,
    /// Message shown when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_message: Option<String>,
    /// Resources granted instead of an item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants_resources: Option<BTreeMap<String, i64>>,
    /// Lock-and-key interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    /// Puzzle opened when clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers_puzzle_id: Option<PuzzleId>,
    /// Set once the object has been used up.
    #[serde(default, rename = "isHandledInteractable")]
    pub handled: bool,
}

impl SceneObject {
    /// Create a plain pick-up object.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
            item_image: None,
            found_message: None,
            grants_resources: None,
            interaction: None,
            triggers_puzzle_id: None,
            handled: false,
        }
    }

    /// The item the player receives when picking this object up.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            item_image: self.item_image.clone(),
        }
    }
}

/// An object that needs an item to open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Key item.
    pub required_item_id: ItemId,
    /// Shown on success.
    pub success_message: String,
    /// Item found inside.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_item: Option<Item>,
    /// Whether the key is used up.
    #[serde(default)]
    pub consumes_required_item: bool,
}

/// A market's goods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Tradeable goods.
    #[serde(default)]
    pub goods: Vec<Good>,
}

/// What a good is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GoodKind {
    /// A bundle of a counted resource.
    #[serde(rename_all = "camelCase")]
    Resource {
        /// Resource name.
        resource_type: String,
        /// Amount per trade.
        quantity: i64,
    },
    /// An inventory item.
    #[serde(rename_all = "camelCase")]
    Item {
        /// Item exchanged.
        item_id_to_trade: ItemId,
    },
}

/// A good offered at a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    /// Good id.
    pub good_id: String,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_image: Option<String>,
    /// Resource or item.
    #[serde(flatten)]
    pub kind: GoodKind,
    /// Price the player pays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_sells_to_player_price: Option<Price>,
    /// Price the player receives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_buys_from_player_price: Option<Price>,
}

/// An amount of one currency, authored as `{"silver": 5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct Price {
    /// Currency resource name.
    pub currency: String,
    /// Amount.
    pub amount: i64,
}

impl Price {
    /// Create a price.
    pub fn new(currency: impl Into<String>, amount: i64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }

    /// Currency name with an initial capital.
    pub fn currency_name(&self) -> String {
        let mut chars = self.currency.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_name())
    }
}

impl TryFrom<BTreeMap<String, i64>> for Price {
    type Error = String;

    fn try_from(map: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((currency, amount)), None) => Ok(Self { currency, amount }),
            (None, _) => Err("price has no currency".to_string()),
            (Some(_), Some(_)) => Err("price must name exactly one currency".to_string()),
        }
    }
}

impl From<Price> for BTreeMap<String, i64> {
    fn from(price: Price) -> Self {
        BTreeMap::from([(price.currency, price.amount)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_market_goods() {
        let good: Good = serde_json::from_str(
            r#"{"goodId":"rum_bottle_supply","name":"Bottle of Rum","type":"resource",
                "resourceType":"rum","quantity":1,"marketSellsToPlayerPrice":{"silver":5},
                "stock":10,"icon":"sports_bar","description":"Tasty"}"#,
        )
        .unwrap();
        assert_eq!(
            good.kind,
            GoodKind::Resource {
                resource_type: "rum".into(),
                quantity: 1
            }
        );
        assert_eq!(good.market_sells_to_player_price, Some(Price::new("silver", 5)));
        assert!(good.market_buys_from_player_price.is_none());
    }

    #[test]
    fn price_display_capitalizes_currency() {
        assert_eq!(Price::new("gold", 15).to_string(), "15 Gold");
    }

    #[test]
    fn price_rejects_multiple_currencies() {
        let err = serde_json::from_str::<Price>(r#"{"gold":1,"silver":2}"#).unwrap_err();
        assert!(err.to_string().contains("exactly one currency"));
    }

    #[test]
    fn parses_scene_objects() {
        let obj: SceneObject = serde_json::from_str(
            r#"{"id":"locked_chest_forest","name":"Locked Chest","icon":"inventory_2",
                "isInteractableFeature":true,
                "interaction":{"requiredItemId":"item_rusty_key","successMessage":"Chest unlocked!",
                    "revealedItem":{"id":"item_gold_coins","name":"Gold Coins"},
                    "consumesRequiredItem":false}}"#,
        )
        .unwrap();
        let interaction = obj.interaction.unwrap();
        assert_eq!(interaction.required_item_id, "item_rusty_key");
        assert!(!obj.handled);
    }
}
