//! Buying and selling at a location's market.

use cs_core::{Good, GoodKind, Item, Price};
use cs_dialogue::{Notification, PlayerState};
use tracing::error;

/// What a trade produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trade {
    /// Notifications to apply, in order.
    pub notifications: Vec<Notification>,
    /// Text for the player. `None` when the good cannot be traded this way.
    pub message: Option<String>,
}

impl Trade {
    fn refused(message: String) -> Self {
        Self {
            notifications: Vec::new(),
            message: Some(message),
        }
    }

    /// Whether anything changed hands.
    pub fn completed(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Buy one unit of `good`.
pub fn buy(good: &Good, player: &PlayerState) -> Trade {
    let Some(price) = &good.market_sells_to_player_price else {
        error!(good = %good.good_id, "good has no selling price");
        return Trade::default();
    };
    if player.resource(&price.currency) < price.amount {
        return Trade::refused(format!("Not enough {} for {}.", price.currency, good.name));
    }

    let cost = Notification::resource(price.currency.clone(), -price.amount);
    let (gain, message) = match &good.kind {
        GoodKind::Resource {
            resource_type,
            quantity,
        } => (
            Notification::resource(resource_type.clone(), *quantity),
            format!("Bought {quantity} {}.", good.name),
        ),
        GoodKind::Item { item_id_to_trade } => (
            Notification::AddToInventory {
                item: Item {
                    id: item_id_to_trade.clone(),
                    name: good.name.clone(),
                    description: good.description.clone(),
                    icon: good.icon.clone(),
                    item_image: good.item_image.clone(),
                },
            },
            format!("Bought {}.", good.name),
        ),
    };
    Trade {
        notifications: vec![cost, gain],
        message: Some(message),
    }
}

/// Sell one unit of `good`.
pub fn sell(good: &Good, player: &PlayerState) -> Trade {
    let Some(price) = &good.market_buys_from_player_price else {
        error!(good = %good.good_id, "good has no buying price");
        return Trade::default();
    };
    let income = income(price);

    match &good.kind {
        GoodKind::Item { item_id_to_trade } => {
            if !player.has_item(item_id_to_trade.as_str()) {
                return Trade::refused(format!("You don't have {} to sell.", good.name));
            }
            Trade {
                notifications: vec![
                    Notification::RemoveFromInventory {
                        item_id: item_id_to_trade.clone(),
                    },
                    income,
                ],
                message: Some(format!("Sold {} for {price}.", good.name)),
            }
        }
        GoodKind::Resource {
            resource_type,
            quantity,
        } => {
            if player.resource(resource_type) < *quantity {
                return Trade::refused(format!("You don't have enough {} to sell.", good.name));
            }
            Trade {
                notifications: vec![
                    Notification::resource(resource_type.clone(), -quantity),
                    income,
                ],
                message: Some(format!("Sold {quantity} {} for {price}.", good.name)),
            }
        }
    }
}

fn income(price: &Price) -> Notification {
    Notification::resource(price.currency.clone(), price.amount)
}
