//! Component state of the admin orders board.

use std::collections::HashSet;

use common::model::order::{Order, Rider};

use crate::polling::Poller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Active,
    Finished,
}

/// Everything one refresh brings back.
pub struct AdminSnapshot {
    pub active: Vec<Order>,
    pub finished: Vec<Order>,
    pub riders: Vec<Rider>,
}

pub struct AdminOrdersPage {
    pub active: Vec<Order>,
    pub finished: Vec<Order>,
    pub riders: Vec<Rider>,
    pub tab: AdminTab,
    pub loading: bool,
    pub error: Option<String>,
    /// Orders with a request in flight; their controls are disabled.
    pub busy: HashSet<String>,
    pub poller: Option<Poller>,
}

impl AdminOrdersPage {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            finished: Vec::new(),
            riders: Vec::new(),
            tab: AdminTab::Active,
            loading: true,
            error: None,
            busy: HashSet::new(),
            poller: None,
        }
    }

    pub fn active_order_mut(&mut self, order_id: &str) -> Option<&mut Order> {
        self.active.iter_mut().find(|o| o.id == order_id)
    }

    pub fn is_busy(&self, order_id: &str) -> bool {
        self.busy.contains(order_id)
    }

    /// A refresh overwrites the lists, except for orders with a request in
    /// flight whose local copy already carries the pending change.
    pub fn apply_snapshot(&mut self, snapshot: AdminSnapshot) {
        let mut active = snapshot.active;
        for order in &mut active {
            if self.busy.contains(&order.id) {
                if let Some(local) = self.active.iter().find(|o| o.id == order.id) {
                    *order = local.clone();
                }
            }
        }
        self.active = active;
        self.finished = snapshot.finished;
        self.riders = snapshot.riders;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, confirmed: &str) -> Order {
        Order {
            id: id.to_string(),
            confirmed: Some(confirmed.to_string()),
            ..Order::default()
        }
    }

    #[test]
    fn refresh_keeps_local_copy_of_busy_orders() {
        let mut page = AdminOrdersPage::new();
        page.active = vec![order("a", "Order Confirmed"), order("b", "Order Confirmed")];
        page.busy.insert("a".to_string());

        page.apply_snapshot(AdminSnapshot {
            active: vec![order("a", ""), order("b", "")],
            finished: Vec::new(),
            riders: Vec::new(),
        });

        assert_eq!(page.active[0].confirmed.as_deref(), Some("Order Confirmed"));
        assert_eq!(page.active[1].confirmed.as_deref(), Some(""));
    }
}
