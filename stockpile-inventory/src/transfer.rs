//! Moving items in and out of inventories.

use stockpile_primitives::stack::{ItemStack, ItemStackSnapshot};
use tracing::{debug, trace};

use crate::{
    inventory::Inventory,
    slot::Slot,
    transaction::{
        InventoryTransactionResult, PollTransactionResult, SlotTransaction, TransactionType,
    },
};

/// Where an offer would put its items: (slot index, amount) pairs
/// and the amount left over.
struct OfferPlan {
    placements: Vec<(usize, u32)>,
    leftover: u32,
}

impl Inventory {
    /// A copy of the first non-empty stack, or the empty marker.
    pub fn peek(&self) -> ItemStack {
        self.slots()
            .iter()
            .map(Slot::stack)
            .find(|stack| !stack.is_empty())
            .unwrap_or_default()
    }

    /// A copy of the stack at `index`, or the empty marker.
    pub fn peek_at(&self, index: usize) -> ItemStack {
        self.slot(index)
            .map(|slot| slot.stack())
            .unwrap_or_default()
    }

    /// What [`Inventory::poll_limit`] would take, without taking it.
    pub fn peek_limit(&self, limit: u32) -> ItemStack {
        let (taken, _) = self.take_matching(limit, false);
        taken
    }

    /// Removes the whole first non-empty stack.
    pub fn poll(&self) -> PollTransactionResult {
        for slot in self.slots() {
            let original = slot.replace(ItemStack::empty());
            if original.is_empty() {
                continue;
            }
            debug!(
                "polled {} x{} from slot {}",
                original.item_type(),
                original.quantity(),
                slot.index()
            );
            let transaction =
                SlotTransaction::new(slot, original.snapshot(), ItemStackSnapshot::empty());
            let result = InventoryTransactionResult::builder()
                .transaction(transaction)
                .build();
            return PollTransactionResult::new(result, original.snapshot());
        }
        PollTransactionResult::new(
            InventoryTransactionResult::fail_no_transactions(),
            ItemStackSnapshot::empty(),
        )
    }

    /// Removes up to `limit` items similar to the first non-empty stack,
    /// draining slots in order. Whatever is found is removed, but the
    /// result is only a success when exactly `limit` items were taken.
    pub fn poll_limit(&self, limit: u32) -> PollTransactionResult {
        let (taken, transactions) = self.take_matching(limit, true);
        let kind = if !taken.is_empty() && taken.quantity() == limit {
            TransactionType::Success
        } else {
            TransactionType::Failure
        };
        if !taken.is_empty() {
            debug!(
                "polled {} x{} of {} requested",
                taken.item_type(),
                taken.quantity(),
                limit
            );
        }
        let result = InventoryTransactionResult::builder()
            .kind(kind)
            .transactions(transactions)
            .build();
        PollTransactionResult::new(result, taken.snapshot())
    }

    fn take_matching(&self, limit: u32, remove: bool) -> (ItemStack, Vec<SlotTransaction>) {
        let mut transactions = Vec::new();
        if limit == 0 {
            return (ItemStack::empty(), transactions);
        }
        let mut template: Option<ItemStack> = None;
        let mut taken = 0u32;
        for slot in self.slots() {
            if taken == limit {
                break;
            }
            let held = slot.stack();
            if held.is_empty() {
                continue;
            }
            if !template.as_ref().map_or(true, |template| template.is_similar(&held)) {
                continue;
            }
            if template.is_none() {
                template = Some(held.clone());
            }
            let amount = held.quantity().min(limit - taken);
            taken += amount;
            if remove {
                let remaining = held.with_quantity(held.quantity() - amount);
                slot.replace(remaining.clone());
                transactions.push(SlotTransaction::new(
                    slot,
                    held.snapshot(),
                    remaining.snapshot(),
                ));
            }
        }
        let taken = template
            .map(|template| template.with_quantity(taken))
            .unwrap_or_default();
        (taken, transactions)
    }

    /// Puts as much of `stack` as fits into the inventory.
    /// Anything that does not fit is rejected.
    pub fn offer(&self, stack: ItemStack) -> InventoryTransactionResult {
        if self.is_empty_inventory() {
            return InventoryTransactionResult::builder()
                .kind(TransactionType::Failure)
                .reject(stack.snapshot())
                .build();
        }
        if stack.is_empty() {
            return InventoryTransactionResult::success_no_transactions();
        }
        let slots = self.slots();
        let plan = self.plan_offer(&slots, &stack);
        let mut builder = InventoryTransactionResult::builder();
        for (index, amount) in plan.placements {
            let slot = &slots[index];
            let original = slot.stack();
            let updated = if original.is_empty() {
                stack.with_quantity(amount)
            } else {
                original.with_quantity(original.quantity() + amount)
            };
            slot.replace(updated.clone());
            builder = builder.transaction(SlotTransaction::new(
                slot.clone(),
                original.snapshot(),
                updated.snapshot(),
            ));
        }
        if plan.leftover > 0 {
            debug!(
                "offer of {} x{} left {} over",
                stack.item_type(),
                stack.quantity(),
                plan.leftover
            );
            builder = builder.reject(stack.with_quantity(plan.leftover).snapshot());
        }
        builder.build()
    }

    /// Offers each stack in turn.
    pub fn offer_all(
        &self,
        stacks: impl IntoIterator<Item = ItemStack>,
    ) -> InventoryTransactionResult {
        stacks.into_iter().fold(
            InventoryTransactionResult::success_no_transactions(),
            |result, stack| result.and(self.offer(stack)),
        )
    }

    /// Puts all of `stack` into the slot at `index`, or nothing at all.
    pub fn offer_at(&self, index: usize, stack: ItemStack) -> InventoryTransactionResult {
        let Some(slot) = self.slot(index) else {
            return InventoryTransactionResult::builder()
                .kind(TransactionType::Failure)
                .reject(stack.snapshot())
                .build();
        };
        if stack.is_empty() {
            return InventoryTransactionResult::success_no_transactions();
        }
        let original = slot.stack();
        let room = if original.is_empty() {
            slot.limit_for(&stack)
        } else if original.is_similar(&stack) {
            slot.limit_for(&original).saturating_sub(original.quantity())
        } else {
            0
        };
        if stack.quantity() > room {
            return InventoryTransactionResult::builder()
                .kind(TransactionType::Failure)
                .reject(stack.snapshot())
                .build();
        }
        let updated = if original.is_empty() {
            stack
        } else {
            original.with_quantity(original.quantity() + stack.quantity())
        };
        slot.replace(updated.clone());
        InventoryTransactionResult::builder()
            .transaction(SlotTransaction::new(
                slot,
                original.snapshot(),
                updated.snapshot(),
            ))
            .build()
    }

    /// Overwrites the slot at `index`. Anything above the slot's limit
    /// is clipped off and rejected. An empty stack clears the slot.
    pub fn set(&self, index: usize, stack: ItemStack) -> InventoryTransactionResult {
        let Some(slot) = self.slot(index) else {
            return InventoryTransactionResult::builder()
                .kind(TransactionType::Failure)
                .reject(stack.snapshot())
                .build();
        };
        let mut builder = InventoryTransactionResult::builder();
        let stored = if stack.is_empty() {
            ItemStack::empty()
        } else {
            let limit = slot.limit_for(&stack);
            if stack.quantity() > limit {
                builder = builder.reject(stack.with_quantity(stack.quantity() - limit).snapshot());
                stack.with_quantity(limit)
            } else {
                stack
            }
        };
        let original = slot.replace(stored.clone());
        builder
            .transaction(SlotTransaction::new(
                slot,
                original.snapshot(),
                stored.snapshot(),
            ))
            .build()
    }

    /// True if [`Inventory::offer`] would take all of `stack`.
    pub fn can_fit(&self, stack: &ItemStack) -> bool {
        if self.is_empty_inventory() {
            return false;
        }
        if stack.is_empty() {
            return true;
        }
        self.plan_offer(&self.slots(), stack).leftover == 0
    }

    /// Empties every slot.
    pub fn clear(&self) -> InventoryTransactionResult {
        let mut builder = InventoryTransactionResult::builder();
        for slot in self.slots() {
            let original = slot.replace(ItemStack::empty());
            if !original.is_empty() {
                builder = builder.transaction(SlotTransaction::new(
                    slot,
                    original.snapshot(),
                    ItemStackSnapshot::empty(),
                ));
            }
        }
        builder.build()
    }

    fn plan_offer(&self, slots: &[Slot], stack: &ItemStack) -> OfferPlan {
        let mut placements = Vec::new();
        let mut remaining = stack.quantity();

        let mut place = |index: usize, room: u32, remaining: &mut u32| {
            let amount = room.min(*remaining);
            if amount > 0 {
                placements.push((index, amount));
                *remaining -= amount;
            }
        };
        let room_in = |slot: &Slot, top_up: bool, fill: bool| -> u32 {
            let held = slot.stack();
            if held.is_empty() {
                if fill {
                    slot.limit_for(stack)
                } else {
                    0
                }
            } else if top_up && held.is_similar(stack) {
                slot.limit_for(&held).saturating_sub(held.quantity())
            } else {
                0
            }
        };

        if self.config().merge_partial_stacks {
            for (index, slot) in slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                place(index, room_in(slot, true, false), &mut remaining);
            }
            for (index, slot) in slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                place(index, room_in(slot, false, true), &mut remaining);
            }
        } else {
            for (index, slot) in slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                place(index, room_in(slot, true, true), &mut remaining);
            }
        }
        trace!(
            "planned {} placements for {} x{}, {} left over",
            placements.len(),
            stack.item_type(),
            stack.quantity(),
            remaining
        );
        OfferPlan {
            placements,
            leftover: remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use stockpile_primitives::{item::ItemTypes, nbt::Value, stack::ItemStack};

    use crate::{
        config::Config, inventory::Inventory, transaction::TransactionType,
    };

    fn row(slots: u32) -> Inventory {
        Inventory::builder()
            .slots(slots)
            .complete_structure()
            .unwrap()
            .build()
    }

    fn fill(inventory: &Inventory, stacks: &[ItemStack]) {
        for (index, stack) in stacks.iter().enumerate() {
            assert!(inventory.set(index, stack.clone()).is_success());
        }
    }

    #[test]
    fn offer_spreads_over_empty_slots() {
        let inventory = row(9);
        let result = inventory.offer(ItemStack::of(ItemTypes::STONE, 70));
        assert!(result.is_success());
        assert!(result.rejected_items().is_empty());
        assert_eq!(inventory.peek_at(0).quantity(), 64);
        assert_eq!(inventory.peek_at(1).quantity(), 6);
        assert_eq!(inventory.total_quantity(), 70);
        assert_eq!(result.slot_transactions().len(), 2);
    }

    #[test]
    fn offer_tops_up_partial_stacks_first() {
        let inventory = row(3);
        fill(
            &inventory,
            &[
                ItemStack::empty(),
                ItemStack::of(ItemTypes::DIRT, 4),
                ItemStack::of(ItemTypes::STONE, 60),
            ],
        );
        assert!(inventory.offer(ItemStack::of(ItemTypes::STONE, 10)).is_success());
        assert_eq!(inventory.peek_at(2).quantity(), 64);
        assert_eq!(inventory.peek_at(0), ItemStack::of(ItemTypes::STONE, 6));
    }

    #[test]
    fn offer_without_merging_takes_first_fit() {
        let inventory = Inventory::builder()
            .slots(3)
            .config(Config {
                merge_partial_stacks: false,
                ..Config::default()
            })
            .complete_structure()
            .unwrap()
            .build();
        fill(
            &inventory,
            &[ItemStack::empty(), ItemStack::of(ItemTypes::STONE, 60)],
        );
        assert!(inventory.offer(ItemStack::of(ItemTypes::STONE, 10)).is_success());
        assert_eq!(inventory.peek_at(0).quantity(), 10);
        assert_eq!(inventory.peek_at(1).quantity(), 60);
    }

    #[test]
    fn offer_respects_item_and_inventory_limits() {
        let inventory = row(2);
        let result = inventory.offer(ItemStack::of(ItemTypes::ENDER_PEARL, 40));
        assert_eq!(result.kind(), TransactionType::Failure);
        assert_eq!(inventory.total_quantity(), 32);
        assert_eq!(result.rejected_items()[0].quantity(), 8);

        let swords = row(3);
        assert!(swords.offer(ItemStack::of(ItemTypes::DIAMOND_SWORD, 3)).is_success());
        assert_eq!(swords.size(), 3);
    }

    #[test]
    fn stacks_with_different_data_do_not_merge() {
        let inventory = row(2);
        let mut named = ItemStack::of(ItemTypes::STONE, 1);
        named.set_data("Name", Value::String("rock".into())).unwrap();
        assert!(inventory.offer(named).is_success());
        assert!(inventory.offer(ItemStack::of(ItemTypes::STONE, 1)).is_success());
        assert_eq!(inventory.size(), 2);
    }

    #[test]
    fn offer_at_is_all_or_nothing() {
        let inventory = row(2);
        fill(&inventory, &[ItemStack::of(ItemTypes::STONE, 60)]);

        let result = inventory.offer_at(0, ItemStack::of(ItemTypes::STONE, 5));
        assert_eq!(result.kind(), TransactionType::Failure);
        assert_eq!(inventory.peek_at(0).quantity(), 60);

        assert!(inventory.offer_at(0, ItemStack::of(ItemTypes::STONE, 4)).is_success());
        assert_eq!(inventory.peek_at(0).quantity(), 64);

        assert!(!inventory.offer_at(0, ItemStack::of(ItemTypes::DIRT, 1)).is_success());
        assert!(!inventory.offer_at(7, ItemStack::of(ItemTypes::DIRT, 1)).is_success());
    }

    #[test]
    fn offer_all_combines_results() {
        let inventory = row(1);
        let result = inventory.offer_all([
            ItemStack::of(ItemTypes::STONE, 10),
            ItemStack::of(ItemTypes::DIRT, 1),
        ]);
        assert_eq!(result.kind(), TransactionType::Failure);
        assert_eq!(result.rejected_items().len(), 1);
        assert_eq!(result.rejected_items()[0].item_type(), &ItemTypes::DIRT);
    }

    #[test]
    fn can_fit_agrees_with_offer() {
        let inventory = row(2);
        fill(&inventory, &[ItemStack::of(ItemTypes::DIRT, 64)]);
        assert!(inventory.can_fit(&ItemStack::of(ItemTypes::STONE, 64)));
        assert!(!inventory.can_fit(&ItemStack::of(ItemTypes::STONE, 65)));
        assert_eq!(inventory.total_quantity(), 64);

        let stone = ItemStack::of(ItemTypes::STONE, 64);
        assert!(inventory.offer(stone.clone()).is_success());
        assert!(inventory.contains(&stone));
    }

    #[test]
    fn poll_limit_drains_matching_stacks() {
        let inventory = row(4);
        fill(
            &inventory,
            &[
                ItemStack::of(ItemTypes::STONE, 10),
                ItemStack::of(ItemTypes::DIRT, 3),
                ItemStack::of(ItemTypes::ARROW, 9),
                ItemStack::of(ItemTypes::STONE, 32),
            ],
        );
        assert_eq!(inventory.peek_limit(16).quantity(), 16);
        assert_eq!(inventory.total_quantity(), 54);

        let result = inventory.poll_limit(16);
        assert!(result.is_success());
        assert_eq!(result.polled_item().item_type(), &ItemTypes::STONE);
        assert_eq!(result.polled_item().quantity(), 16);
        assert!(inventory.peek_at(0).is_empty());
        assert_eq!(inventory.peek_at(3).quantity(), 26);
        assert_eq!(inventory.peek_at(1).quantity(), 3);
    }

    #[test]
    fn poll_limit_shortfall_removes_and_fails() {
        let inventory = row(2);
        fill(
            &inventory,
            &[
                ItemStack::of(ItemTypes::STONE, 10),
                ItemStack::of(ItemTypes::STONE, 5),
            ],
        );
        let result = inventory.poll_limit(20);
        assert_eq!(result.kind(), TransactionType::Failure);
        assert_eq!(result.polled_item().quantity(), 15);
        assert_eq!(inventory.total_quantity(), 0);

        result.revert();
        assert_eq!(inventory.total_quantity(), 15);
    }

    #[test]
    fn poll_takes_the_first_stack() {
        let inventory = row(3);
        fill(
            &inventory,
            &[ItemStack::empty(), ItemStack::of(ItemTypes::TORCH, 7)],
        );
        let result = inventory.poll();
        assert!(result.is_success());
        assert_eq!(result.polled_item().quantity(), 7);
        assert_eq!(inventory.size(), 0);

        let result = inventory.poll();
        assert_eq!(result.kind(), TransactionType::Failure);
        assert!(result.polled_item().is_empty());
    }

    #[test]
    fn clear_reports_what_it_removed() {
        let inventory = row(3);
        fill(
            &inventory,
            &[ItemStack::of(ItemTypes::COAL, 2), ItemStack::empty(), ItemStack::of(ItemTypes::EGG, 1)],
        );
        let result = inventory.clear();
        assert!(result.is_success());
        assert_eq!(result.slot_transactions().len(), 2);
        assert_eq!(inventory.size(), 0);
    }

    #[test]
    fn empty_inventory_rejects_everything() {
        let empty = Inventory::empty();
        let result = empty.offer(ItemStack::of(ItemTypes::STONE, 1));
        assert_eq!(result.kind(), TransactionType::Failure);
        assert_eq!(result.rejected_items().len(), 1);
        assert!(!empty.set(0, ItemStack::of(ItemTypes::STONE, 1)).is_success());
        assert!(!empty.can_fit(&ItemStack::of(ItemTypes::STONE, 1)));

        let polled = empty.poll();
        assert_eq!(polled.kind(), TransactionType::Failure);
        assert!(polled.polled_item().is_empty());
        assert!(!empty.poll_limit(3).is_success());
    }
}
