//! Access to slots by the equipment they take.

use stockpile_primitives::{
    archetype::EquipmentType,
    property::{InventoryKeys, Operator},
    stack::{ItemStack, ItemStackSnapshot},
};

use crate::{
    inventory::Inventory,
    query::Query,
    slot::Slot,
    transaction::{InventoryTransactionResult, PollTransactionResult, TransactionType},
};

impl Inventory {
    /// The first slot taking `equipment`.
    pub fn equipment_slot(&self, equipment: &EquipmentType) -> Option<Slot> {
        let query = Query::property(&InventoryKeys::EQUIPMENT_TYPE, equipment.clone(), Operator::Equal);
        self.query(&query).slots().into_iter().next()
    }

    pub fn peek_equipment(&self, equipment: &EquipmentType) -> Option<ItemStack> {
        self.equipment_slot(equipment).map(|slot| slot.stack())
    }

    /// Polls the equipment slot, taking everything when `limit` is `None`.
    pub fn poll_equipment(
        &self,
        equipment: &EquipmentType,
        limit: Option<u32>,
    ) -> PollTransactionResult {
        match (self.equipment_slot(equipment), limit) {
            (Some(slot), Some(limit)) => slot.poll_limit(limit),
            (Some(slot), None) => slot.poll(),
            (None, _) => PollTransactionResult::new(
                InventoryTransactionResult::fail_no_transactions(),
                ItemStackSnapshot::empty(),
            ),
        }
    }

    pub fn set_equipment(&self, equipment: &EquipmentType, stack: ItemStack) -> InventoryTransactionResult {
        match self.equipment_slot(equipment) {
            Some(slot) => slot.set(0, stack),
            None => InventoryTransactionResult::builder()
                .kind(TransactionType::Failure)
                .reject(stack.snapshot())
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use stockpile_primitives::{
        archetype::{EquipmentGroup, EquipmentTypes},
        item::ItemTypes,
        stack::ItemStack,
    };

    use crate::inventory::Inventory;

    fn player() -> Inventory {
        Inventory::builder()
            .grid(9, 3)
            .slots(9)
            .equipment([
                EquipmentTypes::HEAD,
                EquipmentTypes::CHEST,
                EquipmentTypes::LEGS,
                EquipmentTypes::FEET,
            ])
            .equipment([EquipmentTypes::OFF_HAND])
            .complete_structure()
            .unwrap()
            .build()
    }

    #[test]
    fn equipment_slots_are_found_by_type() {
        let player = player();
        assert_eq!(player.capacity(), 41);

        let head = player.equipment_slot(&EquipmentTypes::HEAD).unwrap();
        assert_eq!(head, player.slot(36).unwrap());
        assert_eq!(EquipmentTypes::HEAD.group(), EquipmentGroup::Worn);
        assert!(player.equipment_slot(&EquipmentTypes::MAIN_HAND).is_none());
        assert_eq!(head.equipment_slot(&EquipmentTypes::HEAD), Some(head.clone()));
    }

    #[test]
    fn equipment_round_trip() {
        let player = player();
        let helmet = ItemStack::of(ItemTypes::DIAMOND_HELMET, 1);
        assert!(player.set_equipment(&EquipmentTypes::HEAD, helmet.clone()).is_success());
        assert_eq!(player.peek_equipment(&EquipmentTypes::HEAD), Some(helmet.clone()));

        let shields = ItemStack::of(ItemTypes::SHIELD, 2);
        let result = player.set_equipment(&EquipmentTypes::OFF_HAND, shields);
        assert!(!result.is_success());
        assert_eq!(player.peek_equipment(&EquipmentTypes::OFF_HAND).unwrap().quantity(), 1);

        let polled = player.poll_equipment(&EquipmentTypes::HEAD, None);
        assert!(polled.is_success());
        assert_eq!(polled.polled_item().create_stack(), helmet);
        assert!(player.peek_equipment(&EquipmentTypes::HEAD).unwrap().is_empty());

        assert!(!player.poll_equipment(&EquipmentTypes::MAIN_HAND, Some(1)).is_success());
        assert!(!player
            .set_equipment(&EquipmentTypes::MAIN_HAND, ItemStack::of(ItemTypes::BOW, 1))
            .is_success());
    }
}
