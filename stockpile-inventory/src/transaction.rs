//! Outcomes of inventory operations.

use std::ops::Deref;

use stockpile_primitives::stack::ItemStackSnapshot;

use crate::slot::Slot;

/// Ordered by severity, so combining two results keeps the worse tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionType {
    Success,
    /// The operation could not be fully carried out.
    Failure,
    /// Something unexpected went wrong.
    Error,
}

/// A change applied to one slot.
#[derive(Debug, Clone)]
pub struct SlotTransaction {
    slot: Slot,
    original: ItemStackSnapshot,
    result: ItemStackSnapshot,
}

impl SlotTransaction {
    pub fn new(slot: Slot, original: ItemStackSnapshot, result: ItemStackSnapshot) -> Self {
        Self {
            slot,
            original,
            result,
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn original(&self) -> &ItemStackSnapshot {
        &self.original
    }

    /// What the slot held after the change.
    pub fn result(&self) -> &ItemStackSnapshot {
        &self.result
    }

    fn revert(&self) {
        self.slot.replace(self.original.create_stack());
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct InventoryTransactionResult {
    kind: TransactionType,
    rejected: Vec<ItemStackSnapshot>,
    transactions: Vec<SlotTransaction>,
}

impl InventoryTransactionResult {
    pub fn builder() -> TransactionResultBuilder {
        TransactionResultBuilder::default()
    }

    pub fn success_no_transactions() -> Self {
        Self::builder().kind(TransactionType::Success).build()
    }

    pub fn fail_no_transactions() -> Self {
        Self::builder().kind(TransactionType::Failure).build()
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn is_success(&self) -> bool {
        self.kind == TransactionType::Success
    }

    /// Stacks that could not be placed.
    pub fn rejected_items(&self) -> &[ItemStackSnapshot] {
        &self.rejected
    }

    pub fn slot_transactions(&self) -> &[SlotTransaction] {
        &self.transactions
    }

    /// Combines two results. The worse tag wins and everything
    /// else is concatenated.
    pub fn and(mut self, other: InventoryTransactionResult) -> Self {
        self.kind = self.kind.max(other.kind);
        self.rejected.extend(other.rejected);
        self.transactions.extend(other.transactions);
        self
    }

    /// Puts every affected slot back the way it was, newest change first.
    pub fn revert(&self) {
        for transaction in self.transactions.iter().rev() {
            transaction.revert();
        }
    }

    /// Reverts unless this was a success. Returns whether it reverted.
    pub fn revert_on_failure(&self) -> bool {
        if self.is_success() {
            return false;
        }
        self.revert();
        true
    }
}

#[derive(Debug, Default)]
pub struct TransactionResultBuilder {
    kind: Option<TransactionType>,
    rejected: Vec<ItemStackSnapshot>,
    transactions: Vec<SlotTransaction>,
}

impl TransactionResultBuilder {
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn reject(mut self, stack: ItemStackSnapshot) -> Self {
        if !stack.is_empty() {
            self.rejected.push(stack);
        }
        self
    }

    pub fn transaction(mut self, transaction: SlotTransaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn transactions(mut self, transactions: impl IntoIterator<Item = SlotTransaction>) -> Self {
        self.transactions.extend(transactions);
        self
    }

    /// Without an explicit kind, the result is a success
    /// only if nothing was rejected.
    pub fn build(self) -> InventoryTransactionResult {
        let kind = self.kind.unwrap_or(if self.rejected.is_empty() {
            TransactionType::Success
        } else {
            TransactionType::Failure
        });
        InventoryTransactionResult {
            kind,
            rejected: self.rejected,
            transactions: self.transactions,
        }
    }
}

/// The result of a poll, carrying what was taken.
#[derive(Debug, Clone)]
#[must_use]
pub struct PollTransactionResult {
    result: InventoryTransactionResult,
    polled: ItemStackSnapshot,
}

impl PollTransactionResult {
    pub fn new(result: InventoryTransactionResult, polled: ItemStackSnapshot) -> Self {
        Self { result, polled }
    }

    pub fn polled_item(&self) -> &ItemStackSnapshot {
        &self.polled
    }

    pub fn into_result(self) -> InventoryTransactionResult {
        self.result
    }
}

impl Deref for PollTransactionResult {
    type Target = InventoryTransactionResult;

    fn deref(&self) -> &Self::Target {
        &self.result
    }
}
