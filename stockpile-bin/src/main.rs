use std::path::Path;

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use settings::{Settings, DEFAULT_SETTINGS_PATH};
use stockpile_anvil::InventoryStore;
use stockpile_inventory::{Carrier, Container, Inventory, Query};
use stockpile_primitives::{
    archetype::{ContainerTypes, EquipmentTypes},
    generator::{self, ItemStackGenerator},
    item::ItemTypes,
    position::{BlockPosition, Location},
    stack::ItemStack,
    text::Text,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let settings = Settings::load_from_path(Path::new(DEFAULT_SETTINGS_PATH));
    let store = InventoryStore::open(settings.store_directory.clone());

    let viewer = Uuid::from_u128(0x5eed_0001);
    let player = Inventory::builder()
        .grid(9, 3)
        .slots(9)
        .equipment([
            EquipmentTypes::HEAD,
            EquipmentTypes::CHEST,
            EquipmentTypes::LEGS,
            EquipmentTypes::FEET,
            EquipmentTypes::OFF_HAND,
        ])
        .title("Inventory")
        .config(settings.inventory)
        .complete_structure()?
        .identity(viewer)
        .carrier(Carrier::Entity(viewer))
        .build();
    let chest = Inventory::builder()
        .grid(9, 3)
        .title(Text::of("Chest"))
        .config(settings.inventory)
        .complete_structure()?
        .identity(Uuid::from_u128(0xc4e5_7001))
        .carrier(Carrier::Block {
            location: Location::new(0, 0),
            position: BlockPosition::new(12, 64, -40),
        })
        .build();

    if store.load_into(&chest).context("loading chest")? {
        info!("restored chest with {} items", chest.total_quantity());
    } else {
        let loot = ItemStackGenerator::builder()
            .add(generator::items(vec![
                ItemTypes::IRON_INGOT,
                ItemTypes::GOLD_INGOT,
                ItemTypes::DIAMOND,
                ItemTypes::BREAD,
            ]))
            .add(generator::quantity(1..=24))
            .build()?;
        let mut rng = StdRng::seed_from_u64(0x10_07);
        for _ in 0..8 {
            let stack = loot.generate(&mut rng)?.create_stack();
            let result = chest.offer(stack);
            if !result.is_success() {
                info!("chest is full, {} stacks rejected", result.rejected_items().len());
            }
        }
        info!("filled chest with {} items", chest.total_quantity());
    }

    let result = player.set_equipment(
        &EquipmentTypes::HEAD,
        ItemStack::of(ItemTypes::DIAMOND_HELMET, 1),
    );
    info!("equipped helmet: {:?}", result.kind());

    let mut container = Container::new(
        ContainerTypes::GENERIC_9X3,
        viewer,
        player.clone(),
        vec![chest.clone()],
    )?;
    container.open()?;

    // Move the first ingots out of the chest and onto the cursor.
    let ingots = chest.query(
        &Query::item_type(ItemTypes::IRON_INGOT).or(Query::item_type(ItemTypes::GOLD_INGOT)),
    );
    let polled = ingots.poll_limit(16);
    info!(
        "took {} x{} ({:?})",
        polled.polled_item().item_type(),
        polled.polled_item().quantity(),
        polled.kind()
    );
    container.set_cursor(polled.polled_item().create_stack())?;

    let cursor = container.close()?;
    let result = player.offer(cursor);
    info!(
        "player now holds {} items in {} slots, cursor returned: {:?}",
        player.total_quantity(),
        player.size(),
        result.kind()
    );

    store.save(&chest).context("saving chest")?;
    store.save(&player).context("saving player")?;
    info!("saved inventories to {}", settings.store_directory.display());
    Ok(())
}
